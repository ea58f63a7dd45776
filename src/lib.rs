pub mod clean;
pub mod cli;
pub mod compress;
pub mod config;
pub mod error;

pub use clean::{clean_pdf, clean_pdf_with, CleanStats, ConservativePolicy, PageClassifier};
pub use compress::{Ghostscript, Quality};
pub use config::Settings;
pub use error::{CleanError, CompressError, SweepError};

use std::fs;
use std::path::Path;

/// Outcome of a full sweep: cleaning stats plus before/after sizes.
#[derive(Debug, Clone, Copy)]
pub struct SweepReport {
    pub stats: CleanStats,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl SweepReport {
    /// Size reduction as a percentage of the input, clamped at zero when
    /// the output grew or the input was empty.
    pub fn reduction_pct(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        ((1.0 - self.output_bytes as f64 / self.input_bytes as f64) * 100.0).max(0.0)
    }
}

/// High-level API: clean a PDF and, when configured, recompress it.
///
/// This is the recommended entry point for library consumers. It drops the
/// pages the configured policy judges blank (never emptying a non-empty
/// document), then optionally feeds the cleaned file through Ghostscript
/// at the configured quality. Intermediate files live in a private
/// temporary directory that is removed before this function returns.
///
/// # Arguments
///
/// * `input` - Path to a readable PDF file
/// * `output` - Path the final PDF is written to
/// * `settings` - Blank threshold, compression toggle, quality, timeout
///
/// # Returns
///
/// A [`SweepReport`] with page counts and byte sizes, or a [`SweepError`]
/// describing which stage failed.
///
/// # Example
///
/// ```no_run
/// use pdf_sweep::{sweep_pdf, Quality, Settings};
/// use std::path::Path;
///
/// let settings = Settings {
///     compress: true,
///     quality: Quality::Screen,
///     ..Settings::default()
/// };
///
/// let report = sweep_pdf(Path::new("in.pdf"), Path::new("out.pdf"), &settings).unwrap();
/// println!("removed {} of {} pages", report.stats.removed, report.stats.total);
/// ```
pub fn sweep_pdf(
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<SweepReport, SweepError> {
    let input_bytes = fs::metadata(input)?.len();
    let policy = ConservativePolicy::with_threshold(settings.blank_threshold);

    let stats = if settings.compress {
        let workdir = tempfile::tempdir()?;
        let cleaned = workdir.path().join("cleaned.pdf");

        let stats = clean_pdf_with(input, &cleaned, &policy)?;

        let gs = Ghostscript::discover()?.timeout(settings.tool_timeout);
        gs.compress(&cleaned, output, settings.quality)?;

        // The invoker only checks the exit status; make sure Ghostscript
        // actually produced something before handing the path back.
        match fs::metadata(output) {
            Ok(meta) if meta.len() > 0 => {}
            _ => {
                return Err(SweepError::EmptyOutput {
                    path: output.to_path_buf(),
                })
            }
        }
        stats
    } else {
        clean_pdf_with(input, output, &policy)?
    };

    let output_bytes = fs::metadata(output)?.len();
    Ok(SweepReport {
        stats,
        input_bytes,
        output_bytes,
    })
}
