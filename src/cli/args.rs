use clap::Parser;
use std::path::PathBuf;

use crate::compress::Quality;
use crate::config::defaults::DEFAULT_BLANK_STREAM_THRESHOLD;

#[derive(Parser, Debug)]
#[command(name = "pdf-sweep")]
#[command(
    author,
    version,
    about = "Strip blank pages from PDFs and recompress the rest through Ghostscript"
)]
pub struct Args {
    /// Input PDF file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file path (defaults to input with a .cleaned.pdf extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recompress the cleaned document through Ghostscript
    #[arg(short, long)]
    pub compress: bool,

    /// Compression quality (screen is the most aggressive, prepress the gentlest)
    #[arg(short, long, value_enum, default_value = "ebook")]
    pub quality: Quality,

    /// Content-stream size in bytes below which a text-free, image-free page counts as blank
    #[arg(long, default_value_t = DEFAULT_BLANK_STREAM_THRESHOLD)]
    pub blank_threshold: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get the output path, defaulting to the input with a .cleaned.pdf extension
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("cleaned.pdf"))
    }
}
