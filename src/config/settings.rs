use std::time::Duration;

use crate::cli::Args;
use crate::compress::Quality;

use super::defaults::*;

/// Runtime settings for one sweep run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Pages with no text and no XObjects are dropped when their trimmed
    /// content stream is smaller than this many bytes.
    pub blank_threshold: usize,

    /// Recompress through Ghostscript after cleaning.
    pub compress: bool,

    /// Ghostscript quality preset.
    pub quality: Quality,

    /// Hard wall-clock limit on the Ghostscript subprocess.
    pub tool_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blank_threshold: DEFAULT_BLANK_STREAM_THRESHOLD,
            compress: false,
            quality: Quality::default(),
            tool_timeout: DEFAULT_GHOSTSCRIPT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            blank_threshold: args.blank_threshold,
            compress: args.compress,
            quality: args.quality,
            ..Default::default()
        }
    }
}
