use std::time::Duration;

/// Minimum trimmed content-stream size, in bytes, for a page with no text
/// and no XObjects to count as real content. A handful of boilerplate
/// operators (e.g. a bare `q Q` pair) fits under this; tuned empirically.
pub const DEFAULT_BLANK_STREAM_THRESHOLD: usize = 30;

/// Wall-clock limit for one Ghostscript run.
pub const DEFAULT_GHOSTSCRIPT_TIMEOUT: Duration = Duration::from_secs(90);
