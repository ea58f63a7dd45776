use crate::config::defaults::DEFAULT_BLANK_STREAM_THRESHOLD;

use super::signals::PageSignals;

/// Per-page keep/drop verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClass {
    /// The page carries detectable content and must be kept.
    Content,
    /// No signal found; the page is considered safe to drop.
    ProbablyBlank,
}

/// Decides whether a single page is worth keeping.
///
/// Implementations see one page at a time and keep no state between pages.
/// Document-level safeguards (the never-empty failsafe) live in the
/// rewriter, not here, so policies can be swapped without touching them.
pub trait PageClassifier {
    fn classify(&self, signals: &PageSignals) -> PageClass;
}

/// The default, deliberately conservative policy.
///
/// Signals are checked strongest-first: extractable text, then declared
/// XObjects (a pure scan has no text layer but always an image), then the
/// size of the decoded content stream as a last resort. A page is dropped
/// only when all three come up empty.
#[derive(Debug, Clone)]
pub struct ConservativePolicy {
    /// Pages with no text and no XObjects are dropped when their trimmed
    /// content stream is smaller than this many bytes.
    pub blank_stream_threshold: usize,
}

impl Default for ConservativePolicy {
    fn default() -> Self {
        Self {
            blank_stream_threshold: DEFAULT_BLANK_STREAM_THRESHOLD,
        }
    }
}

impl ConservativePolicy {
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            blank_stream_threshold: threshold,
        }
    }
}

impl PageClassifier for ConservativePolicy {
    fn classify(&self, signals: &PageSignals) -> PageClass {
        if signals.has_text() {
            return PageClass::Content;
        }
        if signals.has_xobjects() {
            return PageClass::Content;
        }
        let stream_len = signals.trimmed_content_len();
        if stream_len == 0 || stream_len < self.blank_stream_threshold {
            return PageClass::ProbablyBlank;
        }
        PageClass::Content
    }
}
