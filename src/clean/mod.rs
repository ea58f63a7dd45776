//! Blank-page detection and removal.

pub mod classifier;
pub mod rewriter;
pub mod signals;

pub use classifier::{ConservativePolicy, PageClass, PageClassifier};
pub use rewriter::{clean_pdf, clean_pdf_with, CleanStats};
pub use signals::PageSignals;
