//! External recompression through Ghostscript.

pub mod ghostscript;
pub mod quality;

pub use ghostscript::Ghostscript;
pub use quality::Quality;
