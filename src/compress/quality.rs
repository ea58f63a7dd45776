use clap::ValueEnum;

/// Ghostscript downsampling preset, most aggressive first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Quality {
    /// 72 dpi images, smallest output
    Screen,
    /// 150 dpi, good for on-screen reading
    #[default]
    Ebook,
    /// 300 dpi print quality
    Printer,
    /// Highest fidelity, color preserving
    Prepress,
}

impl Quality {
    /// The `-dPDFSETTINGS` value Ghostscript expects.
    pub fn gs_setting(&self) -> &'static str {
        match self {
            Quality::Screen => "/screen",
            Quality::Ebook => "/ebook",
            Quality::Printer => "/printer",
            Quality::Prepress => "/prepress",
        }
    }
}
