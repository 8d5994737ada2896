//! Display surface trait
//!
//! Defines the pixel-level interface the board renderer draws against.

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Board background: the classic blue
pub const BOARD_BG: Rgb = Rgb::new(30, 30, 255);

/// Board foreground: white
pub const BOARD_FG: Rgb = Rgb::new(255, 255, 255);

/// Display surface trait
///
/// Provides a hardware-agnostic interface for the renderer. Colors are
/// explicit parameters on every call; implementations hold no current-pen
/// or current-font state. All calls are infallible at this seam - panel
/// communication errors stay inside the driver.
pub trait DisplaySurface {
    /// Canvas dimensions in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Fill the whole canvas with one color
    fn clear(&mut self, color: Rgb);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);

    /// Draw a one-pixel horizontal line from `x0` to `x1` inclusive
    fn hline(&mut self, x0: u16, x1: u16, y: u16, color: Rgb);

    /// Draw text with its top-left corner at (x, y)
    fn text(&mut self, s: &str, x: u16, y: u16, scale: u8, color: Rgb);

    /// Measure the drawn pixel width of `s`, if the surface knows its glyphs
    ///
    /// Returns `None` when no glyph metrics are available; callers fall
    /// back to a fixed per-glyph estimate.
    fn measure_text(&self, s: &str, scale: u8) -> Option<u16>;

    /// Push the finished frame to the panel
    fn present(&mut self);
}
