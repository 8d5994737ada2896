//! Recording mock surface
//!
//! Logs every drawing call so host tests can assert on the exact command
//! sequence a render produced. Glyph metrics are configurable: a fixed
//! per-glyph width, or absent to exercise the no-metrics fallback paths.

use heapless::{String, Vec};

use crate::surface::{DisplaySurface, Rgb};

/// Maximum recorded ops per frame
pub const MAX_OPS: usize = 512;

/// Maximum recorded text length per op
pub const MAX_OP_TEXT: usize = 64;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Rgb),
    FillRect { x: u16, y: u16, w: u16, h: u16, color: Rgb },
    HLine { x0: u16, x1: u16, y: u16, color: Rgb },
    Text { text: String<MAX_OP_TEXT>, x: u16, y: u16, scale: u8, color: Rgb },
    Present,
}

/// A surface that records instead of drawing
pub struct RecordingSurface {
    width: u16,
    height: u16,
    /// Pixel width of one glyph at scale 1, or `None` for no metrics
    glyph_px: Option<u16>,
    pub ops: Vec<DrawOp, MAX_OPS>,
}

impl RecordingSurface {
    /// A 320x240 surface with 6 px monospace glyph metrics
    pub fn with_metrics() -> Self {
        Self {
            width: 320,
            height: 240,
            glyph_px: Some(6),
            ops: Vec::new(),
        }
    }

    /// A 320x240 surface that exposes no glyph metrics
    pub fn without_metrics() -> Self {
        Self {
            width: 320,
            height: 240,
            glyph_px: None,
            ops: Vec::new(),
        }
    }

    fn record(&mut self, op: DrawOp) {
        // Dropping past MAX_OPS would make tests silently weaker
        assert!(self.ops.push(op).is_ok(), "recording overflow");
    }

    /// Number of recorded ops matching a predicate
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl DisplaySurface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.record(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        self.record(DrawOp::FillRect { x, y, w, h, color });
    }

    fn hline(&mut self, x0: u16, x1: u16, y: u16, color: Rgb) {
        self.record(DrawOp::HLine { x0, x1, y, color });
    }

    fn text(&mut self, s: &str, x: u16, y: u16, scale: u8, color: Rgb) {
        let mut text = String::new();
        for ch in s.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        self.record(DrawOp::Text { text, x, y, scale, color });
    }

    fn measure_text(&self, s: &str, scale: u8) -> Option<u16> {
        self.glyph_px
            .map(|px| (s.chars().count() as u16) * px * scale as u16)
    }

    fn present(&mut self) {
        self.record(DrawOp::Present);
    }
}
