//! Column layout and text fitting
//!
//! Geometry for the 320x240 board: five fixed-width columns that tile the
//! canvas exactly, a header band, and as many data rows as fit below it.
//! `fit_text` is the single truncation policy used for every label and
//! cell.

use heapless::String;

use crate::surface::DisplaySurface;

/// Canvas width in pixels
pub const CANVAS_W: u16 = 320;

/// Canvas height in pixels
pub const CANVAS_H: u16 = 240;

/// Header band height
pub const HEADER_H: u16 = 22;

/// Data row height
pub const ROW_H: u16 = 18;

/// Top margin above the header
pub const MARGIN_Y: u16 = 4;

/// Margin kept clear at the bottom of the canvas
pub const BOTTOM_MARGIN: u16 = 2;

/// Text scale used for all labels and cells
pub const TEXT_SCALE: u8 = 1;

/// Glyph height in pixels at scale 1
pub const GLYPH_H: u16 = 8;

/// Per-glyph width estimate when the surface has no metrics
pub const FALLBACK_GLYPH_W: u16 = 6;

/// Padding around highlighted (reversed) text
pub const HIGHLIGHT_MARGIN: u16 = 2;

/// Horizontal padding inside a cell
pub const CELL_PAD: u16 = 2;

/// Truncation marker: a single dot, to give up as little width as possible
pub const ELLIPSIS: &str = ".";

/// Longest string `fit_text` can return
pub const MAX_FIT_LEN: usize = 64;

/// Static column metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Column {
    /// Header label
    pub label: &'static str,
    /// Column width in pixels
    pub width: u16,
    /// Draw text highlighted (inverted color pair)
    pub reversed: bool,
}

/// The five board columns: time, train, via, destination, track
pub const COLUMNS: [Column; 5] = [
    Column { label: "Zeit", width: 35, reversed: false },
    Column { label: "", width: 55, reversed: true },
    Column { label: "\u{dc}ber", width: 105, reversed: false },
    Column { label: "Ziel", width: 95, reversed: false },
    Column { label: "Gleis", width: 35, reversed: false },
];

const fn column_width_sum(cols: &[Column]) -> u16 {
    let mut sum = 0;
    let mut i = 0;
    while i < cols.len() {
        sum += cols[i].width;
        i += 1;
    }
    sum
}

// Column widths must tile the canvas exactly; catch a bad edit at compile
// time rather than as a visual glitch
const _: () = assert!(column_width_sum(&COLUMNS) == CANVAS_W);

/// Number of data rows that fit below `top`
pub const fn rows_that_fit(top: u16) -> usize {
    (CANVAS_H.saturating_sub(top).saturating_sub(BOTTOM_MARGIN) / ROW_H) as usize
}

/// First `n` characters of `s`, on a valid boundary
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

fn copy_into(s: &str) -> String<MAX_FIT_LEN> {
    let mut out = String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Fit `s` into `max_px` pixels, truncating with [`ELLIPSIS`] if needed
///
/// With glyph metrics, the longest prefix whose measured width fits the
/// budget minus the marker is found by binary search. Without metrics, a
/// fixed [`FALLBACK_GLYPH_W`] estimate truncates by character count; the
/// marker is appended only when at least one character survives the
/// reservation, otherwise the cut is returned bare. The result's measured
/// width never exceeds `max_px`.
pub fn fit_text<S: DisplaySurface + ?Sized>(
    surface: &S,
    s: &str,
    max_px: u16,
    scale: u8,
) -> String<MAX_FIT_LEN> {
    let scale_px = FALLBACK_GLYPH_W * scale.max(1) as u16;
    let estimate = |t: &str| (t.chars().count() as u16).saturating_mul(scale_px);

    match surface.measure_text(s, scale) {
        Some(w) if w <= max_px => copy_into(s),
        Some(_) => {
            let ell_w = surface.measure_text(ELLIPSIS, scale).unwrap_or_else(|| estimate(ELLIPSIS));
            if ell_w > max_px {
                // Not even the marker fits
                return String::new();
            }
            let budget = max_px - ell_w;

            // Binary search the longest prefix that fits the remaining budget
            let total = s.chars().count();
            let mut lo = 0;
            let mut hi = total;
            while lo < hi {
                let mid = (lo + hi + 1) / 2;
                let prefix = char_prefix(s, mid);
                let w = surface.measure_text(prefix, scale).unwrap_or_else(|| estimate(prefix));
                if w <= budget {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }

            let mut out = copy_into(char_prefix(s, lo));
            let _ = out.push_str(ELLIPSIS);
            out
        }
        None => {
            let max_chars = (max_px / scale_px) as usize;
            let total = s.chars().count();
            if total <= max_chars {
                return copy_into(s);
            }

            let ell_len = ELLIPSIS.chars().count();
            if max_chars <= ell_len {
                // No room for the marker: hard character cut
                return copy_into(char_prefix(s, max_chars));
            }

            let mut out = copy_into(char_prefix(s, max_chars - ell_len));
            let _ = out.push_str(ELLIPSIS);
            out
        }
    }
}
