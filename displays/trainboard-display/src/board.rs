//! Board rendering
//!
//! Paints a departure window onto a `DisplaySurface`: header band, data
//! rows, separator rules. Pure function of its inputs - repeated calls
//! with the same arguments issue the same drawing commands.

use trainboard_core::schedule::Departure;

use crate::layout::{
    fit_text, rows_that_fit, CANVAS_W, CELL_PAD, COLUMNS, FALLBACK_GLYPH_W, GLYPH_H, HEADER_H,
    HIGHLIGHT_MARGIN, MARGIN_Y, ROW_H, TEXT_SCALE,
};
use crate::surface::{DisplaySurface, Rgb};

/// Pixel extent of already-fitted text, estimated if the surface has no
/// metrics, clamped to the cell budget
fn text_extent<S: DisplaySurface + ?Sized>(surface: &S, s: &str, avail: u16) -> u16 {
    let w = surface
        .measure_text(s, TEXT_SCALE)
        .unwrap_or_else(|| (s.chars().count() as u16) * FALLBACK_GLYPH_W * TEXT_SCALE as u16);
    w.min(avail)
}

/// Draw one cell: background, fitted text, reversed highlight if flagged
///
/// The highlight rectangle is sized to the fitted text's drawn extent, not
/// the column width, so short labels get a tight badge.
#[allow(clippy::too_many_arguments)]
fn draw_cell<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    text_y: u16,
    content: &str,
    reversed: bool,
    fg: Rgb,
    bg: Rgb,
) {
    surface.fill_rect(x, y, width, height, bg);

    let avail = width.saturating_sub(CELL_PAD + 1);
    let fitted = fit_text(surface, content, avail, TEXT_SCALE);
    let tx = x + CELL_PAD;

    let color = if reversed && !fitted.is_empty() {
        let extent = text_extent(surface, fitted.as_str(), avail);
        surface.fill_rect(
            tx - HIGHLIGHT_MARGIN,
            text_y - HIGHLIGHT_MARGIN,
            extent + 2 * HIGHLIGHT_MARGIN,
            GLYPH_H * TEXT_SCALE as u16 + 2 * HIGHLIGHT_MARGIN,
            fg,
        );
        bg
    } else {
        fg
    };

    surface.text(fitted.as_str(), tx, text_y, TEXT_SCALE, color);
}

/// Render the departure board
///
/// Draws the header band, then `min(rows that fit, events.len())` data
/// rows, and presents the frame exactly once at the end.
pub fn render_board<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    events: &[Departure],
    fg: Rgb,
    bg: Rgb,
) {
    surface.clear(bg);

    // Header band
    let y = MARGIN_Y;
    let mut x = 0;
    for col in COLUMNS.iter() {
        draw_cell(surface, x, y, col.width, HEADER_H, y + 3, col.label, col.reversed, fg, bg);
        x += col.width;
    }
    surface.hline(0, CANVAS_W - 1, y + HEADER_H, fg);

    // Data rows
    let top = MARGIN_Y + HEADER_H + 2;
    let rows = rows_that_fit(top).min(events.len());
    let mut y = top;
    for event in events.iter().take(rows) {
        let cells = [
            event.time.as_str(),
            event.train.as_str(),
            event.via.as_str(),
            event.dest.as_str(),
            event.track.as_str(),
        ];
        // Vertically center the glyph within the row
        let text_y = y + (ROW_H - GLYPH_H * TEXT_SCALE as u16) / 2;

        let mut x = 0;
        for (col, cell) in COLUMNS.iter().zip(cells) {
            draw_cell(surface, x, y, col.width, ROW_H, text_y, cell, col.reversed, fg, bg);
            x += col.width;
        }
        surface.hline(0, CANVAS_W - 1, y + ROW_H - 1, fg);
        y += ROW_H;
    }

    surface.present();
}

/// Render the boot splash shown before the first timetable frame
pub fn render_splash<S: DisplaySurface + ?Sized>(surface: &mut S, fg: Rgb, bg: Rgb) {
    surface.clear(bg);
    surface.text("Trainboard", 4, 4, 1, fg);
    surface.text("Online", 4, 20, 3, fg);
    surface.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DrawOp, RecordingSurface};
    use crate::surface::{BOARD_BG, BOARD_FG};
    use heapless::Vec;
    use trainboard_core::config::Route;
    use trainboard_core::schedule::{generate, Departure, MAX_DEPARTURES};

    fn sample_events(n: usize) -> Vec<Departure, MAX_DEPARTURES> {
        let routes = [
            Route::new("ICE 511", "Frankfurt(Main)Flugh., Mannheim", "Stuttgart Hbf", "7", 120, 10),
            Route::new("S 19", "K\u{f6}ln/Bonn Flughafen", "Hennef (Sieg)", "11", 20, 4),
        ];
        generate(&routes, 0, n)
    }

    #[test]
    fn test_render_is_idempotent() {
        let events = sample_events(8);

        let mut first = RecordingSurface::with_metrics();
        render_board(&mut first, &events, BOARD_FG, BOARD_BG);
        let mut second = RecordingSurface::with_metrics();
        render_board(&mut second, &events, BOARD_FG, BOARD_BG);

        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn test_render_presents_exactly_once_and_last() {
        let events = sample_events(8);
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &events, BOARD_FG, BOARD_BG);

        assert_eq!(surface.count(|op| matches!(op, DrawOp::Present)), 1);
        assert_eq!(surface.ops.last(), Some(&DrawOp::Present));
    }

    #[test]
    fn test_render_clears_before_drawing() {
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &[], BOARD_FG, BOARD_BG);
        assert_eq!(surface.ops.first(), Some(&DrawOp::Clear(BOARD_BG)));
    }

    #[test]
    fn test_row_count_clamped_to_events() {
        // 3 events but room for 11 rows: one underline per drawn row
        let events = sample_events(3);
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &events, BOARD_FG, BOARD_BG);

        let underlines = surface.count(|op| matches!(op, DrawOp::HLine { .. }));
        assert_eq!(underlines, 1 + 3); // header rule + 3 rows
    }

    #[test]
    fn test_row_count_clamped_to_fit() {
        // 16 events but only 11 rows fit on the 240 px canvas
        let events = sample_events(16);
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &events, BOARD_FG, BOARD_BG);

        let underlines = surface.count(|op| matches!(op, DrawOp::HLine { .. }));
        assert_eq!(underlines, 1 + 11);
    }

    #[test]
    fn test_empty_window_draws_header_only() {
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &[], BOARD_FG, BOARD_BG);

        // 5 header cells, no data cells; the reversed column's label is
        // empty so no highlight rect appears either
        let rects = surface.count(|op| matches!(op, DrawOp::FillRect { .. }));
        let texts = surface.count(|op| matches!(op, DrawOp::Text { .. }));
        assert_eq!(texts, 5);
        assert_eq!(rects, 5);
    }

    #[test]
    fn test_reversed_column_highlight_uses_text_extent() {
        let events = sample_events(1);
        let mut surface = RecordingSurface::with_metrics();
        render_board(&mut surface, &events, BOARD_FG, BOARD_BG);

        // Find the foreground highlight rect behind the first row's train
        // cell ("S 19", 4 glyphs = 24 px, padded by the margin on each side)
        let train_x = COLUMNS[0].width + CELL_PAD;
        let found = surface.ops.iter().any(|op| {
            matches!(
                op,
                DrawOp::FillRect { x, w, color, .. }
                    if *color == BOARD_FG
                        && *x == train_x - HIGHLIGHT_MARGIN
                        && *w == 24 + 2 * HIGHLIGHT_MARGIN
            )
        });
        assert!(found, "expected a highlight sized to the drawn text");
    }

    #[test]
    fn test_render_works_without_metrics() {
        let events = sample_events(8);
        let mut surface = RecordingSurface::without_metrics();
        render_board(&mut surface, &events, BOARD_FG, BOARD_BG);

        assert_eq!(surface.count(|op| matches!(op, DrawOp::Present)), 1);
        // Every drawn cell text fits its column's character budget
        for op in surface.ops.iter() {
            if let DrawOp::Text { text, .. } = op {
                assert!(text.chars().count() * 6 <= CANVAS_W as usize);
            }
        }
    }

    #[test]
    fn test_splash() {
        let mut surface = RecordingSurface::with_metrics();
        render_splash(&mut surface, BOARD_FG, BOARD_BG);

        assert_eq!(surface.count(|op| matches!(op, DrawOp::Present)), 1);
        let found = surface
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text.as_str() == "Trainboard"));
        assert!(found);
    }
}
