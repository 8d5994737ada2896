//! Render task
//!
//! Owns the panel. Repaints the departure board whenever the virtual
//! minute advances or a new route table is installed; each wakeup
//! regenerates the window from the current table and paints one frame.

use defmt::*;
use embassy_futures::select::{select, Either};

use trainboard_core::schedule::generate;
use trainboard_display::{render_board, BOARD_BG, BOARD_FG};

use crate::channels::{snapshot_routes, MINUTE, ROUTES_CHANGED};
use crate::st7789::BoardPanel;

/// Departures generated per frame; the grid shows at most 11 rows, the
/// extras absorb a row count change without regenerating
const WINDOW_LEN: usize = 12;

#[embassy_executor::task]
pub async fn render_task(panel: &'static mut BoardPanel) {
    info!("Render task started");

    let mut minute: u16 = 0;

    loop {
        match select(MINUTE.wait(), ROUTES_CHANGED.wait()).await {
            Either::First(m) => minute = m,
            Either::Second(()) => {}
        }

        let routes = snapshot_routes();
        let window = generate(&routes, minute, WINDOW_LEN);
        debug!("Rendering {} departures at minute {}", window.len(), minute);
        render_board(panel, &window, BOARD_FG, BOARD_BG);
    }
}
