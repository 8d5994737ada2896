//! Virtual clock task
//!
//! Tracks the board's minute of day from uptime and signals the render
//! task when the minute rolls over. The day starts at 00:00 on boot.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use trainboard_core::clock::VirtualClock;

use crate::channels::MINUTE;

/// Poll interval; well under a minute so rollovers are not missed by much
const POLL_INTERVAL_MS: u64 = 2_000;

#[embassy_executor::task]
pub async fn clock_task() {
    info!("Clock task started");

    let clock = VirtualClock::new(0);
    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut last_minute = None;

    loop {
        ticker.next().await;

        let elapsed_min = (start.elapsed().as_secs() / 60) as u32;
        let minute = clock.minute_at(elapsed_min);
        if last_minute != Some(minute) {
            last_minute = Some(minute);
            MINUTE.signal(minute);
        }
    }
}
