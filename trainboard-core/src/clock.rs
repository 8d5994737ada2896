//! Virtual minute-of-day clock
//!
//! The board runs on a simulated clock: an integer count of minutes since
//! a reference midnight, wrapping at 1440. The firmware ticker only measures
//! elapsed time; all minute arithmetic lives here.

use heapless::String;

/// Minutes in one day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Format a minute-of-day as zero-padded `HH:MM`
///
/// The input is reduced modulo 1440 first, so absolute minute counts past
/// midnight format correctly.
pub fn format_hhmm(minute: u32) -> String<8> {
    use core::fmt::Write;

    let m = (minute % MINUTES_PER_DAY as u32) as u16;
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", m / 60, m % 60);
    out
}

/// Virtual clock mapping elapsed time to a wrapping minute-of-day
///
/// The configured start minute is where the simulated day begins at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VirtualClock {
    start_minute: u16,
}

impl VirtualClock {
    /// Create a clock starting at the given minute-of-day
    pub const fn new(start_minute: u16) -> Self {
        Self {
            start_minute: start_minute % MINUTES_PER_DAY,
        }
    }

    /// Minute-of-day after `elapsed_min` simulated minutes have passed
    pub fn minute_at(&self, elapsed_min: u32) -> u16 {
        ((self.start_minute as u32 + elapsed_min) % MINUTES_PER_DAY as u32) as u16
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(0)
    }
}
