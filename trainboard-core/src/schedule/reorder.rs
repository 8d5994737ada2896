//! Reordering of materialized departure lists
//!
//! Used when a finite list of departures (an edited preview, a cached
//! window) must be shown relative to "now": entries at or after a threshold
//! minute come first, earlier ones wrap to the end.

use heapless::Vec;

use super::Departure;
use crate::clock::MINUTES_PER_DAY;

/// Sort key assigned to malformed time fields (end of day)
pub const END_OF_DAY_KEY: u16 = MINUTES_PER_DAY - 1;

/// Parse a `HH:MM` field into a minute-of-day sort key
///
/// Malformed or out-of-range fields order as [`END_OF_DAY_KEY`] instead of
/// erroring, pushing them to the bottom of a sorted table.
pub fn time_key(time: &str) -> u16 {
    let mut parts = time.split(':');
    let (Some(hh), Some(mm), None) = (parts.next(), parts.next(), parts.next()) else {
        return END_OF_DAY_KEY;
    };
    match (hh.parse::<u16>(), mm.parse::<u16>()) {
        (Ok(h), Ok(m)) if h < 24 && m < 60 => h * 60 + m,
        _ => END_OF_DAY_KEY,
    }
}

/// Reorder so departures at/after `threshold_minute` come first
///
/// The list is sorted ascending by minute (entries with equal minutes keep
/// their relative order), then split at the threshold and the earlier part
/// wrapped to the end.
pub fn rotate_from<const N: usize>(
    events: &Vec<Departure, N>,
    threshold_minute: u16,
) -> Vec<Departure, N> {
    // Sort positions by (minute, original index); the index makes the
    // unstable slice sort order-preserving for equal minutes
    let mut order: Vec<(u16, usize), N> = Vec::new();
    for (i, e) in events.iter().enumerate() {
        let _ = order.push((time_key(e.time.as_str()), i));
    }
    order.sort_unstable();

    let mut out = Vec::new();
    for &(_, i) in order.iter().filter(|&&(key, _)| key >= threshold_minute) {
        let _ = out.push(events[i].clone());
    }
    for &(_, i) in order.iter().filter(|&&(key, _)| key < threshold_minute) {
        let _ = out.push(events[i].clone());
    }
    out
}
