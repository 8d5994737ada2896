//! Route table type definitions
//!
//! A route is a periodic departure template; the scheduler expands routes
//! into concrete departures. Tables are replaced wholesale by the editor,
//! never mutated in place, so readers always see a complete snapshot.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum routes per table
pub const MAX_ROUTES: usize = 16;

/// Maximum train identifier length
pub const MAX_TRAIN_LEN: usize = 24;

/// Maximum via-stations text length
pub const MAX_VIA_LEN: usize = 64;

/// Maximum destination length
pub const MAX_DEST_LEN: usize = 32;

/// Maximum track label length
pub const MAX_TRACK_LEN: usize = 8;

/// Period used when the configured value is missing or non-positive
pub const DEFAULT_PERIOD_MIN: u16 = 60;

/// An ordered route table, replaced atomically as a whole
pub type RouteTable = Vec<Route, MAX_ROUTES>;

/// A periodic departure template
///
/// `period_min` is the number of minutes between departures, `offset_min`
/// the minute-of-period of the first departure after midnight. Both are
/// normalized on construction: see [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Train identifier ("ICE 511")
    pub train: String<MAX_TRAIN_LEN>,
    /// Via stations, free text
    pub via: String<MAX_VIA_LEN>,
    /// Destination station
    pub dest: String<MAX_DEST_LEN>,
    /// Track/platform label
    pub track: String<MAX_TRACK_LEN>,
    /// Minutes between departures, always positive
    pub period_min: u16,
    /// Phase offset in minutes, always in `[0, period_min)`
    pub offset_min: u16,
}

impl Route {
    /// Create a normalized route
    ///
    /// Non-positive periods are coerced to [`DEFAULT_PERIOD_MIN`]; the
    /// offset is reduced into `[0, period)`. Strings longer than their
    /// field capacity are truncated.
    pub fn new(train: &str, via: &str, dest: &str, track: &str, period_min: i32, offset_min: i32) -> Self {
        let period = if period_min > 0 {
            period_min.min(u16::MAX as i32) as u16
        } else {
            DEFAULT_PERIOD_MIN
        };
        let offset = offset_min.rem_euclid(period as i32) as u16;

        Self {
            train: clamped(train),
            via: clamped(via),
            dest: clamped(dest),
            track: clamped(track),
            period_min: period,
            offset_min: offset,
        }
    }

    /// Create a route from raw editor fields
    ///
    /// Numeric fields that fail to parse default rather than error:
    /// period to [`DEFAULT_PERIOD_MIN`], offset to 0.
    pub fn from_fields(train: &str, via: &str, dest: &str, track: &str, period: &str, offset: &str) -> Self {
        let period_min = parse_minutes(period).unwrap_or(DEFAULT_PERIOD_MIN as i32);
        let offset_min = parse_minutes(offset).unwrap_or(0);
        Self::new(train, via, dest, track, period_min, offset_min)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new("", "", "", "", DEFAULT_PERIOD_MIN as i32, 0)
    }
}

/// Parse a decimal minute field, with optional leading sign
///
/// Returns `None` for empty or non-numeric input.
pub fn parse_minutes(s: &str) -> Option<i32> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<i32>().ok()
}

/// Copy a string into a bounded field, truncating at the capacity
///
/// Truncation happens on a character boundary so multi-byte input
/// (umlauts in station names) stays valid UTF-8.
fn clamped<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// The route table the board ships with
///
/// Cologne-area departures; periods and offsets chosen so the board always
/// shows a believable mix of long-distance and local traffic.
pub fn default_routes() -> RouteTable {
    let mut table = Vec::new();
    let routes = [
        ("ICE 511", "Frankfurt(Main)Flugh., Mannheim", "Stuttgart Hbf", "7", 120, 10),
        ("RE 10123", "Leverkusen Mitte, D\u{fc}sseldorf", "Duisburg Hbf", "10", 60, 22),
        ("ICE 705", "Dortmund, Hannover", "Berlin Hbf", "6", 180, 35),
        ("S 19", "K\u{f6}ln/Bonn Flughafen, Troisdorf", "Hennef (Sieg)", "11", 20, 44),
        ("ICE 923", "Frankfurt(Main) Hbf, W\u{fc}rzburg", "M\u{fc}nchen Hbf", "8", 180, 55),
        ("IC 2021", "Bonn, Koblenz", "Mainz Hbf", "9", 120, 5),
        ("RE 10542", "Horrem, Aachen", "Aachen Hbf", "4", 60, 18),
        ("ICE 1531", "D\u{fc}sseldorf, Essen", "Hamburg-Altona", "6", 180, 30),
        ("S 6", "K\u{f6}ln-M\u{fc}lheim, Leverkusen", "Essen Hbf", "10", 20, 44),
        ("ICE 122", "Frankfurt(Main)Flugh., Mannheim", "Basel SBB", "7", 180, 55),
    ];
    for (train, via, dest, track, period, offset) in routes {
        let _ = table.push(Route::new(train, via, dest, track, period, offset));
    }
    table
}
