//! Departure generation
//!
//! A k-way merge over periodic route streams. Each route gets a cursor
//! holding its next absolute departure minute; the merge repeatedly emits
//! the route with the smallest cursor and advances it by one period.
//! Cursors are absolute minutes that may exceed 1440, so ordering across
//! midnight needs no special casing; the value is reduced modulo 1440 only
//! when the emitted time is formatted.

use heapless::{String, Vec};

use crate::clock::{format_hhmm, MINUTES_PER_DAY};
use crate::config::{Route, MAX_DEST_LEN, MAX_ROUTES, MAX_TRACK_LEN, MAX_TRAIN_LEN, MAX_VIA_LEN};

/// Maximum departures per generated window
pub const MAX_DEPARTURES: usize = 16;

/// One emitted, time-stamped instance of a route
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Departure {
    /// Time of day, zero-padded `HH:MM`
    pub time: String<8>,
    /// Train identifier, copied from the route
    pub train: String<MAX_TRAIN_LEN>,
    /// Via stations, copied from the route
    pub via: String<MAX_VIA_LEN>,
    /// Destination, copied from the route
    pub dest: String<MAX_DEST_LEN>,
    /// Track label, copied from the route
    pub track: String<MAX_TRACK_LEN>,
}

/// Per-route merge state, owned by one `generate` call
struct Cursor {
    /// Next absolute departure minute (may exceed 1440)
    next_min: u32,
    /// Position of the route in the input table
    route_index: usize,
    /// Minutes between departures
    period: u32,
}

/// Generate the next `limit` departures at or after `start_minute`
///
/// `start_minute` is interpreted modulo 1440. Routes with a zero period are
/// skipped (normalized tables never contain one, but raw tables may). The
/// result holds `min(limit, MAX_DEPARTURES)` entries, fewer only when no
/// route is schedulable, and is non-decreasing in departure minute.
pub fn generate(routes: &[Route], start_minute: u16, limit: usize) -> Vec<Departure, MAX_DEPARTURES> {
    let start = (start_minute % MINUTES_PER_DAY) as u32;

    let mut cursors: Vec<Cursor, MAX_ROUTES> = Vec::new();
    for (idx, route) in routes.iter().enumerate().take(MAX_ROUTES) {
        let period = route.period_min as u32;
        if period == 0 {
            continue;
        }
        let offset = (route.offset_min as u32) % period;
        // First multiple of the period at/after start, shifted by the offset
        let mut base = (start.saturating_sub(offset) / period) * period + offset;
        if base < start {
            base += period;
        }
        let _ = cursors.push(Cursor {
            next_min: base,
            route_index: idx,
            period,
        });
    }

    let mut out = Vec::new();
    if cursors.is_empty() {
        return out;
    }

    let limit = limit.min(MAX_DEPARTURES);
    while out.len() < limit {
        // Smallest cursor wins; ties go to the earliest table position,
        // which the strict comparison preserves
        let mut min_i = 0;
        for i in 1..cursors.len() {
            if cursors[i].next_min < cursors[min_i].next_min {
                min_i = i;
            }
        }

        let dep_min = cursors[min_i].next_min;
        let route = &routes[cursors[min_i].route_index];
        let _ = out.push(Departure {
            time: format_hhmm(dep_min),
            train: route.train.clone(),
            via: route.via.clone(),
            dest: route.dest.clone(),
            track: route.track.clone(),
        });

        cursors[min_i].next_min = dep_min + cursors[min_i].period;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::time_key;

    fn route(train: &str, period: i32, offset: i32) -> Route {
        Route::new(train, "via", "dest", "1", period, offset)
    }

    fn minutes(departures: &Vec<Departure, MAX_DEPARTURES>) -> std::vec::Vec<u16> {
        departures.iter().map(|d| time_key(d.time.as_str())).collect()
    }

    #[test]
    fn test_merge_two_routes() {
        // Hourly at :10 merged with every 20 min; the 44-minute offset
        // reduces to 4 within the 20-minute period
        let routes = [route("A", 60, 10), route("B", 20, 44)];
        let deps = generate(&routes, 0, 4);

        assert_eq!(minutes(&deps), [4, 10, 24, 44]);
        assert_eq!(deps[0].train.as_str(), "B");
        assert_eq!(deps[1].train.as_str(), "A");
        assert_eq!(deps[3].time.as_str(), "00:44");
    }

    #[test]
    fn test_merge_resumes_mid_stream() {
        let routes = [route("A", 60, 10), route("B", 20, 44)];
        let deps = generate(&routes, 30, 4);
        assert_eq!(minutes(&deps), [44, 64, 70, 84]);
    }

    #[test]
    fn test_limit_zero_is_empty() {
        let routes = [route("A", 60, 10)];
        assert!(generate(&routes, 0, 0).is_empty());
    }

    #[test]
    fn test_empty_table_is_empty() {
        assert!(generate(&[], 0, 10).is_empty());
    }

    #[test]
    fn test_single_route_phase_alignment() {
        let routes = [route("A", 45, 10)];

        // Asking exactly at the offset yields the offset itself
        let deps = generate(&routes, 10, 1);
        assert_eq!(deps[0].time.as_str(), "00:10");

        // One minute later the next tick is a full period on
        let deps = generate(&routes, 11, 1);
        assert_eq!(deps[0].time.as_str(), "00:55");
    }

    #[test]
    fn test_single_route_tick_sequence() {
        let routes = [route("A", 180, 55)];
        let deps = generate(&routes, 0, 5);
        assert_eq!(minutes(&deps), [55, 235, 415, 595, 775]);
    }

    #[test]
    fn test_tie_break_lowest_index_first() {
        // Both routes first depart at minute 44
        let routes = [route("S 6", 20, 44), route("S 19", 20, 44)];
        for _ in 0..4 {
            let deps = generate(&routes, 0, 2);
            assert_eq!(deps[0].train.as_str(), "S 6");
            assert_eq!(deps[1].train.as_str(), "S 19");
        }
    }

    #[test]
    fn test_wraps_past_midnight() {
        let routes = [route("A", 60, 50)];
        let deps = generate(&routes, 23 * 60 + 55, 3);
        assert_eq!(
            deps.iter().map(|d| d.time.as_str()).collect::<std::vec::Vec<_>>(),
            ["00:50", "01:50", "02:50"]
        );
    }

    #[test]
    fn test_start_minute_reduced_modulo_day() {
        let routes = [route("A", 60, 10), route("B", 20, 44)];
        let a = generate(&routes, 30, 4);
        let b = generate(&routes, 1440 + 30, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_capped_at_max() {
        let routes = [route("A", 5, 0)];
        let deps = generate(&routes, 0, 1000);
        assert_eq!(deps.len(), MAX_DEPARTURES);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_routes() -> impl Strategy<Value = std::vec::Vec<(i32, i32)>> {
            proptest::collection::vec((1i32..=300, 0i32..=300), 1..8)
        }

        /// Brute-force oracle: materialize every departure minute per route
        /// over a long horizon, sort by (minute, route index), take `limit`.
        fn oracle(routes: &[Route], start: u16, limit: usize) -> std::vec::Vec<(u32, usize)> {
            let start = start as u32 % 1440;
            let horizon = start + 8 * 1440;
            let mut all = std::vec::Vec::new();
            for (idx, r) in routes.iter().enumerate() {
                let period = r.period_min as u32;
                let mut t = (r.offset_min as u32) % period;
                while t < horizon {
                    if t >= start {
                        all.push((t, idx));
                    }
                    t += period;
                }
            }
            all.sort();
            all.truncate(limit);
            all
        }

        proptest! {
            #[test]
            fn matches_brute_force_oracle(
                specs in arb_routes(),
                start in 0u16..1440,
                limit in 0usize..=MAX_DEPARTURES,
            ) {
                let routes: std::vec::Vec<Route> = specs
                    .iter()
                    .map(|&(p, o)| route("X", p, o))
                    .collect();
                let deps = generate(&routes, start, limit);
                let expected = oracle(&routes, start, limit);

                prop_assert_eq!(deps.len(), expected.len());
                for (d, &(minute, _)) in deps.iter().zip(expected.iter()) {
                    let expected_time = format_hhmm(minute);
                    prop_assert_eq!(d.time.as_str(), expected_time.as_str());
                }

                // Emitted minutes are non-decreasing in absolute time
                for pair in expected.windows(2) {
                    prop_assert!(pair[0].0 <= pair[1].0);
                }
            }

            #[test]
            fn tie_break_is_reproducible(
                period in 1i32..=120,
                offset in 0i32..=120,
                start in 0u16..1440,
            ) {
                let routes = [route("first", period, offset), route("second", period, offset)];
                let a = generate(&routes, start, 6);
                let b = generate(&routes, start, 6);
                prop_assert_eq!(a.clone(), b);
                // Equal cursors must always emit the lower-index route first
                for pair in a.chunks(2) {
                    prop_assert_eq!(pair[0].train.as_str(), "first");
                    prop_assert_eq!(pair[1].train.as_str(), "second");
                }
            }
        }
    }
}
