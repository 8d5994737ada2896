//! Departure scheduler
//!
//! Expands the route table into a bounded, time-ordered window of upcoming
//! departures, and reorders already-materialized lists around a threshold
//! minute.

pub mod generator;
pub mod reorder;

pub use generator::{generate, Departure, MAX_DEPARTURES};
pub use reorder::{rotate_from, time_key, END_OF_DAY_KEY};
