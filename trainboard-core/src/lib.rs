//! Board-agnostic core logic for the Trainboard departure board
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Route table type definitions and normalization
//! - Departure scheduler (k-way merge of periodic routes)
//! - Virtual minute-of-day clock helpers

#![no_std]
#![deny(unsafe_code)]

// Host tests run with the standard library available
#[cfg(test)]
extern crate std;

pub mod clock;
pub mod config;
pub mod schedule;
