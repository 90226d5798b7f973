//! Contract recommendation engine for front-office decisions.
//!
//! The [`advisory`] module owns the decision table, the cohort comparator, and the service and
//! router that expose them. [`roster`] imports already-scored player snapshots from CSV exports.

pub mod advisory;
pub mod config;
pub mod error;
pub mod roster;
pub mod telemetry;
