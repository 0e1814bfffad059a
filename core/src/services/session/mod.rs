//! Session maintenance
//!
//! Expired session records are also rejected at refresh time, so sweeping is
//! storage hygiene only.

mod sweeper;

pub use sweeper::{SessionSweeper, SweepResult, SweeperConfig};
