//! Receipt intake and reward-points scoring.
//!
//! Submitted receipts are parsed into typed values, scored once under a fixed rule set, and
//! held in memory so their points can be looked up by identifier.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
