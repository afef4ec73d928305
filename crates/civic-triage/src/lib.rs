//! Deterministic routing and urgency scoring for civic issue reports.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;
