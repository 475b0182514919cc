//! Weighted multi-criteria decision analysis for regional land-use planning.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
