//! Feature encoding and risk inference for the heart, diabetes and thyroid screening flows.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
