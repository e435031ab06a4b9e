//! Samples available disk space for a set of mount points and publishes each
//! sample as an `AvailableStorage` datapoint, dimensioned by instance and
//! filesystem.

pub mod collector;
pub mod config;
pub mod driver;
pub mod error;
pub mod metric;
pub mod telemetry;
