//! Dry-run sink: prints each datapoint as one JSON line.

use std::io::{self, Write};

use super::{Datapoint, MetricSink};
use crate::error::MetricPublishError;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

/// Function to render a datapoint as a single JSON line.
pub fn to_json_line(datapoint: &Datapoint) -> Result<String, serde_json::Error> {
    serde_json::to_string(datapoint)
}

impl MetricSink for StdoutSink {
    async fn put_metric_data(&self, datapoint: &Datapoint) -> Result<(), MetricPublishError> {
        let line = to_json_line(datapoint).map_err(MetricPublishError::new)?;

        let mut out = io::stdout().lock();
        writeln!(out, "{line}").map_err(MetricPublishError::new)?;
        out.flush().map_err(MetricPublishError::new)
    }
}
