//! The `AvailableStorage` metric and the sinks it can be published to.
//!
//! A [`Metric`] is created once at startup and reused for every publish. Each
//! call to [`Metric::publish`] samples one filesystem and submits exactly one
//! datapoint to its [`MetricSink`].

use std::future::Future;

use serde::Serialize;

use crate::{
    collector::{self, StorageSample},
    error::{ConfigError, MetricPublishError, PublishError},
};

pub mod cloudwatch;
pub mod stdout;

pub use cloudwatch::CloudWatchSink;
pub use stdout::StdoutSink;

/// Name of the published metric.
pub const METRIC_NAME: &str = "AvailableStorage";

/// Unit of every datapoint.
pub const UNIT_BYTES: &str = "Bytes";

/// The identity of a datapoint: which host and which filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub filesystem: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// One observation ready to be submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datapoint {
    pub namespace: String,
    pub metric_name: String,
    pub unit: &'static str,
    pub value: f64,
    /// Sample time in seconds since the epoch.
    pub timestamp: u64,
    pub dimensions: Vec<Dimension>,
}

impl Datapoint {
    fn new(name: &str, namespace: &str, identifier: &Identifier, available: u64) -> Self {
        Self {
            namespace: namespace.to_string(),
            metric_name: name.to_string(),
            unit: UNIT_BYTES,
            value: available as f64,
            timestamp: collector::get_timestamp(),
            dimensions: vec![
                Dimension {
                    name: "InstanceId".to_string(),
                    value: identifier.instance_id.clone(),
                },
                Dimension {
                    name: "Filesystem".to_string(),
                    value: identifier.filesystem.clone(),
                },
            ],
        }
    }

    /// Looks up a dimension value by name.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}

/// Destination for datapoints.
///
/// Implementations submit the datapoint in a single call and do not buffer
/// or retry; a failed datapoint is dropped.
pub trait MetricSink {
    fn put_metric_data(
        &self,
        datapoint: &Datapoint,
    ) -> impl Future<Output = Result<(), MetricPublishError>> + Send;
}

/// A named metric bound to a namespace, a region and a sink.
#[derive(Debug)]
pub struct Metric<S> {
    sink: S,
    name: String,
    namespace: String,
    region: String,
}

impl<S: MetricSink> Metric<S> {
    /// Creates a metric. Name, namespace and region must be non-empty.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        region: impl Into<String>,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let (name, namespace, region) = (name.into(), namespace.into(), region.into());
        if name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        if namespace.is_empty() {
            return Err(ConfigError::MissingNamespace);
        }
        if region.is_empty() {
            return Err(ConfigError::MissingRegion);
        }

        Ok(Self {
            sink,
            name,
            namespace,
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Samples `identifier.filesystem` and publishes its available bytes.
    ///
    /// Returns the value that was submitted.
    pub async fn publish(&self, identifier: &Identifier) -> Result<u64, PublishError> {
        self.publish_sample(identifier)
            .await
            .map(|sample| sample.available)
    }

    /// Like [`Metric::publish`], but returns the whole sample.
    pub async fn publish_sample(
        &self,
        identifier: &Identifier,
    ) -> Result<StorageSample, PublishError> {
        let sample = collector::statfs(&identifier.filesystem)?;

        let datapoint = Datapoint::new(&self.name, &self.namespace, identifier, sample.available);
        self.sink.put_metric_data(&datapoint).await?;

        Ok(sample)
    }
}
