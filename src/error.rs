//! Error types for configuration, sampling, and publishing.

use std::error::Error as StdError;

use nix::errno::Errno;
use thiserror::Error;

/// Fatal startup errors. Any of these stops the process with a nonzero status.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing metric name")]
    MissingName,
    #[error("missing metric namespace")]
    MissingNamespace,
    #[error("missing metric region")]
    MissingRegion,
    #[error("no filesystems provided")]
    NoFilesystems,
    #[error("no instance id provided")]
    MissingInstanceId,
    #[error("unable to create metrics client: {0}")]
    Client(String),
}

/// The filesystem statistics query failed for one path.
#[derive(Debug, Error)]
#[error("statfs {path}: {source}")]
pub struct FilesystemQueryError {
    pub path: String,
    #[source]
    pub source: Errno,
}

/// The remote service rejected or never received a datapoint.
#[derive(Debug, Error)]
#[error("put metric data: {source}")]
pub struct MetricPublishError {
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl MetricPublishError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self { source: err.into() }
    }
}

/// Per-filesystem failure returned by [`crate::metric::Metric::publish`].
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Query(#[from] FilesystemQueryError),
    #[error(transparent)]
    Publish(#[from] MetricPublishError),
}
