//! CloudWatch `PutMetricData` sink.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudwatch::{
    Client,
    primitives::DateTime,
    types::{Dimension, MetricDatum, StandardUnit},
};
use tracing::debug;

use super::{Datapoint, MetricSink};
use crate::error::{ConfigError, MetricPublishError};

/// Publishes datapoints to CloudWatch in one region.
///
/// Credentials come from the default AWS provider chain. Transport, retry and
/// timeout behaviour are the SDK defaults.
#[derive(Debug, Clone)]
pub struct CloudWatchSink {
    client: Client,
}

impl CloudWatchSink {
    /// Loads AWS configuration for `region` and builds a client.
    pub async fn connect(region: &str) -> Result<Self, ConfigError> {
        debug!(region, "loading AWS configuration");

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self::from_sdk_config(&config)
    }

    /// Builds a client from already loaded configuration. Fails when no
    /// region or no credentials provider was resolved.
    pub fn from_sdk_config(config: &SdkConfig) -> Result<Self, ConfigError> {
        if config.region().is_none() {
            return Err(ConfigError::Client("no region configured".to_string()));
        }
        if config.credentials_provider().is_none() {
            return Err(ConfigError::Client(
                "no credentials provider configured".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(config),
        })
    }
}

fn to_datum(datapoint: &Datapoint) -> Result<MetricDatum, MetricPublishError> {
    let mut builder = MetricDatum::builder()
        .metric_name(&datapoint.metric_name)
        .unit(StandardUnit::Bytes)
        .value(datapoint.value)
        .timestamp(DateTime::from_secs(datapoint.timestamp as i64));

    for dim in &datapoint.dimensions {
        let dimension = Dimension::builder()
            .name(&dim.name)
            .value(&dim.value)
            .build();
        builder = builder.dimensions(dimension);
    }

    Ok(builder.build())
}

impl MetricSink for CloudWatchSink {
    async fn put_metric_data(&self, datapoint: &Datapoint) -> Result<(), MetricPublishError> {
        let datum = to_datum(datapoint)?;

        self.client
            .put_metric_data()
            .namespace(&datapoint.namespace)
            .metric_data(datum)
            .send()
            .await
            .map_err(MetricPublishError::new)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_credentials_provider() {
        let config = SdkConfig::builder()
            .region(Region::new("eu-west-1"))
            .behavior_version(BehaviorVersion::latest())
            .build();

        let err = CloudWatchSink::from_sdk_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Client(_)));
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn test_rejects_missing_region() {
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();

        assert!(matches!(
            CloudWatchSink::from_sdk_config(&config),
            Err(ConfigError::Client(_))
        ));
    }
}
