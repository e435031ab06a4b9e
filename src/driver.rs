//! Driver loop: one pass over the configured filesystems, either once or on a
//! fixed interval until cancelled.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::metric::{Identifier, Metric, MetricSink};

/// Time between passes in persistent mode.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One pass, then return.
    OneShot,
    /// One pass per tick until cancelled.
    Persistent,
}

/// Outcome of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub published: usize,
    pub failed: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passes: usize,
    pub published: usize,
    pub failed: usize,
}

impl RunSummary {
    fn add(&mut self, pass: PassSummary) {
        self.passes += 1;
        self.published += pass.published;
        self.failed += pass.failed;
    }
}

pub struct Driver<S> {
    metric: Metric<S>,
    filesystems: Vec<String>,
    instance_id: String,
    mode: Mode,
    interval: Duration,
}

impl<S: MetricSink> Driver<S> {
    pub fn new(metric: Metric<S>, filesystems: Vec<String>, instance_id: String, mode: Mode) -> Self {
        Self {
            metric,
            filesystems,
            instance_id,
            mode,
            interval: TICK_INTERVAL,
        }
    }

    /// Overrides [`TICK_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn metric(&self) -> &Metric<S> {
        &self.metric
    }

    /// Runs according to the configured mode.
    ///
    /// In persistent mode the first pass happens one interval after start.
    /// A pass that is running when `shutdown` fires is allowed to finish.
    /// Per-filesystem failures never end the run.
    pub async fn run(&self, shutdown: CancellationToken) -> RunSummary {
        let mut summary = RunSummary::default();

        if self.mode == Mode::OneShot {
            summary.add(self.publish_pass().await);
            return summary;
        }

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        // Late ticks are coalesced; passes never overlap.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!(passes = summary.passes, "shutdown requested, stopping");
                    break;
                }
                _ = ticker.tick() => {}
            }

            summary.add(self.publish_pass().await);
        }

        summary
    }

    /// Samples and publishes every configured filesystem in order.
    pub async fn publish_pass(&self) -> PassSummary {
        let mut pass = PassSummary::default();

        for fs in &self.filesystems {
            let identifier = Identifier {
                filesystem: fs.clone(),
                instance_id: self.instance_id.clone(),
            };

            match self.metric.publish_sample(&identifier).await {
                Ok(sample) => {
                    debug!(
                        filesystem = %identifier.filesystem,
                        instance_id = %identifier.instance_id,
                        value = sample.available,
                        total = sample.total,
                        used = sample.used,
                        "published datapoint"
                    );
                    pass.published += 1;
                }
                Err(err) => {
                    error!(
                        filesystem = %identifier.filesystem,
                        instance_id = %identifier.instance_id,
                        error = %err,
                        "failed to publish datapoint"
                    );
                    pass.failed += 1;
                }
            }
        }

        pass
    }
}
