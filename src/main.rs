// src/main.rs
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use diskusage::{
    config::{Cli, Config},
    driver::{Driver, Mode},
    metric::{CloudWatchSink, METRIC_NAME, Metric, MetricSink, StdoutSink},
    telemetry,
};
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    let cfg = match Config::from_cli(Cli::parse()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let span = info_span!(
        "diskusage",
        namespace = %format!("cloudwatch-diskusage-{}", cfg.instance_id)
    );

    if cfg.dry_run {
        run(cfg, StdoutSink).instrument(span).await
    } else {
        let sink = match CloudWatchSink::connect(&cfg.region).await {
            Ok(sink) => sink,
            Err(err) => {
                error!(error = %err, "unable to create metrics client");
                return ExitCode::FAILURE;
            }
        };
        run(cfg, sink).instrument(span).await
    }
}

async fn run<S>(cfg: Config, sink: S) -> ExitCode
where
    S: MetricSink + Sync,
{
    let metric = match Metric::new(METRIC_NAME, cfg.namespace, cfg.region, sink) {
        Ok(metric) => metric,
        Err(err) => {
            error!(error = %err, "unable to create metric");
            return ExitCode::FAILURE;
        }
    };

    info!(
        mode = ?cfg.mode,
        filesystems = cfg.filesystems.len(),
        region = metric.region(),
        dry_run = cfg.dry_run,
        "starting"
    );

    let shutdown = CancellationToken::new();
    if cfg.mode == Mode::Persistent {
        if let Err(err) = spawn_signal_handlers(&shutdown) {
            error!(error = %format!("{err:#}"), "unable to install signal handlers");
            return ExitCode::FAILURE;
        }
    }

    let driver = Driver::new(metric, cfg.filesystems, cfg.instance_id, cfg.mode);
    let summary = driver.run(shutdown).await;

    info!(
        passes = summary.passes,
        published = summary.published,
        failed = summary.failed,
        "finished"
    );
    ExitCode::SUCCESS
}

fn spawn_signal_handlers(shutdown: &CancellationToken) -> Result<()> {
    for kind in [SignalKind::terminate(), SignalKind::interrupt()] {
        let mut stream =
            signal(kind).with_context(|| format!("unable to listen for {kind:?}"))?;
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            stream.recv().await;
            debug!("got signal {:?}", kind);
            shutdown.cancel();
        });
    }
    Ok(())
}
