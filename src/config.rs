//! Process configuration, read once at startup.
//!
//! Every setting comes from an environment variable and can be overridden by
//! the matching long flag. [`Cli`] holds the raw values; [`Config::from_cli`]
//! validates them into the immutable [`Config`] the rest of the crate uses.

use clap::Parser;
use tracing::warn;

use crate::{driver::Mode, error::ConfigError};

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "cloudwatch-diskusage",
    about = "Publish available disk space to CloudWatch",
    version
)]
pub struct Cli {
    /// Colon-separated list of mount paths to sample
    #[arg(long, env = "FILESYSTEMS")]
    pub filesystems: Option<String>,

    /// Host identifier used as the InstanceId dimension
    #[arg(long, env = "INSTANCE_ID")]
    pub instance_id: Option<String>,

    /// CloudWatch namespace to publish under
    #[arg(long, env = "NAMESPACE")]
    pub namespace: Option<String>,

    /// CloudWatch region
    #[arg(long, env = "REGION")]
    pub region: Option<String>,

    /// Run forever, publishing once a minute
    #[arg(long, env = "PERSISTENT")]
    pub persistent: Option<String>,

    /// Print datapoints as JSON lines instead of sending them to CloudWatch
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub filesystems: Vec<String>,
    pub instance_id: String,
    pub namespace: String,
    pub region: String,
    pub mode: Mode,
    pub dry_run: bool,
}

impl Config {
    /// Validates raw settings. Checks run in a fixed order and the first
    /// failure is returned.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let namespace = cli.namespace.unwrap_or_default();
        if namespace.is_empty() {
            return Err(ConfigError::MissingNamespace);
        }

        let region = cli.region.unwrap_or_default();
        if region.is_empty() {
            return Err(ConfigError::MissingRegion);
        }

        let filesystems = split_filesystems(cli.filesystems.as_deref().unwrap_or_default());
        if filesystems.is_empty() {
            return Err(ConfigError::NoFilesystems);
        }

        let instance_id = cli.instance_id.unwrap_or_default();
        if instance_id.is_empty() {
            return Err(ConfigError::MissingInstanceId);
        }

        let mode = match cli.persistent.as_deref() {
            None | Some("") => Mode::OneShot,
            Some(raw) => match parse_bool(raw) {
                Some(true) => Mode::Persistent,
                Some(false) => Mode::OneShot,
                None => {
                    warn!(value = raw, "unrecognised PERSISTENT value, running once");
                    Mode::OneShot
                }
            },
        };

        Ok(Self {
            filesystems,
            instance_id,
            namespace,
            region,
            mode,
            dry_run: cli.dry_run,
        })
    }
}

/// Function to split a colon-separated path list, dropping empty entries.
pub fn split_filesystems(raw: &str) -> Vec<String> {
    raw.split(':')
        .filter(|fs| !fs.is_empty())
        .map(str::to_string)
        .collect()
}

/// Function to parse the boolean spellings accepted for `PERSISTENT`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
