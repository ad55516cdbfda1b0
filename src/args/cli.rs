use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_usize};
use super::types::{PositiveUsize, StrategyKind};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Throughput benchmarking harness for ingestion endpoints - drives a record corpus through direct, chunked, pooled, and buffered delivery strategies and reports items delivered versus wall time."
)]
pub struct HarnessArgs {
    /// Delivery strategies to benchmark, run sequentially in the order given
    #[arg(long = "impl", short = 'i', value_enum, num_args = 1.., required = true)]
    pub strategies: Vec<StrategyKind>,

    /// Newline-delimited corpus file of sample records
    #[arg(long = "data-file", short = 'd')]
    pub data_file: Option<String>,

    /// Number of records to draw from the corpus per strategy run
    #[arg(long = "item-count", default_value_t = 1000)]
    pub item_count: u64,

    /// Base URL of the ingestion service
    #[arg(long, short = 'u', default_value = "http://127.0.0.1:8088")]
    pub url: String,

    /// Schema id appended to the ingestion URL path
    #[arg(long = "schema-id", default_value = "1")]
    pub schema_id: String,

    /// Byte threshold for chunked batches
    #[arg(long = "chunk-size-bytes", value_parser = parse_positive_usize, default_value = "5242880")]
    pub chunk_size_bytes: PositiveUsize,

    /// Worker count for the pool strategy
    #[arg(long, value_parser = parse_positive_usize, default_value = "100")]
    pub parallelism: PositiveUsize,

    /// Buffer capacity for the buffered producer
    #[arg(long = "buffer-capacity-bytes", value_parser = parse_positive_usize, default_value = "1048576")]
    pub buffer_capacity_bytes: PositiveUsize,

    /// Seed for reproducible sampling (derived per run index)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Max time to wait for the service to accept connections (supports ms/s/m/h)
    #[arg(long = "wait-timeout", value_parser = parse_duration_arg, default_value = "60s")]
    pub wait_timeout: Duration,

    /// Skip the service-readiness probe
    #[arg(long = "no-wait")]
    pub no_wait: bool,

    /// Load defaults from a TOML config file (drench.toml is probed when omitted)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl HarnessArgs {
    /// Validates per-strategy requirements before any run starts.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the corpus file is missing from
    /// both the CLI and the config file, and a validation error when the
    /// target URL cannot be used.
    pub fn validate(&self) -> AppResult<()> {
        if self.data_file.is_none() {
            return Err(AppError::config(ConfigError::MissingDataFile));
        }
        let (_host, _port) = self.target_host_port()?;
        Ok(())
    }

    /// Extracts the host and port the readiness probe connects to.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the target URL is unparseable or has
    /// no host or port.
    pub fn target_host_port(&self) -> AppResult<(String, u16)> {
        let url = Url::parse(&self.url).map_err(|source| {
            AppError::validation(ValidationError::InvalidUrl {
                url: self.url.clone(),
                source,
            })
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| {
                AppError::validation(ValidationError::UrlMissingHost {
                    url: self.url.clone(),
                })
            })?
            .to_owned();
        let port = url.port_or_known_default().ok_or_else(|| {
            AppError::validation(ValidationError::UrlMissingPort {
                url: self.url.clone(),
            })
        })?;
        Ok((host, port))
    }
}
