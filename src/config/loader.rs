use std::path::Path;

use clap::parser::ValueSource;
use clap::ArgMatches;

use crate::args::{HarnessArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::FileConfig;

/// Reads and parses one TOML config file.
///
/// # Errors
///
/// Returns `ConfigError::Read` when the file is unreadable and
/// `ConfigError::Parse` when it is not valid config TOML.
pub fn load(path: &Path) -> AppResult<FileConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    })?;
    toml::from_str(&raw).map_err(|source| {
        AppError::config(ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    })
}

/// Merges config-file values under the parsed CLI arguments. A value given
/// on the command line is never overridden.
///
/// # Errors
///
/// Returns a configuration error when a config value is out of range for
/// its argument.
pub fn apply(args: &mut HarnessArgs, matches: &ArgMatches, config: FileConfig) -> AppResult<()> {
    if args.data_file.is_none() {
        args.data_file = config.run.data_file;
    }
    if args.seed.is_none() {
        args.seed = config.run.seed;
    }
    if !given_on_cli(matches, "url") {
        if let Some(url) = config.target.url {
            args.url = url;
        }
    }
    if !given_on_cli(matches, "schema_id") {
        if let Some(schema_id) = config.target.schema_id {
            args.schema_id = schema_id;
        }
    }
    if !given_on_cli(matches, "item_count") {
        if let Some(item_count) = config.run.item_count {
            args.item_count = item_count;
        }
    }
    if !given_on_cli(matches, "chunk_size_bytes") {
        if let Some(value) = config.chunked.chunk_size_bytes {
            args.chunk_size_bytes = positive(value, "chunked.chunk_size_bytes")?;
        }
    }
    if !given_on_cli(matches, "parallelism") {
        if let Some(value) = config.pool.parallelism {
            args.parallelism = positive(value, "pool.parallelism")?;
        }
    }
    if !given_on_cli(matches, "buffer_capacity_bytes") {
        if let Some(value) = config.buffered.buffer_capacity_bytes {
            args.buffer_capacity_bytes = positive(value, "buffered.buffer_capacity_bytes")?;
        }
    }
    Ok(())
}

fn given_on_cli(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

fn positive(value: usize, key: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|message| AppError::config(ConfigError::InvalidValue { key, message }))
}
