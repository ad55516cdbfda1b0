//! Optional TOML config file merged under the CLI.
//!
//! Values given on the command line always win; config values only fill in
//! arguments the user left at their defaults. `drench.toml` in the working
//! directory is probed when `--config` is omitted.

mod loader;

use serde::Deserialize;

pub use loader::{apply, load};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub chunked: ChunkedSection,
    #[serde(default)]
    pub pool: PoolSection,
    #[serde(default)]
    pub buffered: BufferedSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    pub url: Option<String>,
    pub schema_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub data_file: Option<String>,
    pub item_count: Option<u64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkedSection {
    pub chunk_size_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolSection {
    pub parallelism: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BufferedSection {
    pub buffer_capacity_bytes: Option<usize>,
}
