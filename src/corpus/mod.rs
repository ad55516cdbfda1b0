//! In-memory record corpus and random sampling.
//!
//! The corpus is loaded once from a newline-delimited file and shared
//! read-only across strategy runs. Sampling draws records uniformly at
//! random with replacement, so each draw is O(1) and independent of prior
//! draws.

mod sampler;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::CorpusError;

pub use sampler::{Sampler, SharedSampler};

#[derive(Debug)]
pub struct Corpus {
    records: Vec<Bytes>,
}

impl Corpus {
    /// Loads a corpus from a newline-delimited file, keeping non-empty lines.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Read` when the file is missing or unreadable and
    /// `CorpusError::Empty` when it contains no records.
    pub fn load(path: &Path) -> Result<Arc<Self>, CorpusError> {
        let raw = std::fs::read(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records = raw
            .split(|byte| *byte == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(Bytes::copy_from_slice)
            .collect();
        Self::from_records(records)
    }

    /// Builds a corpus from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Empty` when `records` is empty.
    pub fn from_records(records: Vec<Bytes>) -> Result<Arc<Self>, CorpusError> {
        if records.is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(Arc::new(Self { records }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn record(&self, index: usize) -> Option<&Bytes> {
        self.records.get(index)
    }
}
