use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::Rng;

use super::Corpus;

/// Lazy uniform-with-replacement draws from a shared corpus.
///
/// The generator state is passed in explicitly so runs are reproducible
/// under a fixed seed. With `limit = None` the iterator never ends; a fresh
/// sampler over the same corpus yields an independent sequence.
#[derive(Debug)]
pub struct Sampler {
    corpus: Arc<Corpus>,
    limit: Option<u64>,
    drawn: u64,
    rng: StdRng,
}

impl Sampler {
    #[must_use]
    pub fn new(corpus: Arc<Corpus>, limit: Option<u64>, rng: StdRng) -> Self {
        Self {
            corpus,
            limit,
            drawn: 0,
            rng,
        }
    }
}

impl Iterator for Sampler {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        if let Some(limit) = self.limit {
            if self.drawn >= limit {
                return None;
            }
        }
        let index = self.rng.gen_range(0..self.corpus.len());
        self.drawn = self.drawn.saturating_add(1);
        self.corpus.record(index).cloned()
    }
}

/// A sampler safe for concurrent pulls from multiple workers.
///
/// Pulls are mutually exclusive and atomic: each record is claimed by
/// exactly one caller, with no duplication or loss. Ordering across callers
/// is unspecified.
#[derive(Debug)]
pub struct SharedSampler {
    inner: Mutex<Sampler>,
}

impl SharedSampler {
    #[must_use]
    pub fn new(sampler: Sampler) -> Self {
        Self {
            inner: Mutex::new(sampler),
        }
    }

    pub fn next_record(&self) -> Option<Bytes> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next()
    }
}
