use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;

use super::Transport;

/// In-memory transport for strategy tests: acknowledges everything by
/// default, optionally delays each call or fails once a record budget is
/// exhausted.
pub(crate) struct StubTransport {
    delay: Option<Duration>,
    fail_after: Option<u64>,
    records: AtomicU64,
    singles: Mutex<Vec<Bytes>>,
    batches: Mutex<Vec<(Bytes, u64)>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self {
            delay: None,
            fail_after: None,
            records: AtomicU64::new(0),
            singles: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Acknowledges the first `limit` records, then fails every call.
    pub(crate) fn failing_after(limit: u64) -> Self {
        Self {
            fail_after: Some(limit),
            ..Self::new()
        }
    }

    pub(crate) fn records_sent(&self) -> u64 {
        self.records.load(Ordering::SeqCst)
    }

    pub(crate) fn singles(&self) -> Vec<Bytes> {
        self.singles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn batches(&self) -> Vec<(Bytes, u64)> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn admit(&self, records: u64) -> Result<(), TransportError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        loop {
            let current = self.records.load(Ordering::SeqCst);
            let next = current.saturating_add(records);
            if matches!(self.fail_after, Some(limit) if next > limit) {
                return Err(TransportError::Delivery {
                    message: "stub transport budget exhausted".to_owned(),
                });
            }
            if self
                .records
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send_one(&self, record: Bytes) -> Result<(), TransportError> {
        self.admit(1).await?;
        self.singles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        Ok(())
    }

    async fn send_batch(&self, payload: Bytes, records: u64) -> Result<(), TransportError> {
        self.admit(records).await?;
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((payload, records));
        Ok(())
    }
}
