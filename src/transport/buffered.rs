use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{AppResult, SubmitError, TransportError};

use super::Transport;

const DELIMITER: u8 = b'\n';

/// Outcome of one flushed batch, delivered out of band on the
/// acknowledgment channel. Acknowledgments are coalesced per batch and may
/// arrive after the full input is already submitted.
#[derive(Debug)]
pub enum AckEvent {
    Delivered { records: u64 },
    Failed { error: TransportError },
}

/// Front-end for a transport with internal batching and asynchronous
/// acknowledgment.
///
/// Records accumulate in a byte-capacity-bounded buffer. `submit` is
/// non-blocking and signals backpressure with `SubmitError::BufferFull`;
/// `flush` waits for the previous in-flight send, then hands the current
/// buffer to a background task. At most one flush is in flight at a time.
/// A record larger than the whole capacity is still accepted into an empty
/// buffer and flushed alone.
pub struct BufferedProducer {
    transport: Arc<dyn Transport>,
    capacity: usize,
    buffer: Vec<u8>,
    buffered_records: u64,
    in_flight: Option<JoinHandle<()>>,
    ack_tx: mpsc::UnboundedSender<AckEvent>,
}

impl BufferedProducer {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        capacity: usize,
    ) -> (Self, mpsc::UnboundedReceiver<AckEvent>) {
        let (ack_tx, ack_rx) = mpsc::unbounded_channel();
        (
            Self {
                transport,
                capacity,
                buffer: Vec::new(),
                buffered_records: 0,
                in_flight: None,
                ack_tx,
            },
            ack_rx,
        )
    }

    /// Queues one record into the buffer without blocking.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::BufferFull` when the record would push a
    /// non-empty buffer past its capacity.
    pub fn submit(&mut self, record: &Bytes) -> Result<(), SubmitError> {
        let needed = record.len().saturating_add(1);
        let buffered = self.buffer.len();
        if !self.buffer.is_empty() && buffered.saturating_add(needed) > self.capacity {
            return Err(SubmitError::BufferFull {
                needed,
                buffered,
                capacity: self.capacity,
            });
        }
        self.buffer.extend_from_slice(record);
        self.buffer.push(DELIMITER);
        self.buffered_records = self.buffered_records.saturating_add(1);
        Ok(())
    }

    /// Waits for the in-flight send, then hands the current buffer to a
    /// background send task. The batch outcome arrives on the
    /// acknowledgment channel, not from this call.
    ///
    /// # Errors
    ///
    /// Returns a join error when the previous in-flight send task was
    /// cancelled or panicked.
    pub async fn flush(&mut self) -> AppResult<()> {
        if let Some(handle) = self.in_flight.take() {
            handle.await?;
        }
        if self.buffer.is_empty() {
            return Ok(());
        }
        let payload = Bytes::from(std::mem::take(&mut self.buffer));
        let records = std::mem::take(&mut self.buffered_records);
        let transport = Arc::clone(&self.transport);
        let ack_tx = self.ack_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let event = match transport.send_batch(payload, records).await {
                Ok(()) => AckEvent::Delivered { records },
                Err(error) => AckEvent::Failed { error },
            };
            drop(ack_tx.send(event));
        }));
        Ok(())
    }

    /// Flushes the remainder and waits for the final in-flight send. Every
    /// acknowledgment event is on the channel once this returns.
    ///
    /// # Errors
    ///
    /// Returns a join error when a send task was cancelled or panicked.
    pub async fn close(mut self) -> AppResult<()> {
        self.flush().await?;
        if let Some(handle) = self.in_flight.take() {
            handle.await?;
        }
        Ok(())
    }

    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn buffered_records(&self) -> u64 {
        self.buffered_records
    }
}
