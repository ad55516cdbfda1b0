use std::sync::Arc;

use bytes::Bytes;

use crate::error::{AppResult, SubmitError, TransportError};
use crate::report::{Measurement, RunTimer};
use crate::strategy::tracker::CompletionTracker;
use crate::transport::{AckEvent, BufferedProducer, Transport};

/// Drives a transport with internal batching and out-of-band
/// acknowledgment.
///
/// Records are submitted one at a time; backpressure triggers a
/// flush-and-retry inside the loop and is never surfaced. The total is
/// finalized only after the submission loop completes, then the single
/// consumer drains acknowledgment events until every submitted record is
/// acknowledged. Elapsed time spans first submission to the completion
/// signal, so this measures time until durably acknowledged rather than
/// submission time.
///
/// # Errors
///
/// Returns the first batch failure reported by the transport, or an error
/// when the acknowledgment channel closes before completion.
pub async fn run_buffered<TRecords>(
    transport: Arc<dyn Transport>,
    records: TRecords,
    buffer_capacity_bytes: usize,
) -> AppResult<Measurement>
where
    TRecords: Iterator<Item = Bytes>,
{
    let timer = RunTimer::start();
    let (mut producer, mut ack_rx) = BufferedProducer::new(transport, buffer_capacity_bytes);
    let mut tracker = CompletionTracker::new();

    for record in records {
        loop {
            match producer.submit(&record) {
                Ok(()) => break,
                Err(SubmitError::BufferFull { .. }) => producer.flush().await?,
            }
        }
        tracker.record_sent();
    }
    producer.close().await?;
    tracker.finalize_total();

    while !tracker.is_complete() {
        let Some(event) = ack_rx.recv().await else {
            return Err(TransportError::AckChannelClosed.into());
        };
        match event {
            AckEvent::Delivered { records: count } => {
                tracker.record_acked(count);
            }
            AckEvent::Failed { error } => return Err(error.into()),
        }
    }

    Ok(timer.finish(tracker.acknowledged()))
}
