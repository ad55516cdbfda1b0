use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::debug;

use crate::corpus::SharedSampler;
use crate::error::{AppResult, TransportError};
use crate::report::{Measurement, RunTimer};
use crate::strategy::tracker::CompletionTracker;
use crate::transport::Transport;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

enum PoolEvent {
    Delivered { elapsed: Duration },
    WorkerFailed { error: TransportError },
    WorkerDone,
}

/// Runs `parallelism` workers against a shared sampler, funneling every
/// completion through one event channel into a single aggregator.
///
/// Workers claim records from the sampler (each pull atomic, cross-worker
/// ordering unspecified), send one request per record, and post one done
/// sentinel on exit. The aggregator is the only writer of the completion
/// counters; it returns once it has seen every sentinel. Elapsed time spans
/// aggregator start to aggregator finish.
///
/// A worker's transport failure abandons the run: a shared flag stops
/// further claims best-effort, and the first error is surfaced after all
/// workers have exited.
///
/// # Errors
///
/// Returns the first worker's transport failure, or a join error when a
/// worker task was cancelled or panicked.
pub async fn run_pool(
    transport: Arc<dyn Transport>,
    sampler: SharedSampler,
    parallelism: usize,
) -> AppResult<Measurement> {
    let sampler = Arc::new(sampler);
    let failed = Arc::new(AtomicBool::new(false));
    let (event_tx, mut event_rx) = mpsc::channel::<PoolEvent>(EVENT_CHANNEL_CAPACITY);

    let timer = RunTimer::start();
    let mut worker_handles = Vec::with_capacity(parallelism);
    for _ in 0..parallelism {
        worker_handles.push(tokio::spawn(run_worker(
            Arc::clone(&transport),
            Arc::clone(&sampler),
            Arc::clone(&failed),
            event_tx.clone(),
        )));
    }
    drop(event_tx);

    let mut tracker = CompletionTracker::new();
    let mut latency_sum = Duration::ZERO;
    let mut done = 0_usize;
    let mut failure: Option<TransportError> = None;
    while done < parallelism {
        let Some(event) = event_rx.recv().await else {
            break;
        };
        match event {
            PoolEvent::Delivered { elapsed } => {
                tracker.record_sent();
                tracker.record_acked(1);
                latency_sum = latency_sum.saturating_add(elapsed);
            }
            PoolEvent::WorkerFailed { error } => {
                if failure.is_none() {
                    failure = Some(error);
                }
            }
            PoolEvent::WorkerDone => {
                done = done.saturating_add(1);
            }
        }
    }

    for handle in worker_handles {
        handle.await?;
    }

    if let Some(error) = failure {
        return Err(error.into());
    }
    tracker.finalize_total();
    let items = tracker.acknowledged();
    if let Some(average) = u32::try_from(items)
        .ok()
        .filter(|count| *count > 0)
        .and_then(|count| latency_sum.checked_div(count))
    {
        debug!(
            "Pool run finished: {} items across {} workers, average request latency {:?}",
            items, parallelism, average
        );
    }
    Ok(timer.finish(items))
}

async fn run_worker(
    transport: Arc<dyn Transport>,
    sampler: Arc<SharedSampler>,
    failed: Arc<AtomicBool>,
    event_tx: mpsc::Sender<PoolEvent>,
) {
    loop {
        if failed.load(Ordering::SeqCst) {
            break;
        }
        let Some(record) = sampler.next_record() else {
            break;
        };
        let start = Instant::now();
        match transport.send_one(record).await {
            Ok(()) => {
                let event = PoolEvent::Delivered {
                    elapsed: start.elapsed(),
                };
                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(error) => {
                failed.store(true, Ordering::SeqCst);
                drop(event_tx.send(PoolEvent::WorkerFailed { error }).await);
                break;
            }
        }
    }
    drop(event_tx.send(PoolEvent::WorkerDone).await);
}
