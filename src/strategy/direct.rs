use bytes::Bytes;

use crate::error::AppResult;
use crate::report::{Measurement, RunTimer};
use crate::transport::Transport;

/// Sends each record as one request, in input order, awaiting every
/// acknowledgment before the next send. A non-success response aborts the
/// whole run; no partial-failure tolerance. This measures worst-case
/// unpipelined throughput.
///
/// # Errors
///
/// Returns the first transport failure.
pub async fn run_direct<TRecords>(
    transport: &dyn Transport,
    records: TRecords,
) -> AppResult<Measurement>
where
    TRecords: Iterator<Item = Bytes>,
{
    let timer = RunTimer::start();
    let mut items: u64 = 0;
    for record in records {
        transport.send_one(record).await?;
        items = items.saturating_add(1);
    }
    Ok(timer.finish(items))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::corpus::{Corpus, Sampler};
    use crate::error::{AppError, AppResult};
    use crate::transport::test_support::StubTransport;

    fn fixture() -> AppResult<Arc<Corpus>> {
        let corpus = Corpus::from_records(vec![
            Bytes::from_static(b"a"),
            Bytes::from_static(b"bb"),
            Bytes::from_static(b"ccc"),
        ])?;
        Ok(corpus)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sends_every_sampled_record() -> AppResult<()> {
        let corpus = fixture()?;
        let transport = StubTransport::with_delay(Duration::from_millis(1));
        let sampler = Sampler::new(corpus, Some(5), StdRng::seed_from_u64(1));

        let measurement = run_direct(&transport, sampler).await?;

        if measurement.items != 5 {
            return Err(AppError::validation(format!(
                "expected 5 items, got {}",
                measurement.items
            )));
        }
        if measurement.total_time_taken_seconds <= 0.0 {
            return Err(AppError::validation("expected positive elapsed time"));
        }
        if transport.records_sent() != 5 {
            return Err(AppError::validation("expected 5 transport sends"));
        }
        if transport
            .singles()
            .iter()
            .any(|record| ![&b"a"[..], b"bb", b"ccc"].contains(&record.as_ref()))
        {
            return Err(AppError::validation(
                "sent a record not drawn from the corpus",
            ));
        }
        Ok(())
    }

    #[tokio::test(flavor = "current_thread")]
    async fn aborts_on_first_transport_failure() -> AppResult<()> {
        let corpus = fixture()?;
        let transport = StubTransport::failing_after(2);
        let sampler = Sampler::new(corpus, Some(10), StdRng::seed_from_u64(1));

        let result = run_direct(&transport, sampler).await;

        if result.is_ok() {
            return Err(AppError::validation("expected aborted run"));
        }
        if transport.records_sent() != 2 {
            return Err(AppError::validation(format!(
                "expected 2 sends before abort, got {}",
                transport.records_sent()
            )));
        }
        Ok(())
    }
}
