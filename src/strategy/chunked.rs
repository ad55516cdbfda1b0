use bytes::Bytes;

use crate::error::AppResult;
use crate::report::{Measurement, RunTimer};
use crate::transport::Transport;

const DELIMITER: u8 = b'\n';

/// Accumulates records into delimiter-terminated buffers and posts each
/// buffer as one batch call.
///
/// A buffer is flushed before adding a record that would push it past
/// `chunk_size_bytes`, so no flushed buffer exceeds the threshold unless a
/// single record already does on its own; that record is flushed alone.
/// Flush failure is fatal to the run.
///
/// # Errors
///
/// Returns the first batch-send failure.
pub async fn run_chunked<TRecords>(
    transport: &dyn Transport,
    records: TRecords,
    chunk_size_bytes: usize,
) -> AppResult<Measurement>
where
    TRecords: Iterator<Item = Bytes>,
{
    let timer = RunTimer::start();
    let mut buffer: Vec<u8> = Vec::new();
    let mut buffered_records: u64 = 0;
    let mut items: u64 = 0;

    for record in records {
        let needed = record.len().saturating_add(1);
        if !buffer.is_empty() && buffer.len().saturating_add(needed) > chunk_size_bytes {
            flush(transport, &mut buffer, &mut buffered_records).await?;
        }
        buffer.extend_from_slice(&record);
        buffer.push(DELIMITER);
        buffered_records = buffered_records.saturating_add(1);
        items = items.saturating_add(1);
    }
    if !buffer.is_empty() {
        flush(transport, &mut buffer, &mut buffered_records).await?;
    }

    Ok(timer.finish(items))
}

async fn flush(
    transport: &dyn Transport,
    buffer: &mut Vec<u8>,
    buffered_records: &mut u64,
) -> AppResult<()> {
    let payload = Bytes::from(std::mem::take(buffer));
    let records = std::mem::take(buffered_records);
    transport.send_batch(payload, records).await?;
    Ok(())
}
