//! Abstract send capability consumed by the delivery strategies.
//!
//! Concrete wire clients stay behind this seam: the harness ships an HTTP
//! transport, and the buffered producer layers backpressure plus
//! out-of-band acknowledgment on top of any batch-capable transport.

mod buffered;
mod http;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;

pub use buffered::{AckEvent, BufferedProducer};
pub use http::HttpTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one record and waits for its acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the transport rejects the record.
    async fn send_one(&self, record: Bytes) -> Result<(), TransportError>;

    /// Sends one delimiter-terminated payload of `records` records and waits
    /// for its acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the transport rejects the batch.
    async fn send_batch(&self, payload: Bytes, records: u64) -> Result<(), TransportError>;
}
