use thiserror::Error;

/// Non-retriable transport failures. Any of these aborts the current
/// strategy run entirely; no partial results are salvaged.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("Endpoint {url} answered status {status}.")]
    Status { status: u16, url: String },
    #[error("Delivery failed: {message}")]
    Delivery { message: String },
    #[error("Acknowledgment channel closed before completion.")]
    AckChannelClosed,
}

/// Recoverable backpressure signal from the buffered producer. Handled
/// inside the buffered strategy via flush-and-retry, never surfaced.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Buffer full: {buffered} bytes buffered, {needed} more needed, capacity {capacity}.")]
    BufferFull {
        needed: usize,
        buffered: usize,
        capacity: usize,
    },
}
