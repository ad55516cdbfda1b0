//! Request-processing extension point consumed by the host ingestion
//! service.
//!
//! Implementers see each ingest request and return a tagged verdict: no
//! opinion (forward to the pipeline), short-circuit with a canned response,
//! or fail the request. A tagged result type keeps implementers off a
//! shared base type; the harness itself only uses this surface in its stub
//! ingest server.

/// One ingest request as seen by a processor. Borrowed views only; the
/// processor never owns the payload.
#[derive(Debug, Clone, Copy)]
pub struct IngestRequest<'req> {
    pub url: &'req str,
    pub method: &'req str,
    pub headers: &'req [(String, String)],
    pub body: &'req [u8],
}

/// Static response structure returned by a short-circuiting processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorVerdict {
    /// No opinion; the request continues to the ingestion pipeline.
    Forward,
    /// Short-circuit with this response; the pipeline never sees the
    /// request.
    Respond(ProcessorResponse),
    /// Fail the request.
    Fail(String),
}

pub trait RequestProcessor: Send + Sync {
    fn process(&self, request: &IngestRequest<'_>) -> ProcessorVerdict;
}
