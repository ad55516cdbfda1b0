use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};

use crate::error::{AppError, AppResult, TransportError, ValidationError};

use super::Transport;

/// HTTP transport posting records to `<base_url>/<schema_id>`.
///
/// Single sends carry one JSON record; batch sends carry a
/// newline-delimited payload. One client is shared across a run so
/// connections are reused.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Builds the transport for one ingestion endpoint.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unparseable target URL and a
    /// transport error when the HTTP client cannot be constructed.
    pub fn new(base_url: &str, schema_id: &str) -> AppResult<Self> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), schema_id);
        let endpoint = Url::parse(&raw).map_err(|source| {
            AppError::validation(ValidationError::InvalidUrl { url: raw, source })
        })?;
        let client = Client::builder()
            .build()
            .map_err(|source| AppError::transport(TransportError::Request { source }))?;
        Ok(Self { client, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn check_status(&self, response: &Response) -> Result<(), TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                url: self.endpoint.as_str().to_owned(),
            })
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_one(&self, record: Bytes) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(record)
            .send()
            .await
            .map_err(|source| TransportError::Request { source })?;
        self.check_status(&response)
    }

    async fn send_batch(&self, payload: Bytes, _records: u64) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/jsonlines")
            .body(payload)
            .send()
            .await
            .map_err(|source| TransportError::Request { source })?;
        self.check_status(&response)
    }
}
