use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{AppError, AppResult, ValidationError};

const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Polls the target until it accepts a TCP connection, so strategy timings
/// never include service startup.
///
/// # Errors
///
/// Returns `ServiceNotReady` when the target does not accept a connection
/// within `timeout`.
pub(crate) async fn wait_for_service(host: &str, port: u16, timeout: Duration) -> AppResult<()> {
    let addr = format!("{host}:{port}");
    let started = Instant::now();
    loop {
        match TcpStream::connect(&addr).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                if started.elapsed() >= timeout {
                    return Err(AppError::validation(ValidationError::ServiceNotReady {
                        addr,
                        timeout_secs: timeout.as_secs(),
                    }));
                }
                debug!("Service at {} not ready yet: {}", addr, err);
                sleep(RETRY_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn connects_to_a_listening_service() -> Result<(), String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test listener failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("listener addr failed: {}", err))?;

        wait_for_service("127.0.0.1", addr.port(), Duration::from_secs(5))
            .await
            .map_err(|err| format!("expected readiness, got {}", err))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn times_out_when_nothing_listens() -> Result<(), String> {
        let result = wait_for_service("127.0.0.1", 1, Duration::from_millis(50)).await;
        match result {
            Err(AppError::Validation(ValidationError::ServiceNotReady { .. })) => Ok(()),
            Ok(()) => Err("expected timeout".to_owned()),
            Err(err) => Err(format!("unexpected error {}", err)),
        }
    }
}
