//! Shared blocking HTTP plumbing.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::{OracleError, Result};

/// Request timeout used when none is configured. Long decks take minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Build a client; without a timeout [`DEFAULT_TIMEOUT`] applies.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
        .build()?;
    Ok(client)
}

/// Turn a non-success status into [`OracleError::Status`].
pub(crate) fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(OracleError::Status {
        status: status.as_u16(),
        message,
    })
}
