//! Shared HTTP plumbing.

use folio_core::Result;
use folio_core::error::{ApiError, Error, TransportError};
use serde::Deserialize;

/// Build the HTTP client used by every source.
pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(transport_error)
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Error body shapes seen from upstreams and proxies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Turn a non-success response into an API error, keeping whatever message
/// the body carries.
pub(crate) async fn status_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body
            .message
            .or(body.error)
            .or_else(|| body.errors.into_iter().next().map(|e| e.message)),
        Err(_) => None,
    };
    Error::Api(ApiError::Status { status, message })
}

/// Decode a JSON body, reporting shape mismatches as malformed responses.
pub(crate) async fn decode_json<R: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| {
        Error::Api(ApiError::Malformed {
            message: e.to_string(),
        })
    })
}
