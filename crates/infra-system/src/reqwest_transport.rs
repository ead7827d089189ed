// HTTP transport implementation
// reason: reqwest for the single GET a probe performs

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;
use url::Url;

use httpcheck_core::port::http_transport::{HttpResponse, HttpTransport, TransportError};

/// reqwest-backed transport
///
/// Sends a plain GET (no custom headers) and follows the client's default
/// redirect policy. Responses with any status are returned as `Ok`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default timeout behavior
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport with an overall request timeout
    ///
    /// # Example
    /// ```ignore
    /// let transport = ReqwestTransport::with_timeout(Duration::from_secs(10))?;
    /// ```
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, uri: &Url) -> Result<HttpResponse, TransportError> {
        debug!(uri = %uri, "Sending GET");

        let response = self
            .client
            .get(uri.clone())
            .send()
            .await
            .map_err(|e| to_transport_error(uri, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| to_transport_error(uri, e))?;

        debug!(uri = %uri, status = %status, body_len = body.len(), "Response received");

        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        ))
    }
}

fn to_transport_error(uri: &Url, err: reqwest::Error) -> TransportError {
    let uri = uri.to_string();
    let message = error_chain(&err);

    if err.is_timeout() {
        TransportError::Timeout { uri, message }
    } else if err.is_connect() {
        TransportError::Connect { uri, message }
    } else {
        TransportError::Request { uri, message }
    }
}

/// reqwest's Display hides the cause (e.g. "dns error"), so walk the sources
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
