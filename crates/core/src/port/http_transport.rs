// HTTP Transport Port
// Abstraction for issuing the single GET a probe performs

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// A response obtained from the server, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for the status (empty if unknown)
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }
}

/// Failures where no HTTP response was received at all
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection to {uri} failed: {message}")]
    Connect { uri: String, message: String },

    #[error("Request to {uri} timed out: {message}")]
    Timeout { uri: String, message: String },

    #[error("Request to {uri} failed: {message}")]
    Request { uri: String, message: String },
}

/// HTTP Transport trait
///
/// Implementations:
/// - ReqwestTransport: real network client
/// - MockHttpTransport: canned responses for tests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one GET request against `uri`
    ///
    /// Non-2xx statuses are NOT errors: a server that answered is returned
    /// as `Ok` with its status, reason and body.
    ///
    /// # Errors
    /// - TransportError::Connect on DNS or connection failures
    /// - TransportError::Timeout if the transport's own timeout elapsed
    /// - TransportError::Request for other failures without a response
    async fn get(&self, uri: &Url) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock transport behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Answer with the given response
        Respond(HttpResponse),
        /// Fail without a response
        ConnectionRefused,
    }

    /// Mock HTTP transport recording every requested URI
    pub struct MockHttpTransport {
        behavior: MockBehavior,
        requests: Arc<Mutex<Vec<Url>>>,
    }

    impl MockHttpTransport {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn responding(status: u16, reason: &str, body: &str) -> Self {
            Self::new(MockBehavior::Respond(HttpResponse::new(status, reason, body)))
        }

        pub fn refusing() -> Self {
            Self::new(MockBehavior::ConnectionRefused)
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockHttpTransport {
        async fn get(&self, uri: &Url) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(uri.clone());

            match &self.behavior {
                MockBehavior::Respond(response) => Ok(response.clone()),
                MockBehavior::ConnectionRefused => Err(TransportError::Connect {
                    uri: uri.to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }
}
