// Document Query Port
// Reads a scalar value out of an XML file with an XPath expression

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a value could not be extracted
///
/// Callers match on the kind to decide what to report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("file {} cannot be read: permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("file {} is not valid xml: {detail}", .path.display())]
    Malformed { path: PathBuf, detail: String },

    #[error("file {} declares unsupported encoding {encoding}", .path.display())]
    UnsupportedEncoding { path: PathBuf, encoding: String },

    #[error("{query} selects nothing in file {}", .path.display())]
    NoMatch { path: PathBuf, query: String },

    #[error("invalid path query {query} for file {}: {detail}", .path.display())]
    InvalidQuery {
        path: PathBuf,
        query: String,
        detail: String,
    },
}

#[async_trait]
pub trait DocumentQuery: Send + Sync {
    /// Evaluate `query` against the XML document stored at `path`
    ///
    /// The file is always read and parsed. An empty `query` then yields an
    /// empty string without error. The selected value is returned verbatim
    /// (no trimming, no URI validation).
    async fn extract(&self, path: &Path, query: &str) -> Result<String, ExtractError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock DocumentQuery returning a fixed result
    pub struct MockDocumentQuery {
        result: Result<String, ExtractError>,
        calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
    }

    impl MockDocumentQuery {
        pub fn returning(value: impl Into<String>) -> Self {
            Self::new(Ok(value.into()))
        }

        pub fn failing(error: ExtractError) -> Self {
            Self::new(Err(error))
        }

        fn new(result: Result<String, ExtractError>) -> Self {
            Self {
                result,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls(&self) -> Vec<(PathBuf, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentQuery for MockDocumentQuery {
        async fn extract(&self, path: &Path, query: &str) -> Result<String, ExtractError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), query.to_string()));
            self.result.clone()
        }
    }
}
