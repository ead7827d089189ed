// URI Resolution
// host name -> optional base URI from file -> optional path replacement -> absolute URI

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::domain::ProbeConfig;
use crate::port::{DocumentQuery, ExtractError};

/// Scheme used when the URI is derived from the server name
pub const DEFAULT_SCHEME: &str = "http";

/// Resolution failed; the Display text is the diagnostic reported to the operator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("{}", describe_extract_error(.0))]
    Extract(#[from] ExtractError),

    #[error("Could not construct uri to get from {candidate}")]
    InvalidUri { candidate: String },
}

fn describe_extract_error(err: &ExtractError) -> String {
    match err {
        ExtractError::NotFound(path) => {
            format!("The file to get uri from does not exist: {}", path.display())
        }
        ExtractError::PermissionDenied(path) => format!(
            "Cannot read file {} due to insufficient permissions",
            path.display()
        ),
        ExtractError::Malformed { path, .. } => {
            format!("The file {} is not valid xml", path.display())
        }
        ExtractError::UnsupportedEncoding { path, encoding } => format!(
            "The file {} uses unsupported encoding {}",
            path.display(),
            encoding
        ),
        ExtractError::NoMatch { path, query } => {
            format!("Didn't find {} in file {}", query, path.display())
        }
        ExtractError::InvalidQuery {
            path,
            query,
            detail,
        } => format!(
            "Invalid path query {} for file {}: {}",
            query,
            path.display(),
            detail
        ),
    }
}

/// Combines server name, base URI override and path override into one URI
///
/// Precedence:
/// - a non-empty base URI read from file replaces `http://<server>` entirely,
///   scheme included
/// - a configured path replaces whatever path the base URI carried
pub struct UriResolver {
    documents: Arc<dyn DocumentQuery>,
}

impl UriResolver {
    pub fn new(documents: Arc<dyn DocumentQuery>) -> Self {
        Self { documents }
    }

    /// Resolve the URI a probe should GET
    ///
    /// Either fully succeeds or fails with exactly one diagnostic.
    pub async fn resolve(&self, config: &ProbeConfig) -> Result<Url, ResolutionError> {
        let server = config.server();
        // `candidate` is what the operator configured and is reported on failure
        let mut candidate = server.name().to_string();
        let mut qualified = format!("{}://{}", DEFAULT_SCHEME, candidate);

        if let Some(source) = config.base_uri_source() {
            let file = server.map_path(&source.file);
            debug!(file = %file.display(), query = %source.query, "Reading base uri from file");

            let value = self
                .documents
                .extract(&file, &source.query)
                .await
                .map_err(|e| {
                    debug!(error = %e, "Base uri extraction failed");
                    e
                })?;
            if !value.is_empty() {
                qualified = qualify(&value);
                candidate = value;
            }
        }

        let mut uri = Url::parse(&qualified).map_err(|e| {
            debug!(candidate = %qualified, error = %e, "Uri parse failed");
            ResolutionError::InvalidUri {
                candidate: candidate.clone(),
            }
        })?;

        if let Some(path) = config.path() {
            // Replace, not append: the base URI's own path is dropped
            uri.set_path(path);
        }

        debug!(uri = %uri, "Uri resolved");
        Ok(uri)
    }
}

/// Give a scheme-less value such as `web01` or `base.uri:8080/app` the default scheme
fn qualify(value: &str) -> String {
    if value.contains("://") {
        value.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, value)
    }
}
