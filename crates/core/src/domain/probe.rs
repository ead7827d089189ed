// Probe Configuration Domain Model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{DomainError, Result};
use super::server::TargetServer;

/// Status code expected by `expect_success_status_code`
pub const SUCCESS_STATUS_CODE: u16 = 200;

/// Where to read a replacement base URI from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUriSource {
    /// File holding the URI, relative paths are mapped through the target server
    pub file: PathBuf,
    /// XPath expression selecting the URI inside the file (may be empty)
    pub query: String,
}

/// Immutable description of what to probe and what counts as success
///
/// Built once through [`ProbeConfigBuilder`]; there are no setters.
/// Deserialization goes through the same validation as `build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProbeConfigData")]
pub struct ProbeConfig {
    server: TargetServer,
    path: Option<String>,
    base_uri_source: Option<BaseUriSource>,
    expected_status: Option<u16>,
    invalid_words: Vec<String>,
}

impl ProbeConfig {
    pub fn builder(server: TargetServer) -> ProbeConfigBuilder {
        ProbeConfigBuilder::new(server)
    }

    pub fn server(&self) -> &TargetServer {
        &self.server
    }

    /// Path that replaces the path of the resolved URI
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn base_uri_source(&self) -> Option<&BaseUriSource> {
        self.base_uri_source.as_ref()
    }

    /// `None` means any status returned by the server is acceptable
    pub fn expected_status(&self) -> Option<u16> {
        self.expected_status
    }

    pub fn invalid_words(&self) -> &[String] {
        &self.invalid_words
    }
}

/// Wire shape of [`ProbeConfig`], validated on conversion
#[derive(Deserialize)]
struct ProbeConfigData {
    server: TargetServer,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    base_uri_source: Option<BaseUriSource>,
    #[serde(default)]
    expected_status: Option<u16>,
    #[serde(default)]
    invalid_words: Vec<String>,
}

impl TryFrom<ProbeConfigData> for ProbeConfig {
    type Error = DomainError;

    fn try_from(data: ProbeConfigData) -> Result<Self> {
        let mut builder = ProbeConfigBuilder::new(data.server)
            .path(data.path.unwrap_or_default())
            .invalid_words_are(data.invalid_words);
        if let Some(source) = data.base_uri_source {
            builder = builder.base_uri_in_file(source.file, source.query);
        }
        if let Some(status) = data.expected_status {
            builder = builder.expect_status(status);
        }
        builder.build()
    }
}

/// Collects probe intent before it is frozen into a [`ProbeConfig`]
///
/// # Example
/// ```text
/// let config = ProbeConfig::builder(TargetServer::new("web01"))
///     .path("/health")
///     .expect_success_status_code()
///     .invalid_words_are(["Exception", "Stack trace"])
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ProbeConfigBuilder {
    server: TargetServer,
    path: Option<String>,
    base_uri_source: Option<BaseUriSource>,
    expected_status: Option<u16>,
    invalid_words: Vec<String>,
}

impl ProbeConfigBuilder {
    pub fn new(server: TargetServer) -> Self {
        Self {
            server,
            path: None,
            base_uri_source: None,
            expected_status: None,
            invalid_words: Vec::new(),
        }
    }

    /// Set the request path
    ///
    /// Despite reading like "append to host name", the value REPLACES the
    /// whole path component of the resolved URI, including any path carried
    /// by a base URI read from file. An empty string means "no override".
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// Read the base URI from an XML file instead of using `http://<server>`
    pub fn base_uri_in_file(mut self, file: impl AsRef<Path>, query: impl Into<String>) -> Self {
        self.base_uri_source = Some(BaseUriSource {
            file: file.as_ref().to_path_buf(),
            query: query.into(),
        });
        self
    }

    pub fn expect_success_status_code(self) -> Self {
        self.expect_status(SUCCESS_STATUS_CODE)
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Words whose presence in the response body raises an Alert
    pub fn invalid_words_are<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    /// - DomainError::EmptyServerName if the server has no name
    /// - DomainError::InvalidStatusCode if the expected status is outside 100..=999
    /// - DomainError::EmptyBaseUriFile if a base URI source has an empty file path
    /// - DomainError::EmptyInvalidWord if an invalid word is the empty string
    pub fn build(self) -> Result<ProbeConfig> {
        if self.server.name().trim().is_empty() {
            return Err(DomainError::EmptyServerName);
        }

        if let Some(status) = self.expected_status {
            if !(100..=999).contains(&status) {
                return Err(DomainError::InvalidStatusCode(status));
            }
        }

        if let Some(source) = &self.base_uri_source {
            if source.file.as_os_str().is_empty() {
                return Err(DomainError::EmptyBaseUriFile);
            }
        }

        // An empty word would match every body
        if let Some(index) = self.invalid_words.iter().position(|w| w.is_empty()) {
            return Err(DomainError::EmptyInvalidWord(index));
        }

        Ok(ProbeConfig {
            server: self.server,
            path: self.path,
            base_uri_source: self.base_uri_source,
            expected_status: self.expected_status,
            invalid_words: self.invalid_words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> TargetServer {
        TargetServer::new("test-server.com")
    }

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::builder(server()).build().unwrap();

        assert_eq!(config.server().name(), "test-server.com");
        assert!(config.path().is_none());
        assert!(config.base_uri_source().is_none());
        assert!(config.expected_status().is_none());
        assert!(config.invalid_words().is_empty());
    }

    #[test]
    fn test_all_options() {
        let config = ProbeConfig::builder(server())
            .path("/status")
            .base_uri_in_file("web.config", "/config/target/@Uri")
            .expect_success_status_code()
            .invalid_words_are(["error", "exception"])
            .build()
            .unwrap();

        assert_eq!(config.path(), Some("/status"));
        let source = config.base_uri_source().unwrap();
        assert_eq!(source.file, PathBuf::from("web.config"));
        assert_eq!(source.query, "/config/target/@Uri");
        assert_eq!(config.expected_status(), Some(SUCCESS_STATUS_CODE));
        assert_eq!(config.invalid_words(), ["error", "exception"]);
    }

    #[test]
    fn test_empty_path_means_no_override() {
        let config = ProbeConfig::builder(server()).path("").build().unwrap();
        assert!(config.path().is_none());
    }

    #[test]
    fn test_empty_server_name_rejected() {
        let result = ProbeConfig::builder(TargetServer::new("  ")).build();
        assert_eq!(result.unwrap_err(), DomainError::EmptyServerName);
    }

    #[test]
    fn test_status_out_of_range_rejected() {
        let result = ProbeConfig::builder(server()).expect_status(42).build();
        assert_eq!(result.unwrap_err(), DomainError::InvalidStatusCode(42));
    }

    #[test]
    fn test_empty_base_uri_file_rejected() {
        let result = ProbeConfig::builder(server())
            .base_uri_in_file("", "/a/@b")
            .build();
        assert_eq!(result.unwrap_err(), DomainError::EmptyBaseUriFile);
    }

    #[test]
    fn test_empty_invalid_word_rejected() {
        let result = ProbeConfig::builder(server())
            .invalid_words_are(["error", ""])
            .build();
        assert_eq!(result.unwrap_err(), DomainError::EmptyInvalidWord(1));
    }

    #[test]
    fn test_deserialized_config_matches_built_one() {
        let built = ProbeConfig::builder(server().with_root("/srv/app"))
            .path("/status")
            .base_uri_in_file("web.config", "/config/target/@Uri")
            .expect_success_status_code()
            .invalid_words_are(["error"])
            .build()
            .unwrap();

        let json = serde_json::to_string(&built).unwrap();
        let parsed: ProbeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_deserialize_applies_validation() {
        let json = r#"{"server":{"name":"test-server.com"},"expected_status":42}"#;
        let err = serde_json::from_str::<ProbeConfig>(json).unwrap_err();
        assert!(err.to_string().contains("42"), "got {}", err);

        let json = r#"{"server":{"name":"test-server.com"},"path":""}"#;
        let parsed: ProbeConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.path().is_none());
    }
}
