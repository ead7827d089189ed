//! Probe settings: config file < environment < command-line flags

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use httpcheck_core::domain::{ProbeConfig, TargetServer};
use httpcheck_core::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Flags shared by `verify` and `execute`
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Settings file (TOML, JSON or YAML); flags override its values
    #[arg(short, long, env = "HTTPCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target server name, used as http://<host> unless a base uri file resolves
    #[arg(long, env = "HTTPCHECK_HOST")]
    pub host: Option<String>,

    /// Directory relative file paths are resolved against
    #[arg(long, env = "HTTPCHECK_ROOT")]
    pub root: Option<PathBuf>,

    /// Path that REPLACES the path of the resolved uri
    #[arg(long, env = "HTTPCHECK_PATH")]
    pub path: Option<String>,

    /// XML file holding the base uri
    #[arg(long, env = "HTTPCHECK_URI_FILE")]
    pub uri_file: Option<PathBuf>,

    /// XPath selecting the base uri inside --uri-file
    #[arg(long, env = "HTTPCHECK_URI_QUERY")]
    pub uri_query: Option<String>,

    /// Status code the response must have (default: any)
    #[arg(long, env = "HTTPCHECK_EXPECTED_STATUS", conflicts_with = "expect_success")]
    pub expected_status: Option<u16>,

    /// Shorthand for --expected-status 200
    #[arg(long)]
    pub expect_success: bool,

    /// Word that raises an alert when found in the response body (repeatable)
    #[arg(long = "invalid-word")]
    pub invalid_words: Vec<String>,

    /// Comma separated list of invalid words, used when no --invalid-word is given
    #[arg(
        long = "invalid-words",
        env = "HTTPCHECK_INVALID_WORDS",
        value_delimiter = ',',
        hide = true
    )]
    pub invalid_word_list: Vec<String>,

    /// Request timeout in seconds (default: transport default)
    #[arg(long, env = "HTTPCHECK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, env = "HTTPCHECK_FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Fully merged settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: Option<String>,
    pub root: Option<PathBuf>,
    pub path: Option<String>,
    pub uri_file: Option<PathBuf>,
    pub uri_query: Option<String>,
    pub expected_status: Option<u16>,
    pub invalid_words: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Load the settings file (if any) and apply the flags on top
    pub fn resolve(args: ProbeArgs) -> Result<Self> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge(args))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }

    fn merge(self, args: ProbeArgs) -> Self {
        let expected_status = if args.expect_success {
            Some(httpcheck_core::domain::SUCCESS_STATUS_CODE)
        } else {
            args.expected_status.or(self.expected_status)
        };

        Self {
            host: args.host.or(self.host),
            root: args.root.or(self.root),
            path: args.path.or(self.path),
            uri_file: args.uri_file.or(self.uri_file),
            uri_query: args.uri_query.or(self.uri_query),
            expected_status,
            invalid_words: if !args.invalid_words.is_empty() {
                args.invalid_words
            } else if !args.invalid_word_list.is_empty() {
                args.invalid_word_list
            } else {
                self.invalid_words
            },
            timeout_secs: args.timeout_secs.or(self.timeout_secs),
            format: args.format.or(self.format),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Freeze the settings into a validated probe configuration
    pub fn probe_config(&self) -> std::result::Result<ProbeConfig, AppError> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| AppError::Config("host is not set (use --host)".to_string()))?;

        let mut server = TargetServer::new(host);
        if let Some(root) = &self.root {
            server = server.with_root(root);
        }

        let mut builder = ProbeConfig::builder(server).invalid_words_are(self.invalid_words.clone());

        if let Some(path) = &self.path {
            builder = builder.path(path.as_str());
        }

        match (&self.uri_file, &self.uri_query) {
            (Some(file), query) => {
                builder = builder.base_uri_in_file(file, query.clone().unwrap_or_default());
            }
            (None, Some(_)) => {
                return Err(AppError::Config(
                    "uri_query is set but uri_file is not".to_string(),
                ))
            }
            (None, None) => {}
        }

        if let Some(status) = self.expected_status {
            builder = builder.expect_status(status);
        }

        Ok(builder.build()?)
    }
}
