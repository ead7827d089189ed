// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Only two things can stop a probe from producing an outcome: an invalid
/// configuration (caught once, at build time) and a transport failure that
/// produced no HTTP response at all. Everything else is reported as an
/// Alert entry inside the outcome.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Transport error: {0}")]
    Transport(#[from] crate::port::TransportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
