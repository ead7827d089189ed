// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Server name must not be empty")]
    EmptyServerName,

    #[error("Invalid expected status code: {0} (must be within 100..=999)")]
    InvalidStatusCode(u16),

    #[error("File to get base uri from must not be empty")]
    EmptyBaseUriFile,

    #[error("Invalid word at position {0} must not be empty")]
    EmptyInvalidWord(usize),
}

pub type Result<T> = std::result::Result<T, DomainError>;
