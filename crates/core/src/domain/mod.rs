// Domain Layer - Probe configuration and outcome model

pub mod error;
pub mod outcome;
pub mod probe;
pub mod server;

// Re-exports
pub use error::DomainError;
pub use outcome::{OutcomeEntry, ProbeOutcome, Severity};
pub use probe::{BaseUriSource, ProbeConfig, ProbeConfigBuilder, SUCCESS_STATUS_CODE};
pub use server::TargetServer;
