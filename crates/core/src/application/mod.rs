// Application Layer - Use Cases and Business Logic

pub mod classifier;
pub mod probe_service;
pub mod probe_task;
pub mod uri_resolver;

// Re-exports
pub use classifier::ResponseClassifier;
pub use probe_service::{ProbeMode, ProbeService};
pub use probe_task::ProbeTask;
pub use uri_resolver::{ResolutionError, UriResolver};
