// Probe Service - runs a probe in the requested mode

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::probe_task::ProbeTask;
use crate::domain::{ProbeConfig, ProbeOutcome};
use crate::error::Result;
use crate::port::{DocumentQuery, HttpTransport};

/// Which half of the two-phase contract to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbeMode {
    /// Dry run: resolve the URI only
    Verify,
    /// Resolve, GET and classify
    Execute,
}

impl std::fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMode::Verify => write!(f, "VERIFY"),
            ProbeMode::Execute => write!(f, "EXECUTE"),
        }
    }
}

/// Binds probe configurations to the adapters they run against
pub struct ProbeService {
    transport: Arc<dyn HttpTransport>,
    documents: Arc<dyn DocumentQuery>,
}

impl ProbeService {
    pub fn new(transport: Arc<dyn HttpTransport>, documents: Arc<dyn DocumentQuery>) -> Self {
        Self {
            transport,
            documents,
        }
    }

    /// Create a task bound to this service's adapters
    pub fn task(&self, config: ProbeConfig) -> ProbeTask {
        ProbeTask::new(config, self.transport.clone(), self.documents.clone())
    }

    /// Run one probe
    ///
    /// # Errors
    /// - AppError::Transport if `Execute` could not reach the server at all
    pub async fn run(&self, config: ProbeConfig, mode: ProbeMode) -> Result<ProbeOutcome> {
        let task = self.task(config);
        info!(task = task.name(), server = %task.config().server().name(), mode = %mode, "Running probe");

        let outcome = match mode {
            ProbeMode::Verify => task.verify_can_run().await,
            ProbeMode::Execute => task.execute().await?,
        };

        info!(
            entries = outcome.len(),
            alerts = outcome.has_alerts(),
            "Probe finished"
        );
        Ok(outcome)
    }
}
