// Probe Task - the two-phase contract (verify / execute)

use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use super::classifier::ResponseClassifier;
use super::uri_resolver::UriResolver;
use crate::domain::{ProbeConfig, ProbeOutcome};
use crate::port::{DocumentQuery, HttpTransport, TransportError};

/// Resolves a URI, GETs it and classifies what came back
///
/// Both entry points start from scratch: neither touches the config and
/// each returns a fresh outcome. Resolution problems end up as a single
/// Alert in the outcome; only a transport failure with no HTTP response
/// escapes as an error from [`ProbeTask::execute`].
pub struct ProbeTask {
    config: ProbeConfig,
    resolver: UriResolver,
    transport: Arc<dyn HttpTransport>,
}

impl ProbeTask {
    pub const NAME: &'static str = "Get given uri content using http";

    pub fn new(
        config: ProbeConfig,
        transport: Arc<dyn HttpTransport>,
        documents: Arc<dyn DocumentQuery>,
    ) -> Self {
        Self {
            config,
            resolver: UriResolver::new(documents),
            transport,
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Check that a URI can be built; no request is made
    pub async fn verify_can_run(&self) -> ProbeOutcome {
        let mut outcome = ProbeOutcome::new();

        if let Some(uri) = self.resolve_into(&mut outcome).await {
            outcome.add_good(format!("Get {}", uri));
        }

        outcome
    }

    /// Resolve the URI, GET it once and classify the response
    ///
    /// # Errors
    /// Returns the transport error when the server could not be reached at all
    /// (DNS, refused connection, timeout). Non-2xx responses are not errors.
    pub async fn execute(&self) -> Result<ProbeOutcome, TransportError> {
        let mut outcome = ProbeOutcome::new();

        let Some(uri) = self.resolve_into(&mut outcome).await else {
            return Ok(outcome);
        };

        info!(uri = %uri, server = %self.config.server().name(), "Probing");
        let response = self.transport.get(&uri).await?;
        info!(uri = %uri, status = response.status, "Got response");

        ResponseClassifier::new(self.config.expected_status(), self.config.invalid_words())
            .classify(&uri, &response, &mut outcome);

        Ok(outcome)
    }

    async fn resolve_into(&self, outcome: &mut ProbeOutcome) -> Option<Url> {
        match self.resolver.resolve(&self.config).await {
            Ok(uri) => Some(uri),
            Err(e) => {
                warn!(server = %self.config.server().name(), error = %e, "Uri resolution failed");
                outcome.add_alert(e.to_string());
                None
            }
        }
    }
}
