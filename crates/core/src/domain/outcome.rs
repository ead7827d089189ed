// Probe Outcome Domain Model

use serde::{Deserialize, Serialize};

/// Severity of a single outcome entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational success
    Good,
    /// Needs operator attention, but the check itself did not fault
    Alert,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Good => write!(f, "GOOD"),
            Severity::Alert => write!(f, "ALERT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub severity: Severity,
    pub message: String,
}

/// Ordered, append-only log produced by one probe invocation
///
/// Entries can only be added; nothing is ever edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    entries: Vec<OutcomeEntry>,
}

impl ProbeOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_good(&mut self, message: impl Into<String>) {
        self.push(Severity::Good, message.into());
    }

    pub fn add_alert(&mut self, message: impl Into<String>) {
        self.push(Severity::Alert, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.entries.push(OutcomeEntry { severity, message });
    }

    pub fn entries(&self) -> &[OutcomeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_alerts(&self) -> bool {
        self.entries.iter().any(|e| e.severity == Severity::Alert)
    }

    pub fn all_good(&self) -> bool {
        self.entries.iter().all(|e| e.severity == Severity::Good)
    }

    pub fn severities(&self) -> Vec<Severity> {
        self.entries.iter().map(|e| e.severity).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutcomeEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ProbeOutcome {
    type Item = &'a OutcomeEntry;
    type IntoIter = std::slice::Iter<'a, OutcomeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
