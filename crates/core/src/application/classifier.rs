// Response Classification
// Turns one HTTP response into Good/Alert entries

use tracing::{debug, warn};
use url::Url;

use crate::domain::ProbeOutcome;
use crate::port::HttpResponse;

/// Expectations a response is checked against
///
/// The rules:
/// - no expected status: any status that came back is Good
/// - expected status matches: Good, then the body is scanned
/// - expected status differs: one Alert, and the body is NOT scanned
/// - body scan: a single Alert listing every configured word when at least
///   one of them occurs (case-sensitive substring)
#[derive(Debug, Clone, Copy)]
pub struct ResponseClassifier<'a> {
    expected_status: Option<u16>,
    invalid_words: &'a [String],
}

impl<'a> ResponseClassifier<'a> {
    pub fn new(expected_status: Option<u16>, invalid_words: &'a [String]) -> Self {
        Self {
            expected_status,
            invalid_words,
        }
    }

    /// Append the entries for `response` (requested from `uri`) to `outcome`
    pub fn classify(&self, uri: &Url, response: &HttpResponse, outcome: &mut ProbeOutcome) {
        let status = status_line(response);

        match self.expected_status {
            Some(expected) if response.status != expected => {
                warn!(uri = %uri, expected, actual = response.status, "Unexpected status code");
                outcome.add_alert(format!(
                    "Got response from {} with invalid status code {}",
                    uri, status
                ));
            }
            _ => {
                outcome.add_good(format!("Got response from {}: {}", uri, status));
                self.scan_content(uri, response, outcome);
            }
        }
    }

    fn scan_content(&self, uri: &Url, response: &HttpResponse, outcome: &mut ProbeOutcome) {
        if self.invalid_words.is_empty() {
            return;
        }

        let found: Vec<&str> = self
            .invalid_words
            .iter()
            .filter(|word| response.body.contains(word.as_str()))
            .map(String::as_str)
            .collect();

        if found.is_empty() {
            debug!(uri = %uri, "Response content is clean");
            return;
        }

        warn!(uri = %uri, found = ?found, "Response contains invalid words");
        outcome.add_alert(format!(
            "Response from {} contains one of {} which may indicate errors in configuration of service",
            uri,
            self.invalid_words.join(", ")
        ));
    }
}

fn status_line(response: &HttpResponse) -> String {
    if response.reason.is_empty() {
        response.status.to_string()
    } else {
        format!("{} {}", response.status, response.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn uri() -> Url {
        Url::parse("http://test-server.com/health").unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn classify(
        expected: Option<u16>,
        invalid_words: &[String],
        response: HttpResponse,
    ) -> ProbeOutcome {
        let mut outcome = ProbeOutcome::new();
        ResponseClassifier::new(expected, invalid_words).classify(&uri(), &response, &mut outcome);
        outcome
    }

    #[test]
    fn test_any_status_is_good_without_expectation() {
        let outcome = classify(None, &[], HttpResponse::new(404, "Not Found", "missing"));

        assert_eq!(outcome.severities(), vec![Severity::Good]);
        assert_eq!(
            outcome.messages(),
            vec!["Got response from http://test-server.com/health: 404 Not Found"]
        );
    }

    #[test]
    fn test_matching_status_is_good() {
        let outcome = classify(Some(200), &[], HttpResponse::new(200, "OK", "fine"));
        assert_eq!(outcome.severities(), vec![Severity::Good]);
    }

    #[test]
    fn test_mismatching_status_alerts_and_skips_scan() {
        let invalid = words(&["error"]);
        let outcome = classify(
            Some(200),
            &invalid,
            HttpResponse::new(500, "Internal Server Error", "error"),
        );

        assert_eq!(outcome.severities(), vec![Severity::Alert]);
        assert_eq!(
            outcome.messages(),
            vec![
                "Got response from http://test-server.com/health with invalid status code 500 Internal Server Error"
            ]
        );
    }

    #[test]
    fn test_invalid_word_alert_lists_all_words() {
        let invalid = words(&["html", "Exception"]);
        let outcome = classify(None, &invalid, HttpResponse::new(200, "OK", "<html></html>"));

        assert_eq!(outcome.severities(), vec![Severity::Good, Severity::Alert]);
        assert_eq!(
            outcome.messages()[1],
            "Response from http://test-server.com/health contains one of html, Exception which may indicate errors in configuration of service"
        );
    }

    #[test]
    fn test_word_match_is_case_sensitive() {
        let invalid = words(&["HTML"]);
        let outcome = classify(None, &invalid, HttpResponse::new(200, "OK", "<html></html>"));
        assert_eq!(outcome.severities(), vec![Severity::Good]);
    }

    #[test]
    fn test_scan_runs_on_error_status_without_expectation() {
        let invalid = words(&["Stack trace"]);
        let outcome = classify(
            None,
            &invalid,
            HttpResponse::new(500, "Internal Server Error", "Stack trace: ..."),
        );
        assert_eq!(outcome.severities(), vec![Severity::Good, Severity::Alert]);
    }

    #[test]
    fn test_unknown_reason_is_omitted() {
        let outcome = classify(None, &[], HttpResponse::new(599, "", ""));
        assert_eq!(
            outcome.messages(),
            vec!["Got response from http://test-server.com/health: 599"]
        );
    }
}
