//! Probe outcome classification
//!
//! Pure classification of an HTTP response into a [`ProbeOutcome`].
//! Transport failures never reach this function; the prober maps them to
//! `ConnectionError` before a status code exists.

use crate::report::ProbeOutcome;

/// Case-insensitive keywords that mark a 200 body as an application-level
/// failure.
const FAILURE_KEYWORDS: [&str; 3] = ["FAILED", "ERROR", "CRITICAL"];

/// Classifies a completed HTTP exchange.
///
/// Priority order: 5xx, then 404, then body inspection for 200, then the
/// generic catch-all carrying the status code.
pub fn classify(status: u16, body: &str) -> ProbeOutcome {
    if (500..=599).contains(&status) {
        return ProbeOutcome::ServerError { status };
    }
    if status == 404 {
        return ProbeOutcome::NotFound;
    }
    if status == 200 {
        return match failing_line(body) {
            Some(line) => ProbeOutcome::ContentFailure {
                detail: line.to_string(),
            },
            None => ProbeOutcome::Ok,
        };
    }
    ProbeOutcome::HttpError { status }
}

/// Returns the first body line containing a failure keyword.
fn failing_line(body: &str) -> Option<&str> {
    body.lines().find(|line| {
        let upper = line.to_uppercase();
        FAILURE_KEYWORDS.iter().any(|kw| upper.contains(kw))
    })
}
