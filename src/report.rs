//! Report model for status probing
//!
//! This module defines the closed environment set, the probe outcome taxonomy,
//! and the `Report` accumulator that groups probe results by (environment,
//! service) pair. A report always carries exactly one entry per (environment,
//! requested service) pair, even when discovery produced zero targets for a
//! service, so consumers can distinguish "unknown service" from "omitted".

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::probe::target::ProbeTarget;

/// Deployment tier. The set is closed and the declared order is the report
/// iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Lab,
    Qa,
    Sat,
    Prod,
}

impl Environment {
    /// All environments in declared promotion order.
    pub const ALL: [Environment; 4] = [
        Environment::Lab,
        Environment::Qa,
        Environment::Sat,
        Environment::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Lab => "lab",
            Environment::Qa => "qa",
            Environment::Sat => "sat",
            Environment::Prod => "prod",
        }
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Environment::Prod)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single probe attempt.
///
/// One probe yields exactly one outcome; there are no retries, so a timed-out
/// or errored probe is terminal for that target in that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// HTTP 200 with a clean body.
    Ok,
    /// HTTP 404.
    NotFound,
    /// HTTP status in [500, 599].
    ServerError { status: u16 },
    /// HTTP 200 whose body contains a line with a failure keyword.
    ContentFailure { detail: String },
    /// Transport-level failure: DNS, refused connection, timeout.
    ConnectionError { message: String },
    /// Any other HTTP status.
    HttpError { status: u16 },
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok)
    }

    /// Stable short name used in counts and human output.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeOutcome::Ok => "ok",
            ProbeOutcome::NotFound => "not_found",
            ProbeOutcome::ServerError { .. } => "server_error",
            ProbeOutcome::ContentFailure { .. } => "content_failure",
            ProbeOutcome::ConnectionError { .. } => "connection_error",
            ProbeOutcome::HttpError { .. } => "http_error",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Ok => write!(f, "ok"),
            ProbeOutcome::NotFound => write!(f, "not found (404)"),
            ProbeOutcome::ServerError { status } => write!(f, "server error ({})", status),
            ProbeOutcome::ContentFailure { detail } => write!(f, "content failure: {}", detail),
            ProbeOutcome::ConnectionError { message } => write!(f, "connection error: {}", message),
            ProbeOutcome::HttpError { status } => write!(f, "http {}", status),
        }
    }
}

/// Outcome of one HTTP GET against one [`ProbeTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub target: ProbeTarget,
    pub outcome: ProbeOutcome,
}

/// Per-(environment, service) outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub ok: usize,
    pub not_found: usize,
    pub server_error: usize,
    pub content_failure: usize,
    pub connection_error: usize,
    pub http_error: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Ok => self.ok += 1,
            ProbeOutcome::NotFound => self.not_found += 1,
            ProbeOutcome::ServerError { .. } => self.server_error += 1,
            ProbeOutcome::ContentFailure { .. } => self.content_failure += 1,
            ProbeOutcome::ConnectionError { .. } => self.connection_error += 1,
            ProbeOutcome::HttpError { .. } => self.http_error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok
            + self.not_found
            + self.server_error
            + self.content_failure
            + self.connection_error
            + self.http_error
    }

    pub fn failures(&self) -> usize {
        self.total() - self.ok
    }
}

/// Accumulated probe results for one run.
///
/// Environments iterate in declared order; services iterate in the order the
/// caller requested them. Results within a pair keep target build order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    environments: Vec<Environment>,
    services: Vec<String>,
    results: HashMap<(Environment, String), Vec<ProbeResult>>,
    warnings: Vec<String>,
}

impl Report {
    /// Creates a report pre-seeded with an empty entry for every
    /// (environment, service) pair.
    pub fn new(environments: &[Environment], services: &[String]) -> Self {
        let mut results = HashMap::new();
        for env in environments {
            for service in services {
                results.insert((*env, service.clone()), Vec::new());
            }
        }
        Self {
            environments: environments.to_vec(),
            services: services.to_vec(),
            results,
            warnings: Vec::new(),
        }
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Records one probe result under its (environment, service) pair.
    pub fn record(&mut self, result: ProbeResult) {
        let key = (result.target.environment, result.target.service.clone());
        self.results.entry(key).or_default().push(result);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn results_for(&self, env: Environment, service: &str) -> &[ProbeResult] {
        self.results
            .get(&(env, service.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn counts_for(&self, env: Environment, service: &str) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for result in self.results_for(env, service) {
            counts.record(&result.outcome);
        }
        counts
    }

    /// A service is healthy in an environment only when it has at least one
    /// target there and every target classified ok.
    pub fn is_healthy(&self, env: Environment, service: &str) -> bool {
        let results = self.results_for(env, service);
        !results.is_empty() && results.iter().all(|r| r.outcome.is_ok())
    }

    pub fn total_targets(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    /// Flattens the report into a serializable summary, stamped with the
    /// generation time.
    pub fn summary(&self) -> ReportSummary {
        let environments = self
            .environments
            .iter()
            .map(|env| EnvironmentSummary {
                environment: *env,
                services: self
                    .services
                    .iter()
                    .map(|service| ServiceSummary {
                        service: service.clone(),
                        healthy: self.is_healthy(*env, service),
                        counts: self.counts_for(*env, service),
                        targets: self
                            .results_for(*env, service)
                            .iter()
                            .map(|r| TargetSummary {
                                url: r.target.url.clone(),
                                outcome: r.outcome.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        ReportSummary {
            generated_at: Utc::now(),
            environments,
            warnings: self.warnings.clone(),
        }
    }
}

/// Serializable flattening of a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub environments: Vec<EnvironmentSummary>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSummary {
    pub environment: Environment,
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub service: String,
    pub healthy: bool,
    pub counts: OutcomeCounts,
    pub targets: Vec<TargetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub url: String,
    pub outcome: ProbeOutcome,
}
