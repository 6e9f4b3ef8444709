//! Status service orchestration
//!
//! `StatusService` ties the pipeline together: discover fragments for each
//! requested service, select the suffix set, expand the target matrix, fan
//! out the probes, and fold everything into a [`Report`].
//!
//! Failure semantics: anything scoped to one target or one service is
//! recorded in the report and the run continues. Only an empty service list,
//! an invalid service name, or an unusable config root aborts, and all of
//! those abort before the first probe is sent.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, StatusConfig};
use crate::discovery::{DiscoveryError, FragmentScanner};
use crate::probe::target::build_targets;
use crate::probe::Prober;
use crate::report::Report;

/// Errors that can occur during status service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No service names were supplied
    #[error("No services supplied")]
    NoServices,

    /// A supplied service name is empty or blank
    #[error("Invalid service name: '{0}'")]
    InvalidServiceName(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configuration source is unusable
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// HTTP client construction failed
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ServiceError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            ServiceError::NoServices => "Error: No services supplied\n\n\
                Help: Provide at least one service name:\n  \
                techops status <SERVICE>..."
                .to_string(),
            ServiceError::InvalidServiceName(name) => {
                format!(
                    "Error: Invalid service name: '{}'\n\n\
                    Help: Service names must be non-empty. Check for stray\n\
                    quotes or trailing commas in the argument list.",
                    name
                )
            }
            ServiceError::Discovery(DiscoveryError::ConfigRootNotFound(path)) => {
                format!(
                    "Error: Configuration root not found\nPath: {}\n\n\
                    Help: The fragment checkout is missing. Try:\n\
                    - Run the checkout tooling that provisions it\n\
                    - Point at an existing checkout: --config-root <PATH>\n\
                    - Or set TECHOPS_CONFIG_ROOT",
                    path.display()
                )
            }
            ServiceError::Discovery(DiscoveryError::NotADirectory(path)) => {
                format!(
                    "Error: Configuration root is not a directory\nPath: {}\n\n\
                    Help: --config-root must point at the directory that\n\
                    holds the nginx location fragments.",
                    path.display()
                )
            }
            ServiceError::Discovery(err) => {
                format!(
                    "Error: Failed to read the configuration root\n\n\
                    Help: Check permissions on the checkout directory.\n\n\
                    Details: {}",
                    err
                )
            }
            ServiceError::Config(err) => {
                format!(
                    "Error: Configuration error\n\n\
                    Help: Check CLI flags and TECHOPS_* environment variables.\n\n\
                    Details: {}",
                    err
                )
            }
            ServiceError::HttpClient(err) => {
                format!(
                    "Error: Failed to initialize the HTTP client\n\n\
                    Details: {}",
                    err
                )
            }
        }
    }
}

/// High-level status reporter.
pub struct StatusService {
    config: StatusConfig,
    scanner: FragmentScanner,
    prober: Prober,
}

impl StatusService {
    /// Creates a service from a validated configuration.
    pub fn new(config: StatusConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        let scanner = FragmentScanner::new(config.config_root.clone());
        let prober = Prober::new(
            Duration::from_secs(config.probe_timeout_secs),
            config.concurrency,
        )?;
        Ok(Self {
            config,
            scanner,
            prober,
        })
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    /// Generates a health report for the requested services.
    ///
    /// Services are processed in caller order; every (environment, service)
    /// pair appears in the report even when no targets were found.
    pub async fn generate(&self, services: &[String]) -> Result<Report, ServiceError> {
        if services.is_empty() {
            return Err(ServiceError::NoServices);
        }

        let mut normalized = Vec::with_capacity(services.len());
        for service in services {
            let name = service.trim().to_lowercase();
            if name.is_empty() {
                return Err(ServiceError::InvalidServiceName(service.clone()));
            }
            normalized.push(name);
        }

        let started = Instant::now();
        let mut report = Report::new(&self.config.environments, &normalized);
        let mut all_targets = Vec::new();

        // Discovery runs to completion before any probe is sent; a broken
        // config root aborts here, per-service misses do not.
        for service in &normalized {
            let (fragments, warnings) = self.scanner.discover(service)?;
            for warning in warnings {
                report.warn(warning);
            }

            if fragments.is_empty() {
                warn!(service = %service, "no matching config fragments");
                report.warn(format!("no matching config fragments for '{}'", service));
                continue;
            }

            let suffixes = self.config.suffixes_for(service);
            for fragment in &fragments {
                let targets = build_targets(
                    service,
                    fragment,
                    suffixes,
                    &self.config.environments,
                    &self.config.host_rules,
                );
                info!(
                    service = %service,
                    fragment = %fragment.file_name,
                    targets = targets.len(),
                    "built probe targets"
                );
                all_targets.extend(targets);
            }
        }

        let total = all_targets.len();
        for result in self.prober.probe_all(all_targets).await {
            report.record(result);
        }

        info!(
            services = normalized.len(),
            targets = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "status report generated"
        );

        Ok(report)
    }
}
