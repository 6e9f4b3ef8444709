//! Configuration for the status reporter
//!
//! Settings load from environment variables with sensible defaults and can be
//! overridden per invocation from CLI flags. Everything the probing pipeline
//! treats as policy lives here as data: the environment order, the host
//! templates per visibility, the suffix tables, the probe timeout, and the
//! fan-out cap.
//!
//! # Environment Variables
//!
//! - `TECHOPS_CONFIG_ROOT`: directory holding the checked-out nginx location
//!   fragments - default: "/tmp/techops_status_repo/resources/nginx/etc/nginx/locations"
//! - `TECHOPS_PROBE_TIMEOUT`: per-request timeout in seconds - default: "5"
//! - `TECHOPS_CONCURRENCY`: max in-flight probes - default: "8"
//! - `TECHOPS_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::discovery::Visibility;
use crate::report::Environment;

/// Default values for configuration
const DEFAULT_CONFIG_ROOT: &str = "/tmp/techops_status_repo/resources/nginx/etc/nginx/locations";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CONCURRENCY: usize = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Bounds enforced by [`StatusConfig::validate`]
const MAX_PROBE_TIMEOUT_SECS: u64 = 300;
const MAX_CONCURRENCY: usize = 16;

const DEFAULT_EXTERNAL_HOST: &str = "https://{env}01.onvio.com.br";
const DEFAULT_INTERNAL_HOST: &str = "https://{env}01.int.onvio.com.br";
const DEFAULT_PROD_EXTERNAL_HOST: &str = "https://prod.onvio.com.br";
const DEFAULT_PROD_INTERNAL_HOST: &str = "https://prod.int.onvio.com.br";

/// Default health-check suffixes appended to every declared location path.
pub const DEFAULT_SUFFIXES: [&str; 3] = ["v1/statuscheck", "v1/resourcecheck", "v1/resourceinspect"];

/// Service-name prefix whose services expose a single "healthcheck" endpoint
/// instead of the default suffix set.
pub const RESERVED_HEALTHCHECK_PREFIX: &str = "bremployeeportal";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Host construction rules, one template per visibility.
///
/// Non-prod templates carry an `{env}` placeholder that expands to the
/// environment name (the numeric suffix is part of the template). Prod uses
/// distinct constants with no numeric suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRules {
    /// Non-prod template for externally visible endpoints.
    pub external_host: String,
    /// Non-prod template for internal-only endpoints.
    pub internal_host: String,
    /// Prod host for externally visible endpoints.
    pub prod_external_host: String,
    /// Prod host for internal-only endpoints.
    pub prod_internal_host: String,
}

impl Default for HostRules {
    fn default() -> Self {
        Self {
            external_host: DEFAULT_EXTERNAL_HOST.to_string(),
            internal_host: DEFAULT_INTERNAL_HOST.to_string(),
            prod_external_host: DEFAULT_PROD_EXTERNAL_HOST.to_string(),
            prod_internal_host: DEFAULT_PROD_INTERNAL_HOST.to_string(),
        }
    }
}

impl HostRules {
    /// Resolves the host prefix for an environment and visibility.
    ///
    /// Visibility and environment are inputs here and only here; nothing in
    /// the pipeline infers either back out of a constructed URL.
    pub fn host_for(&self, env: Environment, visibility: Visibility) -> String {
        if env.is_prod() {
            match visibility {
                Visibility::External => self.prod_external_host.clone(),
                Visibility::Internal => self.prod_internal_host.clone(),
            }
        } else {
            let template = match visibility {
                Visibility::External => &self.external_host,
                Visibility::Internal => &self.internal_host,
            };
            template.replace("{env}", env.as_str())
        }
    }
}

/// Main configuration for the status reporter.
///
/// Construct with `Default::default()` to load from environment variables
/// with fallback defaults, then override fields from CLI flags as needed.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Directory containing the checked-out configuration fragments.
    pub config_root: PathBuf,

    /// Environments to probe, in report order.
    pub environments: Vec<Environment>,

    /// Host prefix templates per environment/visibility.
    pub host_rules: HostRules,

    /// Suffixes appended to each location path for ordinary services.
    pub default_suffixes: Vec<String>,

    /// (name-prefix, suffix set) overrides, checked in order.
    pub special_suffix_rules: Vec<(String, Vec<String>)>,

    /// Per-request probe timeout in seconds.
    pub probe_timeout_secs: u64,

    /// Maximum number of in-flight probes.
    pub concurrency: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for StatusConfig {
    /// Loads configuration from `TECHOPS_*` environment variables with
    /// defaults for any missing values.
    fn default() -> Self {
        let config_root = env::var("TECHOPS_CONFIG_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_ROOT));

        let probe_timeout_secs = env::var("TECHOPS_PROBE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);

        let concurrency = env::var("TECHOPS_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_CONCURRENCY);

        let log_level = env::var("TECHOPS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            config_root,
            environments: Environment::ALL.to_vec(),
            host_rules: HostRules::default(),
            default_suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            special_suffix_rules: vec![(
                RESERVED_HEALTHCHECK_PREFIX.to_string(),
                vec!["healthcheck".to_string()],
            )],
            probe_timeout_secs,
            concurrency,
            log_level,
        }
    }
}

impl StatusConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range or a host template
    /// is malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Probe timeout must be at least 1 second".to_string(),
            ));
        }
        if self.probe_timeout_secs > MAX_PROBE_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(format!(
                "Probe timeout cannot exceed {} seconds",
                MAX_PROBE_TIMEOUT_SECS
            )));
        }

        if self.concurrency == 0 {
            return Err(ConfigError::ValidationFailed(
                "Concurrency must be at least 1".to_string(),
            ));
        }
        if self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::ValidationFailed(format!(
                "Concurrency cannot exceed {}",
                MAX_CONCURRENCY
            )));
        }

        if self.environments.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "At least one environment is required".to_string(),
            ));
        }

        if self.default_suffixes.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "At least one default suffix is required".to_string(),
            ));
        }

        for template in [
            &self.host_rules.external_host,
            &self.host_rules.internal_host,
        ] {
            if !template.contains("{env}") {
                return Err(ConfigError::ValidationFailed(format!(
                    "Non-prod host template '{}' is missing the {{env}} placeholder",
                    template
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Selects the suffix set for a service name.
    ///
    /// The first special rule whose prefix matches wins; otherwise the
    /// default set applies. Pure and deterministic given the name.
    pub fn suffixes_for(&self, service_name: &str) -> &[String] {
        let lower = service_name.to_lowercase();
        for (prefix, suffixes) in &self.special_suffix_rules {
            if lower.starts_with(prefix.as_str()) {
                return suffixes;
            }
        }
        &self.default_suffixes
    }
}

impl fmt::Display for StatusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Techops Configuration:")?;
        writeln!(f, "  Config Root: {}", self.config_root.display())?;
        writeln!(
            f,
            "  Environments: {}",
            self.environments
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(f, "  Probe Timeout: {}s", self.probe_timeout_secs)?;
        writeln!(f, "  Concurrency: {}", self.concurrency)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
