//! techops - DevOps status reporter
//!
//! This library checks the health of deployed services across the fixed set
//! of environments (lab, qa, sat, prod). Health-check endpoints are not
//! configured directly; they are derived from the nginx location fragments
//! of an externally checked-out configuration repository.
//!
//! # Core Concepts
//!
//! - **Fragment discovery**: per-service `.conf` fragments are matched by
//!   name prefix; their declared `location` paths and an extern/intern
//!   visibility marker drive URL construction
//! - **Target expansion**: every (environment, path, suffix) combination
//!   becomes one probe URL, using per-visibility host templates
//! - **Probing**: one HTTP GET per target with a fixed timeout and no
//!   retries, fanned out with bounded concurrency
//! - **Reporting**: outcomes aggregate per (environment, service); a single
//!   failing target makes the service unhealthy in that environment
//!
//! # Example Usage
//!
//! ```no_run
//! use techops::{StatusConfig, StatusService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StatusConfig::default();
//! let service = StatusService::new(config)?;
//!
//! let report = service.generate(&["orders".to_string()]).await?;
//! for env in report.environments() {
//!     println!("{}: healthy = {}", env, report.is_healthy(*env, "orders"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`discovery`]: configuration fragment scanning
//! - [`probe`]: target construction, HTTP probing, outcome classification
//! - [`report`]: environments, outcomes, and report aggregation
//! - [`status`]: the orchestrating service

// Public modules
pub mod cli;
pub mod config;
pub mod discovery;
pub mod probe;
pub mod report;
pub mod status;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, HostRules, StatusConfig};
pub use discovery::{ConfigFragment, DiscoveryError, FragmentScanner, Visibility};
pub use probe::target::ProbeTarget;
pub use probe::Prober;
pub use report::{Environment, ProbeOutcome, ProbeResult, Report, ReportSummary};
pub use status::{ServiceError, StatusService};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
