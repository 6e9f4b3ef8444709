//! Configuration fragment discovery
//!
//! The configuration source is a directory of nginx location fragments,
//! checked out by the surrounding tooling. A fragment belongs to the service
//! whose name prefixes its file name; its visibility is inferred from an
//! "extern"/"intern" substring in the name, and its declared API path
//! prefixes are harvested from `location <path>` tokens.
//!
//! Discovery never fails for a single service: a missing, ambiguous, or
//! path-less fragment degrades to a warning, and an unmatched service yields
//! an empty list. Only an unusable config root is an error.

use regex::Regex;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Whether a fragment's endpoints are reachable publicly or only from the
/// internal network. Drives host-prefix selection during target building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    External,
    Internal,
}

/// One configuration fragment scoped to a single service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFragment {
    /// File name of the fragment, e.g. "orders-extern.conf".
    pub file_name: String,
    pub visibility: Visibility,
    /// Distinct declared path prefixes, in declaration order. Every entry
    /// starts with '/'.
    pub locations: Vec<String>,
}

/// Errors that make the configuration source unusable.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Config root does not exist
    #[error("Configuration root not found: {0}")]
    ConfigRootNotFound(PathBuf),

    /// Config root is not a directory
    #[error("Configuration root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Config root could not be read
    #[error("Failed to read configuration root: {0}")]
    Io(#[from] io::Error),
}

/// Scans a checked-out fragment directory for per-service configuration.
#[derive(Debug)]
pub struct FragmentScanner {
    root: PathBuf,
    location_re: Regex,
}

impl FragmentScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            // Matches `location <path>` up to whitespace or the opening brace.
            location_re: Regex::new(r"location\s+([^\s{]+)").unwrap(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Finds all fragments for a service.
    ///
    /// Matching is a case-insensitive prefix test on `.conf` file names.
    /// Returns the usable fragments plus the warnings produced by skipped
    /// entries. An empty fragment list means "unknown service" and is not an
    /// error.
    pub fn discover(
        &self,
        service_name: &str,
    ) -> Result<(Vec<ConfigFragment>, Vec<String>), DiscoveryError> {
        if !self.root.exists() {
            return Err(DiscoveryError::ConfigRootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(DiscoveryError::NotADirectory(self.root.clone()));
        }

        let needle = service_name.to_lowercase();
        let mut fragments = Vec::new();
        let mut warnings = Vec::new();

        let mut file_names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                file_names.push(name.to_string());
            }
        }
        // read_dir order is platform-dependent
        file_names.sort();

        for file_name in file_names {
            let lower = file_name.to_lowercase();
            if !lower.ends_with(".conf") || !lower.starts_with(&needle) {
                continue;
            }

            // "extern" is tested first; a name carrying both substrings is
            // treated as external, matching the historical behavior.
            let visibility = if lower.contains("extern") {
                Visibility::External
            } else if lower.contains("intern") {
                Visibility::Internal
            } else {
                warn!(fragment = %file_name, "fragment visibility is ambiguous, skipping");
                warnings.push(format!(
                    "fragment '{}' has no extern/intern marker; skipped",
                    file_name
                ));
                continue;
            };

            let path = self.root.join(&file_name);
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(fragment = %file_name, error = %err, "failed to read fragment, skipping");
                    warnings.push(format!("fragment '{}' could not be read: {}", file_name, err));
                    continue;
                }
            };

            let locations = self.extract_locations(&content);
            if locations.is_empty() {
                warn!(fragment = %file_name, "fragment declares no API locations, skipping");
                warnings.push(format!(
                    "fragment '{}' declares no API locations; skipped",
                    file_name
                ));
                continue;
            }

            debug!(
                fragment = %file_name,
                visibility = ?visibility,
                locations = locations.len(),
                "discovered fragment"
            );
            fragments.push(ConfigFragment {
                file_name,
                visibility,
                locations,
            });
        }

        Ok((fragments, warnings))
    }

    /// Harvests distinct `location` paths starting with '/'.
    fn extract_locations(&self, content: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for captures in self.location_re.captures_iter(content) {
            let path = captures[1].trim().to_string();
            if path.starts_with('/') && !seen.contains(&path) {
                seen.push(path);
            }
        }
        seen
    }
}
