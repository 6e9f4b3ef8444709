//! Probe target construction
//!
//! A target is the (service, environment, URL) tuple derived from one
//! fragment location and one suffix. Targets are derived fresh per run and
//! never persisted.

use serde::Serialize;

use crate::config::HostRules;
use crate::discovery::ConfigFragment;
use crate::report::Environment;

/// One concrete health-check endpoint to GET.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeTarget {
    pub service: String,
    pub environment: Environment,
    pub url: String,
}

/// Expands a fragment into the full (environment x path x suffix) matrix.
///
/// Environment-major order: all targets for the first environment come
/// first. No deduplication; two fragments declaring the same path will
/// produce the same URL twice, which is accepted behavior.
pub fn build_targets(
    service: &str,
    fragment: &ConfigFragment,
    suffixes: &[String],
    environments: &[Environment],
    host_rules: &HostRules,
) -> Vec<ProbeTarget> {
    let mut targets = Vec::with_capacity(environments.len() * fragment.locations.len() * suffixes.len());

    for env in environments {
        let host = host_rules.host_for(*env, fragment.visibility);
        for location in &fragment.locations {
            for suffix in suffixes {
                targets.push(ProbeTarget {
                    service: service.to_string(),
                    environment: *env,
                    url: join_url(&host, location, suffix),
                });
            }
        }
    }

    targets
}

/// Joins host + location + suffix, inserting the '/' the nginx fragments
/// usually carry on the location but sometimes omit.
fn join_url(host: &str, location: &str, suffix: &str) -> String {
    if location.ends_with('/') {
        format!("{}{}{}", host, location, suffix)
    } else {
        format!("{}{}/{}", host, location, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Visibility;

    fn fragment(visibility: Visibility, locations: &[&str]) -> ConfigFragment {
        ConfigFragment {
            file_name: "orders-extern.conf".to_string(),
            visibility,
            locations: locations.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn suffixes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_target_count_is_envs_times_paths_times_suffixes() {
        let frag = fragment(Visibility::External, &["/orders/api/", "/orders/admin/"]);
        let sfx = suffixes(&["v1/statuscheck", "v1/resourcecheck", "v1/resourceinspect"]);

        let targets = build_targets(
            "orders",
            &frag,
            &sfx,
            &Environment::ALL,
            &HostRules::default(),
        );

        assert_eq!(targets.len(), 4 * 2 * 3);
    }

    #[test]
    fn test_environment_major_order() {
        let frag = fragment(Visibility::External, &["/orders/api/"]);
        let sfx = suffixes(&["v1/statuscheck", "v1/resourcecheck"]);

        let targets = build_targets(
            "orders",
            &frag,
            &sfx,
            &Environment::ALL,
            &HostRules::default(),
        );

        let envs: Vec<Environment> = targets.iter().map(|t| t.environment).collect();
        assert_eq!(
            envs,
            vec![
                Environment::Lab,
                Environment::Lab,
                Environment::Qa,
                Environment::Qa,
                Environment::Sat,
                Environment::Sat,
                Environment::Prod,
                Environment::Prod,
            ]
        );
    }

    #[test]
    fn test_urls_use_visibility_hosts() {
        let frag = fragment(Visibility::Internal, &["/orders/api/"]);
        let sfx = suffixes(&["healthcheck"]);

        let targets = build_targets(
            "orders",
            &frag,
            &sfx,
            &Environment::ALL,
            &HostRules::default(),
        );

        assert_eq!(
            targets[0].url,
            "https://lab01.int.onvio.com.br/orders/api/healthcheck"
        );
        assert_eq!(
            targets[3].url,
            "https://prod.int.onvio.com.br/orders/api/healthcheck"
        );
    }

    #[test]
    fn test_join_inserts_missing_slash() {
        let frag = fragment(Visibility::External, &["/orders/api"]);
        let sfx = suffixes(&["v1/statuscheck"]);

        let targets = build_targets(
            "orders",
            &frag,
            &sfx,
            &[Environment::Lab],
            &HostRules::default(),
        );

        assert_eq!(
            targets[0].url,
            "https://lab01.onvio.com.br/orders/api/v1/statuscheck"
        );
    }

    #[test]
    fn test_no_deduplication_across_calls() {
        let frag = fragment(Visibility::External, &["/orders/api/"]);
        let sfx = suffixes(&["healthcheck"]);

        let first = build_targets(
            "orders",
            &frag,
            &sfx,
            &[Environment::Lab],
            &HostRules::default(),
        );
        let second = build_targets(
            "orders",
            &frag,
            &sfx,
            &[Environment::Lab],
            &HostRules::default(),
        );

        assert_eq!(first, second);
    }
}
