//! End-to-end status reporting tests
//!
//! These tests run the full pipeline - fragment discovery, target expansion,
//! probing, aggregation - against a temporary fragment checkout and a mockito
//! stub server. Host templates are pointed at the stub server with the
//! environment name folded into the path, so all four environments resolve to
//! the same listener.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use techops::{Environment, HostRules, ProbeOutcome, StatusConfig, StatusService};

fn write_fragment(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("Failed to write fragment");
}

/// Config whose host templates route every environment to the stub server.
fn stub_config(root: &Path, server_url: &str) -> StatusConfig {
    StatusConfig {
        config_root: root.to_path_buf(),
        host_rules: HostRules {
            external_host: format!("{}/{{env}}01", server_url),
            internal_host: format!("{}/{{env}}01/int", server_url),
            prod_external_host: format!("{}/prod", server_url),
            prod_internal_host: format!("{}/prod/int", server_url),
        },
        ..StatusConfig::default()
    }
}

#[tokio::test]
async fn test_two_locations_three_suffixes_four_envs_all_healthy() {
    let dir = TempDir::new().unwrap();
    write_fragment(
        &dir,
        "orders-extern.conf",
        "location /orders/api/ {\n    proxy_pass http://orders;\n}\n\
         location /orders/admin/ {\n    proxy_pass http://orders;\n}\n",
    );

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            mockito::Matcher::Regex(
                r"^/(lab01|qa01|sat01|prod)/orders/(api|admin)/v1/(statuscheck|resourcecheck|resourceinspect)$"
                    .to_string(),
            ),
        )
        .with_status(200)
        .with_body("all systems nominal\n")
        .expect(24)
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service.generate(&["orders".to_string()]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.total_targets(), 24);
    for env in Environment::ALL {
        let counts = report.counts_for(env, "orders");
        assert_eq!(counts.ok, 6, "expected 6 ok targets in {}", env);
        assert_eq!(counts.failures(), 0);
        assert!(report.is_healthy(env, "orders"));
    }
    assert!(report.warnings().is_empty());
}

#[tokio::test]
async fn test_reserved_prefix_uses_single_healthcheck_suffix() {
    let dir = TempDir::new().unwrap();
    write_fragment(
        &dir,
        "bremployeeportal-x-intern.conf",
        "location /portal/ { }\n",
    );

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            mockito::Matcher::Regex(
                r"^/(lab01|qa01|sat01|prod)/int/portal/healthcheck$".to_string(),
            ),
        )
        .with_status(200)
        .with_body("ok\n")
        .expect(4)
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service
        .generate(&["bremployeeportal-x".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    // 1 location x 1 suffix x 4 environments
    assert_eq!(report.total_targets(), 4);
    for env in Environment::ALL {
        assert!(report.is_healthy(env, "bremployeeportal-x"));
    }
}

#[tokio::test]
async fn test_content_failure_takes_precedence_over_ok() {
    let dir = TempDir::new().unwrap();
    write_fragment(
        &dir,
        "bremployeeportal-x-extern.conf",
        "location /portal/ { }\n",
    );

    let mut server = mockito::Server::new_async().await;
    // Clean responses for qa/sat/prod, failing body for lab. Created after
    // the catch-all so mockito's last-created-wins matching picks it first.
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/(qa01|sat01|prod)/portal/healthcheck$".to_string()),
        )
        .with_status(200)
        .with_body("status: green\n")
        .create_async()
        .await;
    server
        .mock("GET", "/lab01/portal/healthcheck")
        .with_status(200)
        .with_body("check 1: passed\nbatch job FAILED at step 3\ncheck 3: passed\n")
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service
        .generate(&["bremployeeportal-x".to_string()])
        .await
        .unwrap();

    let lab_results = report.results_for(Environment::Lab, "bremployeeportal-x");
    assert_eq!(lab_results.len(), 1);
    assert_eq!(
        lab_results[0].outcome,
        ProbeOutcome::ContentFailure {
            detail: "batch job FAILED at step 3".to_string()
        }
    );
    assert!(!report.is_healthy(Environment::Lab, "bremployeeportal-x"));
    assert!(report.is_healthy(Environment::Qa, "bremployeeportal-x"));
    assert!(report.is_healthy(Environment::Sat, "bremployeeportal-x"));
    assert!(report.is_healthy(Environment::Prod, "bremployeeportal-x"));
}

#[tokio::test]
async fn test_mixed_outcomes_are_recorded_not_fatal() {
    let dir = TempDir::new().unwrap();
    write_fragment(&dir, "orders-extern.conf", "location /orders/ { }\n");

    let mut server = mockito::Server::new_async().await;
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/lab01/orders/v1/.*$".to_string()),
        )
        .with_status(503)
        .create_async()
        .await;
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/qa01/orders/v1/.*$".to_string()),
        )
        .with_status(404)
        .create_async()
        .await;
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/(sat01|prod)/orders/v1/.*$".to_string()),
        )
        .with_status(200)
        .with_body("fine\n")
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service.generate(&["orders".to_string()]).await.unwrap();

    assert_eq!(report.counts_for(Environment::Lab, "orders").server_error, 3);
    assert_eq!(report.counts_for(Environment::Qa, "orders").not_found, 3);
    assert_eq!(report.counts_for(Environment::Sat, "orders").ok, 3);
    assert_eq!(report.counts_for(Environment::Prod, "orders").ok, 3);
    assert!(!report.is_healthy(Environment::Lab, "orders"));
    assert!(report.is_healthy(Environment::Prod, "orders"));
}

#[tokio::test]
async fn test_unknown_service_gets_entries_and_warning_while_others_probe() {
    let dir = TempDir::new().unwrap();
    write_fragment(&dir, "orders-extern.conf", "location /orders/ { }\n");

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("ok\n")
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service
        .generate(&["orders".to_string(), "ghost".to_string()])
        .await
        .unwrap();

    // Caller-supplied service order is preserved.
    assert_eq!(report.services(), &["orders".to_string(), "ghost".to_string()]);
    for env in Environment::ALL {
        assert_eq!(report.counts_for(env, "ghost").total(), 0);
        assert!(!report.is_healthy(env, "ghost"));
        assert_eq!(report.counts_for(env, "orders").total(), 3);
    }
    assert!(report
        .warnings()
        .iter()
        .any(|w| w.contains("no matching config fragments for 'ghost'")));
}

#[tokio::test]
async fn test_ambiguous_fragment_produces_no_targets() {
    let dir = TempDir::new().unwrap();
    write_fragment(&dir, "svca.conf", "location /api { }\n");

    let server = mockito::Server::new_async().await;
    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service.generate(&["svcA".to_string()]).await.unwrap();

    assert_eq!(report.total_targets(), 0);
    assert!(report
        .warnings()
        .iter()
        .any(|w| w.contains("no extern/intern marker")));
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_reports() {
    let dir = TempDir::new().unwrap();
    write_fragment(&dir, "orders-intern.conf", "location /orders/ { }\n");

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("step 2 ERROR\n")
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let first = service.generate(&["orders".to_string()]).await.unwrap();
    let second = service.generate(&["orders".to_string()]).await.unwrap();

    assert_eq!(first, second);
    for env in Environment::ALL {
        assert_eq!(first.counts_for(env, "orders").content_failure, 3);
    }
}

#[tokio::test]
async fn test_service_names_are_lowercased_before_matching() {
    let dir = TempDir::new().unwrap();
    write_fragment(&dir, "orders-extern.conf", "location /orders/ { }\n");

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("ok\n")
        .create_async()
        .await;

    let service = StatusService::new(stub_config(dir.path(), &server.url())).unwrap();
    let report = service.generate(&["ORDERS".to_string()]).await.unwrap();

    // The report keys by the normalized name.
    assert_eq!(report.services(), &["orders".to_string()]);
    assert_eq!(report.counts_for(Environment::Lab, "orders").total(), 3);
}
