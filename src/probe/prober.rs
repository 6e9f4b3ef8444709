//! HTTP prober
//!
//! Issues one GET per target with a fixed timeout and no retries, then fans
//! the classification results back in target-build order. The bounded
//! `buffer_unordered` fan-out keeps at most `concurrency` probes in flight
//! so target hosts are not overwhelmed.

use futures_util::stream::{self, StreamExt};
use std::time::Duration;
use tracing::trace;

use crate::probe::classify::classify;
use crate::probe::target::ProbeTarget;
use crate::report::{ProbeOutcome, ProbeResult};

pub struct Prober {
    client: reqwest::Client,
    concurrency: usize,
}

impl Prober {
    /// Creates a prober with a per-request timeout and an in-flight cap.
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            concurrency,
        })
    }

    /// Probes one target. A single attempt is authoritative: transport
    /// failures become `ConnectionError` rather than being retried.
    pub async fn probe(&self, target: ProbeTarget) -> ProbeResult {
        trace!(url = %target.url, "probing");
        let outcome = match self.client.get(&target.url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(body) => classify(status, &body),
                    Err(err) => ProbeOutcome::ConnectionError {
                        message: describe_transport_error(&err),
                    },
                }
            }
            Err(err) => ProbeOutcome::ConnectionError {
                message: describe_transport_error(&err),
            },
        };
        ProbeResult { target, outcome }
    }

    /// Probes every target with bounded concurrency.
    ///
    /// Completion order is arbitrary; results are re-paired with their build
    /// index before returning, so aggregation downstream is order-stable.
    pub async fn probe_all(&self, targets: Vec<ProbeTarget>) -> Vec<ProbeResult> {
        let mut indexed: Vec<(usize, ProbeResult)> =
            stream::iter(targets.into_iter().enumerate())
                .map(|(idx, target)| async move { (idx, self.probe(target).await) })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
