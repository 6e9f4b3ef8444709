//! Subcommand handlers
//!
//! Each handler builds its runtime configuration from CLI flags layered over
//! the environment defaults, runs the operation, and returns a process exit
//! code. User-facing error text goes through `ServiceError::help_message`.

use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::cli::commands::StatusArgs;
use crate::cli::output::OutputFormatter;
use crate::config::StatusConfig;
use crate::status::StatusService;

/// Runs the `status` subcommand. Returns the process exit code.
pub async fn handle_status(args: &StatusArgs, quiet: bool) -> i32 {
    let config = config_from_args(args);
    debug!("Effective configuration:\n{}", config);

    let service = match StatusService::new(config) {
        Ok(service) => service,
        Err(err) => {
            error!("Failed to initialize status service: {}", err);
            eprintln!("{}", err.help_message());
            return 2;
        }
    };

    let report = match service.generate(&args.services).await {
        Ok(report) => report,
        Err(err) => {
            error!("Status run failed: {}", err);
            eprintln!("{}", err.help_message());
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = match formatter.format(&report.summary()) {
        Ok(rendered) => rendered,
        Err(err) => {
            error!("Failed to format report: {:#}", err);
            eprintln!("Error: Failed to format report\n\nDetails: {:#}", err);
            return 1;
        }
    };

    if let Err(err) = write_output(&rendered, args.output.as_ref()) {
        error!("Failed to write output: {:#}", err);
        eprintln!("Error: Failed to write output\n\nDetails: {:#}", err);
        return 1;
    }

    if !quiet {
        if let Some(path) = &args.output {
            eprintln!("Report written to {}", path.display());
        }
    }

    0
}

fn config_from_args(args: &StatusArgs) -> StatusConfig {
    let mut config = StatusConfig::default();
    if let Some(root) = &args.config_root {
        config.config_root = root.clone();
    }
    if let Some(timeout) = args.timeout {
        config.probe_timeout_secs = timeout;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    config
}

fn write_output(rendered: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display())),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}
