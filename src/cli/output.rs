//! Output formatting for multiple formats
//!
//! Formatters for the status report: JSON and YAML for machines, a
//! per-environment listing for humans. The human layout is not a
//! compatibility surface; the JSON/YAML shapes follow `ReportSummary`.

use anyhow::{Context, Result};

use crate::report::ReportSummary;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for status reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a report summary according to the configured format
    pub fn format(&self, summary: &ReportSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(summary),
            OutputFormat::Yaml => self.format_yaml(summary),
            OutputFormat::Human => Ok(self.format_human(summary)),
        }
    }

    fn format_json(&self, summary: &ReportSummary) -> Result<String> {
        serde_json::to_string_pretty(summary).context("Failed to serialize report to JSON")
    }

    fn format_yaml(&self, summary: &ReportSummary) -> Result<String> {
        serde_yaml::to_string(summary).context("Failed to serialize report to YAML")
    }

    fn format_human(&self, summary: &ReportSummary) -> String {
        let mut output = String::new();

        output.push_str("Service Status Report\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push('\n');

        for env_summary in &summary.environments {
            output.push_str(&format!("\nEnvironment: {}\n", env_summary.environment));

            for service in &env_summary.services {
                let counts = &service.counts;
                if counts.total() == 0 {
                    output.push_str(&format!(
                        "  \u{26A0} {:<20} no targets found\n",
                        service.service
                    ));
                    continue;
                }

                let marker = if service.healthy {
                    "\u{2713}"
                } else {
                    "\u{2717}"
                };
                output.push_str(&format!(
                    "  {} {:<20} {} ok / {} targets",
                    marker,
                    service.service,
                    counts.ok,
                    counts.total()
                ));
                if counts.failures() > 0 {
                    output.push_str(&format!(" ({} failing)", counts.failures()));
                }
                output.push('\n');

                for target in &service.targets {
                    output.push_str(&format!("      {} - {}\n", target.url, target.outcome));
                }
            }
        }

        if !summary.warnings.is_empty() {
            output.push_str("\n\u{26A0} Warnings:\n");
            for warning in &summary.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output.push_str(&format!(
            "\nGenerated at {}\n",
            summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output
    }
}
