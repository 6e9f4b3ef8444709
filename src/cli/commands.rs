use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// DevOps status reporter for service health across environments
#[derive(Parser, Debug)]
#[command(
    name = "techops",
    about = "DevOps status reporter for service health across environments",
    version,
    author,
    long_about = "techops probes the health-check endpoints of one or more services \
                  across the lab, qa, sat and prod environments. Endpoints are derived \
                  from the nginx location fragments of the configuration checkout."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Check service health across all environments",
        long_about = "Probes the health-check endpoints of the named services in every \
                      environment and prints a per-environment summary.\n\n\
                      Examples:\n  \
                      techops status orders\n  \
                      techops status orders checkout --format json\n  \
                      techops status orders --config-root /srv/locations --timeout 10"
    )]
    Status(StatusArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct StatusArgs {
    #[arg(
        value_name = "SERVICE",
        required = true,
        num_args = 1..,
        help = "Service name(s) to check (case-insensitive)"
    )]
    pub services: Vec<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "PATH",
        help = "Directory holding the checked-out nginx location fragments \
                (default: TECHOPS_CONFIG_ROOT or the standard checkout path)"
    )]
    pub config_root: Option<PathBuf>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Per-request probe timeout in seconds (default: 5)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "N",
        help = "Maximum number of in-flight probes (default: 8, max: 16)"
    )]
    pub concurrency: Option<usize>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
