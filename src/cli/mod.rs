pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, StatusArgs};
pub use handlers::handle_status;
pub use output::{OutputFormat, OutputFormatter};
