use clap::Parser;
use std::path::PathBuf;

/// Shared arguments for the demo binaries. All of them are optional so the
/// demos run bare during a live session.
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines instead of the compact format
    #[arg(long)]
    pub json_logs: bool,
}

impl DemoArgs {
    pub fn init_logging(&self) {
        if self.json_logs {
            crate::utils::logger::init_json_logger();
        } else {
            crate::utils::logger::init_cli_logger(self.verbose);
        }
    }
}
