//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "roadside",
    about = "Replay a scripted head-unit session against the roadside engine",
    version
)]
/// Command-line interface for the `roadside` binary.
pub struct Cli {
    /// Session script (RON list of events)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Optional path to a RON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pretend the primary map application is not installed
    #[arg(long)]
    pub no_maps_app: bool,

    /// Logging controls
    #[command(flatten)]
    pub log: logging::LogArgs,
}
