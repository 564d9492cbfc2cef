use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trackpilot")]
#[command(author, version, about = "Adaptive track selection for media playback")]
pub struct Cli {
    /// Path to selector config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map a scenario's track groups to renderers and select tracks
    Select {
        /// Scenario file describing renderers and track groups
        #[arg(required = true)]
        scenario: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a scenario's track groups map onto its renderers
    Inspect {
        /// Scenario file describing renderers and track groups
        #[arg(required = true)]
        scenario: PathBuf,
    },

    /// Validate selector configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
