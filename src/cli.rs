use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cfn-transcoder-pipeline")]
#[command(author, version, about = "CloudFormation custom resource handler for Elastic Transcoder pipelines")]
pub struct Cli {
    /// Path to config file
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
    /// Handle a lifecycle event: dispatch on its RequestType and print the
    /// resulting resource data as JSON
    Handle {
        /// Lifecycle event JSON file
        #[arg(required = true)]
        event: PathBuf,
    },

    /// Validate a lifecycle event's resource properties without calling AWS
    Validate {
        /// Lifecycle event JSON file
        #[arg(required = true)]
        event: PathBuf,
    },

    /// Display version information
    Version,
}
