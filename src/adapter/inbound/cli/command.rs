//! Command-line interface definitions.
//!
//! Defines the CLI structure for rackform using `clap`: handling custom
//! resource requests, describing stacks and inspecting or resizing the rack.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Custom resource orchestrator for rack services and task definitions
#[derive(Parser, Debug)]
#[command(name = "rackform")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "rackform.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle one custom resource request and deliver its response
    Handle(HandleArgs),

    /// Inspect infrastructure stacks
    #[command(subcommand)]
    Stack(StackCommand),

    /// Inspect or resize the rack
    #[command(subcommand)]
    Rack(RackCommand),
}

#[derive(Args, Debug)]
pub struct HandleArgs {
    /// Request JSON, or `-` to read it from stdin
    pub event: String,
}

#[derive(Subcommand, Debug)]
pub enum StackCommand {
    /// Describe one stack, or every stack when no name is given
    Describe {
        /// Stack name
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RackCommand {
    /// Show instance count, type, version and status
    Show,

    /// Change rack capacity
    Scale(ScaleArgs),

    /// Show the largest external process count and the resulting floor
    Capacity,
}

#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// New instance count
    #[arg(long)]
    pub count: u32,

    /// New instance type
    #[arg(long = "type")]
    pub instance_type: Option<String>,

    /// New rack version
    #[arg(long)]
    pub version: Option<String>,
}
