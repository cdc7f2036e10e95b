//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::fleet::FleetCommand;
use crate::commands::solar::SolarCommand;

/// CLI for solar-aware Tesla charging control.
#[derive(Parser, Debug)]
#[command(name = "brightcharge")]
#[command(author, version = env!("BRIGHTCHARGE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tesla Fleet API operations
    Fleet(FleetCommand),

    /// Home Assistant solar sensor operations
    Solar(SolarCommand),
}
