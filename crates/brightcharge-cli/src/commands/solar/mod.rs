//! Solar subcommand implementations.

mod states;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct SolarCommand {
    #[command(subcommand)]
    pub command: SolarSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SolarSubcommand {
    /// List solar and grid sensor states
    States(states::StatesArgs),
}

pub async fn handle(cmd: SolarCommand) -> Result<()> {
    match cmd.command {
        SolarSubcommand::States(args) => states::run(args).await,
    }
}
