//! Solar states command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use brightcharge_core::BaseUrl;
use brightcharge_hass::HassClient;

use crate::output;

#[derive(Args, Debug)]
pub struct StatesArgs {
    /// Home Assistant base URL
    #[arg(long, env = "HASS_URL")]
    pub url: String,

    /// Home Assistant long-lived access token
    #[arg(long, env = "HASS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// List all entity states, not only solar and grid sensors
    #[arg(long)]
    pub all: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: StatesArgs) -> Result<()> {
    let base = BaseUrl::new(&args.url).context("Invalid Home Assistant URL")?;
    let client = HassClient::new(base, args.token).context("Invalid Home Assistant token")?;

    let states = if args.all {
        client.states().await
    } else {
        client.solar_states().await
    }
    .context("Failed to fetch entity states")?;

    if states.is_empty() {
        eprintln!("{}", "No matching entities found.".dimmed());
        return Ok(());
    }

    for state in &states {
        if args.pretty {
            output::json_pretty(state)?;
        } else {
            output::json(state)?;
        }
    }

    Ok(())
}
