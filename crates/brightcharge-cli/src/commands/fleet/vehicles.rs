//! Vehicles command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct VehiclesArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: VehiclesArgs) -> Result<()> {
    let client = super::authenticated_client()?;

    let vehicles = match client.vehicles().await {
        Ok(vehicles) => vehicles,
        Err(err) => {
            // A failed refresh clears the client session; drop the stored
            // tokens too so the next attempt goes straight to login.
            if err.is_auth() || client.session().await.is_none() {
                storage::clear_session()?;
                bail!("Session expired. Run 'brightcharge fleet login' first.");
            }
            return Err(err).context("Failed to list vehicles");
        }
    };

    // A stale token may have been refreshed on the way
    super::save_client_session(&client).await?;

    if vehicles.is_empty() {
        eprintln!("{}", "No vehicles found.".dimmed());
        return Ok(());
    }

    for vehicle in &vehicles {
        if args.pretty {
            output::json_pretty(vehicle)?;
        } else {
            output::json(vehicle)?;
        }
    }

    Ok(())
}
