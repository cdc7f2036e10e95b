//! Vehicle data command implementation.

use anyhow::{Context, Result};
use clap::Args;

use brightcharge_core::VehicleId;

use crate::output;

#[derive(Args, Debug)]
pub struct VehicleDataArgs {
    /// Vehicle id (from 'brightcharge fleet vehicles')
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: VehicleDataArgs) -> Result<()> {
    let id = VehicleId::new(&args.id).context("Invalid vehicle id")?;
    let client = super::authenticated_client()?;

    let data = client
        .vehicle_data(&id)
        .await
        .context("Failed to fetch vehicle data")?;

    super::save_client_session(&client).await?;

    if args.pretty {
        output::json_pretty(&data)?;
    } else {
        output::json(&data)?;
    }

    Ok(())
}
