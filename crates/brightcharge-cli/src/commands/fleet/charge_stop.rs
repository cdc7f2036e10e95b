//! Charge stop command implementation.

use anyhow::{Context, Result};
use clap::Args;

use brightcharge_core::VehicleId;

use crate::output;

#[derive(Args, Debug)]
pub struct ChargeStopArgs {
    /// Vehicle id (from 'brightcharge fleet vehicles')
    pub id: String,
}

pub async fn run(args: ChargeStopArgs) -> Result<()> {
    let id = VehicleId::new(&args.id).context("Invalid vehicle id")?;
    let client = super::authenticated_client()?;

    client
        .charge_stop(&id)
        .await
        .context("Failed to stop charging")?;

    super::save_client_session(&client).await?;

    output::success("Charging stopped");

    Ok(())
}
