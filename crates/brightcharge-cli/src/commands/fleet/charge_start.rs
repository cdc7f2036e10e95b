//! Charge start command implementation.

use anyhow::{Context, Result};
use clap::Args;

use brightcharge_core::VehicleId;

use crate::output;

#[derive(Args, Debug)]
pub struct ChargeStartArgs {
    /// Vehicle id (from 'brightcharge fleet vehicles')
    pub id: String,
}

pub async fn run(args: ChargeStartArgs) -> Result<()> {
    let id = VehicleId::new(&args.id).context("Invalid vehicle id")?;
    let client = super::authenticated_client()?;

    client
        .charge_start(&id)
        .await
        .context("Failed to start charging")?;

    super::save_client_session(&client).await?;

    output::success("Charging started");

    Ok(())
}
