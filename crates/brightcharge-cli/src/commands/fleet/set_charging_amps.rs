//! Set charging amps command implementation.

use anyhow::{Context, Result};
use clap::Args;

use brightcharge_core::VehicleId;

use crate::output;

#[derive(Args, Debug)]
pub struct SetChargingAmpsArgs {
    /// Vehicle id (from 'brightcharge fleet vehicles')
    pub id: String,

    /// Charging current in amps
    #[arg(long)]
    pub amps: u32,
}

pub async fn run(args: SetChargingAmpsArgs) -> Result<()> {
    let id = VehicleId::new(&args.id).context("Invalid vehicle id")?;
    let client = super::authenticated_client()?;

    client
        .set_charging_amps(&id, args.amps)
        .await
        .context("Failed to set charging amps")?;

    super::save_client_session(&client).await?;

    output::success(&format!("Charging current set to {} A", args.amps));

    Ok(())
}
