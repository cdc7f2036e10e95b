//! Set charge limit command implementation.

use anyhow::{Context, Result};
use clap::Args;

use brightcharge_core::VehicleId;

use crate::output;

#[derive(Args, Debug)]
pub struct SetChargeLimitArgs {
    /// Vehicle id (from 'brightcharge fleet vehicles')
    pub id: String,

    /// Charge limit as a percentage of capacity
    #[arg(long)]
    pub percent: u8,
}

pub async fn run(args: SetChargeLimitArgs) -> Result<()> {
    let id = VehicleId::new(&args.id).context("Invalid vehicle id")?;
    let client = super::authenticated_client()?;

    client
        .set_charge_limit(&id, args.percent)
        .await
        .context("Failed to set charge limit")?;

    super::save_client_session(&client).await?;

    output::success(&format!("Charge limit set to {}%", args.percent));

    Ok(())
}
