//! Register partner command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterPartnerArgs {}

pub async fn run(_args: RegisterPartnerArgs) -> Result<()> {
    let client = super::client_from_env()?;

    eprintln!("{}", "Registering partner account...".dimmed());

    client
        .register_partner_account()
        .await
        .context("Failed to register partner account")?;

    output::success("Partner account registered");

    Ok(())
}
