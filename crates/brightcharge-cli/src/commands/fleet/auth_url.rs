//! Auth URL command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::output;

#[derive(Args, Debug)]
pub struct AuthUrlArgs {}

pub async fn run(_args: AuthUrlArgs) -> Result<()> {
    let client = super::client_from_env()?;
    let authorize = client.authorize_url();

    output::field("URL", &authorize.url);
    output::field("State", &authorize.state);

    eprintln!();
    eprintln!(
        "{}",
        "Open the URL, approve access, and verify the redirect echoes the state value.".dimmed()
    );

    Ok(())
}
