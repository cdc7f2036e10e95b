//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Authorization code from the OAuth redirect
    #[arg(long)]
    pub code: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let client = super::client_from_env()?;

    eprintln!("{}", "Exchanging authorization code...".dimmed());

    let session = client
        .authenticate(&args.code)
        .await
        .context("Failed to authenticate")?;

    // Save session
    storage::save_session(&session).context("Failed to save session")?;

    // Print success
    output::success("Logged in successfully");
    println!();
    output::field("Expires", &session.expires_at().to_rfc3339());

    Ok(())
}
