//! Status command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'brightcharge fleet login' first.")?;

    output::field("Expires", &session.expires_at().to_rfc3339());
    output::field("Stale", if session.is_stale() { "yes" } else { "no" });

    if session.is_stale() {
        eprintln!();
        eprintln!(
            "{}",
            "The access token is stale; the next authenticated command will refresh it.".dimmed()
        );
    }

    Ok(())
}
