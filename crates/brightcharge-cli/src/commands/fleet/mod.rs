//! Fleet subcommand implementations.

mod auth_url;
mod charge_start;
mod charge_stop;
mod login;
mod logout;
mod refresh_token;
mod register_partner;
mod set_charge_limit;
mod set_charging_amps;
mod status;
mod vehicle_data;
mod vehicles;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use brightcharge_core::OAuthConfig;
use brightcharge_fleet::FleetClient;

use crate::session::storage;

#[derive(Args, Debug)]
pub struct FleetCommand {
    #[command(subcommand)]
    pub command: FleetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FleetSubcommand {
    /// Print the OAuth authorization URL and CSRF state
    AuthUrl(auth_url::AuthUrlArgs),

    /// Exchange an authorization code for a session
    Login(login::LoginArgs),

    /// Remove the stored session
    Logout(logout::LogoutArgs),

    /// Display the stored session
    Status(status::StatusArgs),

    /// Refresh the session tokens
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Register the partner account with the Fleet API
    RegisterPartner(register_partner::RegisterPartnerArgs),

    /// List the user's vehicles
    Vehicles(vehicles::VehiclesArgs),

    /// Fetch detailed data for one vehicle
    VehicleData(vehicle_data::VehicleDataArgs),

    /// Start charging
    ChargeStart(charge_start::ChargeStartArgs),

    /// Stop charging
    ChargeStop(charge_stop::ChargeStopArgs),

    /// Set the charge limit percentage
    SetChargeLimit(set_charge_limit::SetChargeLimitArgs),

    /// Set the charging current in amps
    SetChargingAmps(set_charging_amps::SetChargingAmpsArgs),
}

pub async fn handle(cmd: FleetCommand) -> Result<()> {
    match cmd.command {
        FleetSubcommand::AuthUrl(args) => auth_url::run(args).await,
        FleetSubcommand::Login(args) => login::run(args).await,
        FleetSubcommand::Logout(args) => logout::run(args).await,
        FleetSubcommand::Status(args) => status::run(args).await,
        FleetSubcommand::RefreshToken(args) => refresh_token::run(args).await,
        FleetSubcommand::RegisterPartner(args) => register_partner::run(args).await,
        FleetSubcommand::Vehicles(args) => vehicles::run(args).await,
        FleetSubcommand::VehicleData(args) => vehicle_data::run(args).await,
        FleetSubcommand::ChargeStart(args) => charge_start::run(args).await,
        FleetSubcommand::ChargeStop(args) => charge_stop::run(args).await,
        FleetSubcommand::SetChargeLimit(args) => set_charge_limit::run(args).await,
        FleetSubcommand::SetChargingAmps(args) => set_charging_amps::run(args).await,
    }
}

/// Build a client from the environment with no session attached.
fn client_from_env() -> Result<FleetClient> {
    let oauth = OAuthConfig::from_env().context(
        "Missing Tesla OAuth configuration \
         (TESLA_CLIENT_ID, TESLA_CLIENT_SECRET, TESLA_REDIRECT_URI)",
    )?;
    Ok(FleetClient::new(oauth))
}

/// Build a client from the environment and the stored session.
fn authenticated_client() -> Result<FleetClient> {
    let oauth = OAuthConfig::from_env().context(
        "Missing Tesla OAuth configuration \
         (TESLA_CLIENT_ID, TESLA_CLIENT_SECRET, TESLA_REDIRECT_URI)",
    )?;

    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'brightcharge fleet login' first.")?;

    Ok(FleetClient::resume(oauth, session))
}

/// Persist the client's session after a call that may have refreshed it.
async fn save_client_session(client: &FleetClient) -> Result<()> {
    if let Some(session) = client.session().await {
        storage::save_session(&session).context("Failed to save session")?;
    }
    Ok(())
}
