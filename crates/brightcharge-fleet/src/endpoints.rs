//! Fleet API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use brightcharge_core::{Vehicle, VehicleData, VehicleId};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Token endpoint on the Fleet Auth base.
pub const TOKEN: &str = "/oauth2/v3/token";

/// Authorization endpoint on the Fleet Auth base.
pub const AUTHORIZE: &str = "/oauth2/v3/authorize";

/// Partner account registration endpoint on the Fleet API base.
pub const PARTNER_ACCOUNTS: &str = "/api/1/partner_accounts";

/// Vehicle list endpoint on the Fleet API base.
pub const VEHICLES: &str = "/api/1/vehicles";

/// Detailed data endpoint for one vehicle.
pub fn vehicle_data_path(id: &VehicleId) -> String {
    format!("/api/1/vehicles/{}/vehicle_data", id)
}

/// Command endpoint for one vehicle.
pub fn command_path(id: &VehicleId, command: &str) -> String {
    format!("/api/1/vehicles/{}/command/{}", id, command)
}

/// charge_start command name.
pub const CHARGE_START: &str = "charge_start";

/// charge_stop command name.
pub const CHARGE_STOP: &str = "charge_stop";

/// set_charge_limit command name.
pub const SET_CHARGE_LIMIT: &str = "set_charge_limit";

/// set_charging_amps command name.
pub const SET_CHARGING_AMPS: &str = "set_charging_amps";

/// OAuth scopes requested for both the user and partner flows.
pub const SCOPE: &str = "openid vehicle_device_data vehicle_cmds vehicle_charging_commands";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the client-credentials grant.
#[derive(Debug, Serialize)]
pub struct PartnerTokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub audience: &'a str,
    pub scope: &'static str,
}

/// Response from the client-credentials grant.
#[derive(Debug, Deserialize)]
pub struct PartnerTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
}

/// Request body for the authorization-code exchange.
#[derive(Debug, Serialize)]
pub struct AuthorizationCodeRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
}

/// Request body for the refresh-token grant.
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
}

/// Response from the authorization-code and refresh-token grants.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Empty request body for endpoints that take `{}`.
#[derive(Debug, Serialize)]
pub struct EmptyBody {}

/// Request body for set_charge_limit.
#[derive(Debug, Serialize)]
pub struct SetChargeLimitRequest {
    pub percent: u8,
}

/// Request body for set_charging_amps.
#[derive(Debug, Serialize)]
pub struct SetChargingAmpsRequest {
    pub charging_amps: u32,
}

/// Envelope for the vehicle list response.
#[derive(Debug, Deserialize)]
pub struct VehiclesResponse {
    pub response: Vec<Vehicle>,
}

/// Envelope for the vehicle data response.
#[derive(Debug, Deserialize)]
pub struct VehicleDataResponse {
    pub response: VehicleData,
}
