//! Vehicle types returned by the Fleet API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An opaque vehicle identifier used in Fleet API paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a vehicle id, rejecting values that cannot appear in a path.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() || s.contains('/') {
            return Err(Error::InvalidInput {
                value: s,
                reason: "vehicle id must be non-empty and contain no '/'".to_string(),
            });
        }
        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VehicleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A vehicle as listed by the vehicles endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub vehicle_id: u64,
    pub vin: String,
    pub display_name: String,
    pub state: String,
    #[serde(default)]
    pub battery_level: Option<u8>,
    #[serde(default)]
    pub charging_state: Option<String>,
}

/// Detailed per-vehicle data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleData {
    pub id: String,
    pub vehicle_id: u64,
    pub charge_state: ChargeState,
}

/// Charging-related vehicle state.
///
/// The `charging_state` string is passed through opaquely; its vocabulary
/// belongs to the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeState {
    pub battery_level: u8,
    pub charging_state: String,
    pub charge_limit_soc: u8,
    pub charge_current_request: u32,
}
