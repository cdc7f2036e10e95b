//! Home Assistant entity state types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity-id prefixes that identify solar production and grid sensors.
const SOLAR_ENTITY_PREFIXES: [&str; 2] = ["sensor.solar_power", "sensor.grid_power"];

/// A single entity state from the Home Assistant `/api/states` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
    /// Returns true for solar production and grid power sensors.
    pub fn is_solar_entity(&self) -> bool {
        SOLAR_ENTITY_PREFIXES
            .iter()
            .any(|prefix| self.entity_id.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(entity_id: &str) -> EntityState {
        EntityState {
            entity_id: entity_id.to_string(),
            state: "0".to_string(),
            attributes: serde_json::Value::Null,
            last_updated: None,
        }
    }

    #[test]
    fn solar_and_grid_sensors_match() {
        assert!(entity("sensor.solar_power").is_solar_entity());
        assert!(entity("sensor.solar_power_east").is_solar_entity());
        assert!(entity("sensor.grid_power").is_solar_entity());
    }

    #[test]
    fn other_entities_do_not_match() {
        assert!(!entity("sensor.indoor_temperature").is_solar_entity());
        assert!(!entity("light.kitchen").is_solar_entity());
    }
}
