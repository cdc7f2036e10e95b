//! Core domain types.

mod base_url;
mod entity;
mod vehicle;

pub use base_url::BaseUrl;
pub use entity::EntityState;
pub use vehicle::{ChargeState, Vehicle, VehicleData, VehicleId};
