//! brightcharge-core - Shared types for the brightcharge toolkit.
//!
//! This crate holds the pieces common to the Fleet API client, the Home
//! Assistant client, and the CLI: the unified error type with its
//! error-message normalization rules, redacted token newtypes, the user
//! session model with its expiry margin, OAuth configuration, and the wire
//! data types.

pub mod config;
pub mod error;
pub mod session;
pub mod tokens;
pub mod types;

pub use config::OAuthConfig;
pub use error::Error;
pub use session::{EXPIRY_MARGIN_SECS, PartnerGrant, UserSession};
pub use tokens::{AccessToken, PartnerToken, RefreshToken};
pub use types::{BaseUrl, ChargeState, EntityState, Vehicle, VehicleData, VehicleId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
