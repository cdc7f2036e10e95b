//! brightcharge-hass - Home Assistant client.
//!
//! A small stateless polling client over the Home Assistant REST API, used
//! to read solar production and grid power sensors. Failures are normalized
//! into the error type from [`brightcharge_core`].

mod client;

pub use client::HassClient;
