//! brightcharge-fleet - Tesla Fleet API client.
//!
//! This crate implements the OAuth token lifecycle against the Fleet Auth
//! endpoints (partner token, authorization-code exchange, refresh-before-
//! expiry) and the authenticated vehicle operations of the Fleet API. All
//! upstream failures are normalized into the single error type from
//! [`brightcharge_core`].

mod client;
mod endpoints;
mod http;

pub use client::{AuthorizeUrl, DEFAULT_API_BASE, DEFAULT_AUTH_BASE, FleetClient};
