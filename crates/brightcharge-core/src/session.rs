//! Session state for the Fleet API token lifecycle.
//!
//! A [`UserSession`] exists only as a complete triple: access token, refresh
//! token, and absolute expiry. Client state is `Option<UserSession>`, so
//! "authenticated" and "unauthenticated" are the only representable states
//! and a partial clear cannot occur.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::tokens::{AccessToken, PartnerToken, RefreshToken};

/// Safety margin applied before the actual expiry instant.
///
/// A token within this window of expiring is treated as already expired, so
/// a request is never built with a token that expires mid-flight.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

fn stale_at(expires_at: DateTime<Utc>) -> DateTime<Utc> {
    expires_at - Duration::seconds(EXPIRY_MARGIN_SECS)
}

/// An authenticated user session: token pair plus absolute expiry.
#[derive(Clone)]
pub struct UserSession {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    expires_at: DateTime<Utc>,
}

impl UserSession {
    /// Create a session from a token-endpoint response, anchoring the expiry
    /// at `now + expires_in`.
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken, expires_in_secs: u64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs as i64),
        }
    }

    /// Restore a session from persisted parts.
    ///
    /// The caller is responsible for the tokens matching the expiry instant.
    pub fn from_parts(
        access_token: AccessToken,
        refresh_token: RefreshToken,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at,
        }
    }

    /// Returns the access token.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the refresh token.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Returns the absolute expiry instant of the access token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true when the access token is expired or within
    /// [`EXPIRY_MARGIN_SECS`] of expiring.
    pub fn is_stale(&self) -> bool {
        Utc::now() >= stale_at(self.expires_at)
    }
}

// Custom Debug impl that hides token material
impl fmt::Debug for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSession")
            .field("tokens", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A cached partner token with its expiry instant.
///
/// Expiry is tracked symmetrically with the user-token path, using the same
/// staleness margin.
#[derive(Clone)]
pub struct PartnerGrant {
    token: PartnerToken,
    expires_at: DateTime<Utc>,
}

impl PartnerGrant {
    /// Create a grant from a client-credentials response, anchoring the
    /// expiry at `now + expires_in`.
    pub fn new(token: PartnerToken, expires_in_secs: u64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs as i64),
        }
    }

    /// Returns the partner token.
    pub fn token(&self) -> &PartnerToken {
        &self.token
    }

    /// Returns the absolute expiry instant of the partner token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true when the partner token is expired or within
    /// [`EXPIRY_MARGIN_SECS`] of expiring.
    pub fn is_stale(&self) -> bool {
        Utc::now() >= stale_at(self.expires_at)
    }
}

impl fmt::Debug for PartnerGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerGrant")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
