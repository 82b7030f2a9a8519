//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT signing and lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_ttl_minutes")]
    pub jwt_ttl_minutes: u32,
}

fn default_ttl_minutes() -> u32 {
    60
}
