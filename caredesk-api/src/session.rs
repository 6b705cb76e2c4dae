//! The authenticated API session.

use serde::{Deserialize, Serialize};

/// An authenticated session against the clinic API.
///
/// Obtaining, validating and refreshing the token is the embedding
/// application's responsibility; the core only forwards it. An expired
/// token surfaces as an ordinary fetch error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
