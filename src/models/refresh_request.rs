use serde::{Deserialize, Serialize};

/// Token refresh request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The long-lived refresh token to exchange
    #[serde(rename = "refresh_token", alias = "refreshToken")]
    pub refresh_token: String,
}
