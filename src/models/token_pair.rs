use serde::{Deserialize, Serialize};

/// Token pair returned by login and refresh.
///
/// Both tokens are opaque bearer strings with backend-defined expiry;
/// the client never inspects or decodes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPair {
    /// Short-lived access token for bearer-authenticated calls
    #[serde(rename = "accessToken", alias = "access_token")]
    pub access_token: String,
    /// Longer-lived refresh token exchanged for new access tokens
    #[serde(rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: String,
}
