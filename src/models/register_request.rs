use serde::{Deserialize, Serialize};

/// Registration request body.
///
/// Registration does not return a session; the caller logs in separately
/// with the same credentials afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Display name; the register endpoint takes this field as `name`
    #[serde(rename = "name", alias = "displayName", alias = "display_name")]
    pub display_name: String,
}
