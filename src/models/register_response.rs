use serde::{Deserialize, Serialize};

/// Registration acknowledgement from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable status, e.g. "Verification code sent to email"
    pub message: String,
}
