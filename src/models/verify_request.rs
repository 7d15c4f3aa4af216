use serde::{Deserialize, Serialize};

/// Email verification request body (six-digit code sent after registration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}
