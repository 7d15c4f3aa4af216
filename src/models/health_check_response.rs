use serde::{Deserialize, Serialize};

/// Server health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Server status, "OK" when healthy
    pub status: String,
}
