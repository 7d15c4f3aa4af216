//! Stateless authentication client for the ph8 backend.
//!
//! Each operation is a single network round trip against `/api/v1/auth`
//! or `/api/v1/user/profile`. No retries, no side effects: callers are
//! responsible for persisting tokens.

use crate::{
    error::{Ph8LinkError, Result},
    models::{
        LoginRequest, RefreshRequest, RegisterRequest, RegisterResponse, TokenPair, User,
        VerifyEmailRequest,
    },
};
use log::debug;
use std::time::Instant;

/// Stateless request/response wrapper for the auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl AuthApi {
    pub(crate) fn new(base_url: String, http_client: reqwest::Client) -> Self {
        Self {
            base_url,
            http_client,
        }
    }

    /// Exchange email and password for a token pair.
    ///
    /// Fails with [`Ph8LinkError::AuthenticationError`] on invalid
    /// credentials (any non-2xx response).
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let url = format!("{}/api/v1/auth/login", self.base_url);
        debug!("[AUTH] Logging in '{}' at url={}", email, url);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let start = Instant::now();
        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        debug!(
            "[AUTH] Login response received in {:?}, status={}",
            start.elapsed(),
            status
        );

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Ph8LinkError::AuthenticationError(format!(
                "Login failed ({}): {}",
                status, error_text
            )));
        }

        let pair = response.json::<TokenPair>().await?;
        debug!("[AUTH] Login succeeded for '{}'", email);
        Ok(pair)
    }

    /// Create a new account.
    ///
    /// Registration does not return a session; the caller must log in
    /// separately afterwards (typically after verifying the email code).
    pub async fn register(&self, email: &str, password: &str, display_name: &str) -> Result<()> {
        let url = format!("{}/api/v1/auth/register", self.base_url);
        debug!("[AUTH] Registering '{}' at url={}", email, url);

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        };

        let response = self.http_client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Ph8LinkError::ServerError {
                status_code: status.as_u16(),
                message: "Failed to register".to_string(),
            });
        }

        // Acknowledgement body is informational only
        if let Ok(ack) = response.json::<RegisterResponse>().await {
            debug!("[AUTH] Registered '{}': {}", email, ack.message);
        }
        Ok(())
    }

    /// Verify an email address with the six-digit code sent after register.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<()> {
        let url = format!("{}/api/v1/auth/verify", self.base_url);
        debug!("[AUTH] Verifying email '{}' at url={}", email, url);

        let request = VerifyEmailRequest {
            email: email.to_string(),
            code: code.to_string(),
        };

        let response = self.http_client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Ph8LinkError::ServerError {
                status_code: status.as_u16(),
                message: "Failed to verify email".to_string(),
            });
        }

        Ok(())
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Fails with [`Ph8LinkError::AuthenticationError`] when the refresh
    /// token is invalid or expired.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let url = format!("{}/api/v1/auth/refresh", self.base_url);
        debug!("[AUTH] Refreshing tokens at url={}", url);

        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let start = Instant::now();
        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        debug!(
            "[AUTH] Refresh response received in {:?}, status={}",
            start.elapsed(),
            status
        );

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Ph8LinkError::AuthenticationError(format!(
                "Token refresh failed ({}): {}",
                status, error_text
            )));
        }

        Ok(response.json::<TokenPair>().await?)
    }

    /// Fetch the profile of the user the access token belongs to.
    ///
    /// Fails with [`Ph8LinkError::AuthenticationError`] when the token is
    /// invalid or expired (HTTP 401).
    pub async fn get_profile(&self, access_token: &str) -> Result<User> {
        let url = format!("{}/api/v1/user/profile", self.base_url);
        debug!("[AUTH] Fetching profile at url={}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Ph8LinkError::AuthenticationError(format!(
                "Profile fetch failed ({}): {}",
                status, error_text
            )));
        }

        Ok(response.json::<User>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn api_for(server: &Server) -> AuthApi {
        AuthApi::new(server.url(), reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_login_success_parses_token_pair() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/v1/auth/login")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "email": "alice@example.com",
                "password": "secret123"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"accessToken":"acc-1","refreshToken":"ref-1"}"#)
            .create_async()
            .await;

        let pair = api_for(&server)
            .login("alice@example.com", "secret123")
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(pair.access_token, "acc-1");
        assert_eq!(pair.refresh_token, "ref-1");
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/login")
            .with_status(401)
            .with_body(r#"{"success":false,"error":{"message":"invalid credentials"}}"#)
            .create_async()
            .await;

        let result = api_for(&server).login("alice@example.com", "wrong").await;
        assert!(matches!(result, Err(Ph8LinkError::AuthenticationError(_))));
    }

    #[tokio::test]
    async fn test_refresh_invalid_token() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/refresh")
            .with_status(401)
            .with_body("expired")
            .create_async()
            .await;

        let result = api_for(&server).refresh("stale-refresh").await;
        assert!(matches!(result, Err(Ph8LinkError::AuthenticationError(_))));
    }

    #[tokio::test]
    async fn test_get_profile_attaches_bearer_header() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/v1/user/profile")
            .match_header("authorization", "Bearer acc-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"u1","email":"alice@example.com","displayName":"Alice","role":"Student"}"#,
            )
            .create_async()
            .await;

        let user = api_for(&server).get_profile("acc-1").await.unwrap();

        m.assert_async().await;
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_failure_is_server_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/register")
            .with_status(400)
            .with_body("email taken")
            .create_async()
            .await;

        let result = api_for(&server)
            .register("alice@example.com", "secret123", "Alice")
            .await;
        assert!(matches!(
            result,
            Err(Ph8LinkError::ServerError {
                status_code: 400,
                ..
            })
        ));
    }
}
