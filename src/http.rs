//! Bearer-authenticated HTTP transport with refresh-and-retry.
//!
//! [`AuthHttp`] wraps every domain request with access-token injection and
//! a single transparent refresh-and-retry on HTTP 401. Requests are
//! described by [`ApiRequest`] rather than built directly on the reqwest
//! client, because the retry must reissue the original request and request
//! builders with bodies cannot be cloned once sent.

use crate::{
    auth::AuthApi,
    error::{Ph8LinkError, Result},
    token_store::{TokenKey, TokenStore},
};
use log::{debug, warn};
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// One multipart form field
#[derive(Debug, Clone)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// Request body variants the backend accepts
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// A rebuildable description of an HTTP request.
///
/// Paths are relative to the client base URL, e.g. `/api/v1/topics`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Caller-supplied headers; these win conflicts with injected defaults
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart form body
    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Add a caller header; takes precedence over injected defaults
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Bearer-authenticated request executor.
///
/// Reads the access token from the token store on every call and performs
/// at most one refresh-and-retry cycle per request. A 401 on the retried
/// request is returned to the caller untouched, so no retry loop is
/// possible even when the refreshed token is itself rejected.
#[derive(Clone)]
pub struct AuthHttp {
    base_url: String,
    http_client: reqwest::Client,
    store: Arc<dyn TokenStore>,
    auth: AuthApi,
}

impl AuthHttp {
    pub(crate) fn new(
        base_url: String,
        http_client: reqwest::Client,
        store: Arc<dyn TokenStore>,
        auth: AuthApi,
    ) -> Self {
        Self {
            base_url,
            http_client,
            store,
            auth,
        }
    }

    /// Execute a request with bearer injection and one-shot refresh-and-retry.
    ///
    /// The returned response is surfaced as-is: non-401 error statuses are
    /// never retried, and a 401 on the second attempt is the caller's to
    /// interpret.
    pub async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let access = self.store.get(TokenKey::Access)?;

        let start = Instant::now();
        debug!(
            "[HTTP] {} {} (attempt 1, authenticated={})",
            request.method,
            request.path,
            access.is_some()
        );
        let response = self.send(&request, access.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            debug!(
                "[HTTP] {} {} done: status={} duration_ms={}",
                request.method,
                request.path,
                response.status(),
                start.elapsed().as_millis()
            );
            return Ok(response);
        }

        // Attempt -> 401 -> refresh -> retry once -> return. Exactly one
        // refresh per call; refresh_access_token clears both tokens and
        // fails terminally when the refresh token is absent or rejected.
        warn!(
            "[HTTP] {} {} unauthorized, refreshing access token",
            request.method, request.path
        );
        let fresh_token = self.refresh_access_token().await?;

        debug!("[HTTP] {} {} (attempt 2)", request.method, request.path);
        let retried = self.send(&request, Some(&fresh_token)).await?;
        debug!(
            "[HTTP] {} {} done after retry: status={} duration_ms={}",
            request.method,
            request.path,
            retried.status(),
            start.elapsed().as_millis()
        );
        Ok(retried)
    }

    /// Execute and parse a JSON response.
    ///
    /// Non-2xx statuses become [`Ph8LinkError::ServerError`] carrying the
    /// static `failure` description, never text parsed from the body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        failure: &'static str,
    ) -> Result<T> {
        let response = self.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Ph8LinkError::ServerError {
                status_code: status.as_u16(),
                message: failure.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Execute, discarding any response body
    pub async fn execute_empty(&self, request: ApiRequest, failure: &'static str) -> Result<()> {
        let response = self.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Ph8LinkError::ServerError {
                status_code: status.as_u16(),
                message: failure.to_string(),
            });
        }
        Ok(())
    }

    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http_client.request(request.method.clone(), &url);

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(value) => {
                builder = builder.body(serde_json::to_vec(value)?);
                // Injected default only; a caller content-type wins
                if !request.has_header("content-type") {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                }
            }
            RequestBody::Multipart(fields) => {
                builder = builder.multipart(Self::build_form(fields)?);
            }
        }

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        Ok(builder.send().await?)
    }

    fn build_form(fields: &[FormField]) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name.clone(), value.clone()),
                FormField::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let part = reqwest::multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime_type)
                        .map_err(|e| {
                            Ph8LinkError::ConfigurationError(format!(
                                "invalid MIME type '{}': {}",
                                mime_type, e
                            ))
                        })?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Terminal on failure: both tokens are cleared and the caller gets
    /// [`Ph8LinkError::SessionExpired`].
    async fn refresh_access_token(&self) -> Result<String> {
        let refresh = match self.store.get(TokenKey::Refresh)? {
            Some(token) => token,
            None => {
                warn!("[HTTP] No refresh token stored, session expired");
                self.store.clear()?;
                return Err(Ph8LinkError::SessionExpired);
            }
        };

        match self.auth.refresh(&refresh).await {
            Ok(pair) => {
                self.store.set(TokenKey::Access, &pair.access_token)?;
                // Persist the rotated refresh token when the backend issues one
                if !pair.refresh_token.is_empty() && pair.refresh_token != refresh {
                    self.store.set(TokenKey::Refresh, &pair.refresh_token)?;
                }
                debug!("[HTTP] Access token refreshed");
                Ok(pair.access_token)
            }
            Err(err) => {
                warn!("[HTTP] Token refresh rejected: {}", err);
                self.store.clear()?;
                Err(Ph8LinkError::SessionExpired)
            }
        }
    }
}
