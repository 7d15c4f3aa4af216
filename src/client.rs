//! Main ph8 client with builder pattern.
//!
//! Provides the primary interface for talking to a ph8 backend: session
//! lifecycle, auth, and the topic/task/user/content resource APIs.

use crate::{
    auth::AuthApi,
    content::ContentApi,
    error::{Ph8LinkError, Result},
    http::AuthHttp,
    models::HealthCheckResponse,
    session::SessionController,
    tasks::TasksApi,
    token_store::{MemoryTokenStore, TokenStore},
    topics::TopicsApi,
    users::UsersApi,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// Environment variable naming the backend base URL
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Default backend base URL for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

const HEALTH_CHECK_TTL: Duration = Duration::from_secs(10);

/// Main ph8 client.
///
/// Use [`Ph8LinkClient::builder`] to construct instances with custom
/// configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use ph8_link::Ph8LinkClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Ph8LinkClient::builder()
///     .base_url("http://localhost:8081")
///     .build()?;
///
/// client.session().login("alice@example.com", "secret123").await?;
/// let topics = client.topics().list().await?;
/// println!("{} topics", topics.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Ph8LinkClient {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthApi,
    session: Arc<SessionController>,
    topics: TopicsApi,
    tasks: TasksApi,
    users: UsersApi,
    content: ContentApi,
    store: Arc<dyn TokenStore>,
    health_cache: Arc<Mutex<HealthCheckCache>>,
}

impl Ph8LinkClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> Ph8LinkClientBuilder {
        Ph8LinkClientBuilder::new()
    }

    /// Build a client from the environment: `NEXT_PUBLIC_API_URL` or the
    /// local default, with a durable file-backed token store.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let store = crate::token_store::FileTokenStore::new()?;
        Self::builder()
            .base_url(base_url)
            .token_store(Arc::new(store))
            .build()
    }

    /// Session lifecycle: init, login, register, logout
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Stateless auth operations (login, register, refresh, profile)
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Topic catalogue operations
    pub fn topics(&self) -> &TopicsApi {
        &self.topics
    }

    /// Task operations
    pub fn tasks(&self) -> &TasksApi {
        &self.tasks
    }

    /// User profile and directory operations
    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Answer submission and progress
    pub fn content(&self) -> &ContentApi {
        &self.content
    }

    /// The token store shared by the session controller and the transport
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check server health; results are cached briefly
    pub async fn health_check(&self) -> Result<HealthCheckResponse> {
        {
            let cache = self.health_cache.lock().await;
            if let (Some(last_check), Some(response)) =
                (cache.last_check, cache.last_response.clone())
            {
                if last_check.elapsed() < HEALTH_CHECK_TTL {
                    log::debug!(
                        "[HEALTH_CHECK] Returning cached response (age: {:?})",
                        last_check.elapsed()
                    );
                    return Ok(response);
                }
            }
        }

        let url = format!("{}/health", self.base_url);
        log::debug!("[HEALTH_CHECK] Fetching from url={}", url);
        let response = self.http_client.get(&url).send().await?;
        let health_response = response.json::<HealthCheckResponse>().await?;

        let mut cache = self.health_cache.lock().await;
        cache.last_check = Some(Instant::now());
        cache.last_response = Some(health_response.clone());

        Ok(health_response)
    }
}

#[derive(Debug, Default)]
struct HealthCheckCache {
    last_check: Option<Instant>,
    last_response: Option<HealthCheckResponse>,
}

/// Builder for configuring [`Ph8LinkClient`] instances.
pub struct Ph8LinkClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    store: Option<Arc<dyn TokenStore>>,
}

impl Ph8LinkClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            store: None,
        }
    }

    /// Set the base URL for the ph8 backend
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a request timeout.
    ///
    /// By default no client-side timeout applies and an unresponsive
    /// backend stalls the call at the mercy of the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the token store backend.
    ///
    /// Defaults to an in-memory store; pass a
    /// [`FileTokenStore`](crate::token_store::FileTokenStore) for tokens
    /// that survive restarts.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Ph8LinkClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Ph8LinkError::ConfigurationError("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        // Keep-alive pooling; idle window sits above typical server timeouts
        let mut client_builder = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| Ph8LinkError::ConfigurationError(e.to_string()))?;

        let store: Arc<dyn TokenStore> = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        let auth = AuthApi::new(base_url.clone(), http_client.clone());
        let http = AuthHttp::new(
            base_url.clone(),
            http_client.clone(),
            Arc::clone(&store),
            auth.clone(),
        );
        let session = Arc::new(SessionController::new(Arc::clone(&store), auth.clone()));

        Ok(Ph8LinkClient {
            base_url,
            http_client,
            auth,
            session,
            topics: TopicsApi::new(http.clone()),
            tasks: TasksApi::new(http.clone()),
            users: UsersApi::new(http.clone()),
            content: ContentApi::new(http),
            store,
            health_cache: Arc::new(Mutex::new(HealthCheckCache::default())),
        })
    }
}
