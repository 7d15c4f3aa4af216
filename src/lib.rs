//! # ph8-link
//!
//! Client library for the ph8 learning platform API.
//!
//! Covers the full client-side session lifecycle (token storage, login,
//! registration, refresh-on-expiry with transparent single retry) plus
//! typed REST operations for topics, tasks, users, and learning content.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ph8_link::Ph8LinkClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Ph8LinkClient::builder()
//!     .base_url("http://localhost:8081")
//!     .build()?;
//!
//! // Restore a previous session from stored tokens, if any
//! client.session().init().await;
//!
//! if client.session().current_user().is_none() {
//!     client.session().login("alice@example.com", "secret123").await?;
//! }
//!
//! let topics = client.topics().list().await?;
//! for topic in topics {
//!     println!("{} ({})", topic.title, topic.slug);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Expired access tokens are handled transparently: any authenticated call
//! that hits a 401 refreshes the access token once and retries. When the
//! refresh token itself is rejected the call fails with
//! [`Ph8LinkError::SessionExpired`], both tokens are cleared, and the
//! caller must log in again.

pub mod auth;
pub mod client;
pub mod content;
pub mod error;
pub mod http;
pub mod models;
pub mod session;
pub mod tasks;
pub mod token_store;
pub mod topics;
pub mod users;

pub use auth::AuthApi;
pub use client::{Ph8LinkClient, Ph8LinkClientBuilder, API_URL_ENV, DEFAULT_BASE_URL};
pub use content::ContentApi;
pub use error::{Ph8LinkError, Result};
pub use http::{ApiRequest, AuthHttp, FormField, RequestBody};
pub use models::{
    AnswerType, Difficulty, HealthCheckResponse, Solution, SubmitResult, Task, TaskDraft,
    TaskImage, TaskProgress, TaskStatus, TokenPair, Topic, TopicDraft, User, UserRole,
};
pub use session::{SessionController, SessionStatus};
pub use tasks::TasksApi;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenKey, TokenStore};
pub use topics::TopicsApi;
pub use users::{AvatarUpload, UsersApi};
