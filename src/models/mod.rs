//! Data models for the ph8-link client library.
//!
//! Defines request and response structures for the auth, user, topic, task
//! and content endpoints. Request bodies use the exact field names each
//! endpoint accepts; responses deserialize camelCase with snake_case
//! aliases where backend deployments have been observed to disagree.

pub mod health_check_response;
pub mod login_request;
pub mod progress;
pub mod refresh_request;
pub mod register_request;
pub mod register_response;
pub mod solution;
pub mod task;
pub mod token_pair;
pub mod topic;
pub mod user;
pub mod verify_request;


pub use health_check_response::HealthCheckResponse;
pub use login_request::LoginRequest;
pub use progress::{SubmitAnswerRequest, SubmitResult, TaskProgress};
pub use refresh_request::RefreshRequest;
pub use register_request::RegisterRequest;
pub use register_response::RegisterResponse;
pub use solution::Solution;
pub use task::{AnswerType, Difficulty, Task, TaskDraft, TaskImage, TaskStatus};
pub use token_pair::TokenPair;
pub use topic::{Topic, TopicDraft};
pub use user::{User, UserRole};
pub use verify_request::VerifyEmailRequest;
