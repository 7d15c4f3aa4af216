use serde::{Deserialize, Serialize};

/// Body for submitting an answer to a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

/// Result of an answer submission.
///
/// The content service owns this schema; unknown fields are ignored so the
/// client survives additive changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Whether the submitted answer matched the expected one
    pub correct: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-task progress entry for the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProgress {
    #[serde(rename = "taskId", alias = "task_id")]
    pub task_id: String,
    /// Whether the user has solved this task
    #[serde(default)]
    pub solved: bool,
    /// Number of submissions made so far
    #[serde(default)]
    pub attempts: u32,
    #[serde(rename = "lastSubmittedAt", alias = "last_submitted_at", default)]
    pub last_submitted_at: Option<String>,
}
