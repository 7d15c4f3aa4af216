use serde::{Deserialize, Serialize};

/// A user-submitted solution to a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Solution {
    pub id: String,
    /// Markdown body of the solution
    #[serde(rename = "bodyMd", alias = "body_md")]
    pub body_md: String,
    #[serde(rename = "taskId", alias = "task_id")]
    pub task_id: String,
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", alias = "updated_at", default)]
    pub updated_at: Option<String>,
}
