//! Learning-content operations: answer submission and progress.

use crate::{
    error::Result,
    http::{ApiRequest, AuthHttp},
    models::{SubmitAnswerRequest, SubmitResult, TaskProgress},
};

/// Operations under `/api/v1/content`
#[derive(Clone)]
pub struct ContentApi {
    http: AuthHttp,
}

impl ContentApi {
    pub(crate) fn new(http: AuthHttp) -> Self {
        Self { http }
    }

    /// Submit an answer for a task
    pub async fn submit_answer(&self, task_id: &str, answer: &str) -> Result<SubmitResult> {
        let body = SubmitAnswerRequest {
            answer: answer.to_string(),
        };
        self.http
            .execute_json(
                ApiRequest::post(format!("/api/v1/content/tasks/{}/submit", task_id))
                    .json(&body)?,
                "Failed to submit answer",
            )
            .await
    }

    /// The authenticated user's per-task progress
    pub async fn progress(&self) -> Result<Vec<TaskProgress>> {
        self.http
            .execute_json(
                ApiRequest::get("/api/v1/content/tasks/progress"),
                "Failed to fetch user progress",
            )
            .await
    }
}
