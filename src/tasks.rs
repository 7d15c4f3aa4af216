//! Task operations: CRUD, publication, and draft listings.
//!
//! Task create/update bodies are multipart forms because a task may carry
//! an attached image; the optional image travels as a file part named
//! `image_url`, matching the backend's upload field.

use crate::{
    error::Result,
    http::{ApiRequest, AuthHttp, FormField},
    models::{Task, TaskDraft},
};

/// Operations for tasks under `/api/v1/tasks`
#[derive(Clone)]
pub struct TasksApi {
    http: AuthHttp,
}

impl TasksApi {
    pub(crate) fn new(http: AuthHttp) -> Self {
        Self { http }
    }

    /// List all visible tasks
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.http
            .execute_json(ApiRequest::get("/api/v1/tasks"), "Failed to fetch tasks")
            .await
    }

    /// Fetch a single task by id
    pub async fn get(&self, id: &str) -> Result<Task> {
        self.http
            .execute_json(
                ApiRequest::get(format!("/api/v1/tasks/{}", id)),
                "Failed to fetch task",
            )
            .await
    }

    /// Create a task from a draft
    pub async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        self.http
            .execute_json(
                ApiRequest::post("/api/v1/tasks").multipart(Self::form_fields(draft)),
                "Failed to create task",
            )
            .await
    }

    /// Update an existing task
    pub async fn update(&self, id: &str, draft: &TaskDraft) -> Result<Task> {
        self.http
            .execute_json(
                ApiRequest::put(format!("/api/v1/tasks/{}", id))
                    .multipart(Self::form_fields(draft)),
                "Failed to update task",
            )
            .await
    }

    /// Delete a task
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .execute_empty(
                ApiRequest::delete(format!("/api/v1/tasks/{}", id)),
                "Failed to delete task",
            )
            .await
    }

    /// Publish a draft task
    pub async fn publish(&self, id: &str) -> Result<Task> {
        self.http
            .execute_json(
                ApiRequest::post(format!("/api/v1/tasks/{}/publish", id)),
                "Failed to publish task",
            )
            .await
    }

    /// List the caller's unpublished drafts
    pub async fn drafts(&self) -> Result<Vec<Task>> {
        self.http
            .execute_json(
                ApiRequest::get("/api/v1/tasks/drafts"),
                "Failed to fetch draft tasks",
            )
            .await
    }

    /// List tasks belonging to a topic; readable without authentication
    pub async fn by_topic(&self, topic_id: &str) -> Result<Vec<Task>> {
        self.http
            .execute_json(
                ApiRequest::get(format!("/api/v1/tasks/topic/{}", topic_id)),
                "Failed to fetch tasks",
            )
            .await
    }

    /// List tasks authored by the caller
    pub async fn my_tasks(&self) -> Result<Vec<Task>> {
        self.http
            .execute_json(
                ApiRequest::get("/api/v1/tasks/my/tasks"),
                "Failed to fetch my tasks",
            )
            .await
    }

    fn form_fields(draft: &TaskDraft) -> Vec<FormField> {
        let mut fields = vec![
            text("title", &draft.title),
            text("body_md", &draft.body_md),
            text("difficulty", draft.difficulty.as_str()),
            text("status", draft.status.as_str()),
            text("topic_id", &draft.topic_id),
            text("answer_type", draft.answer_type.as_str()),
        ];

        if let Some(solution) = &draft.official_solution {
            fields.push(text("official_solution", solution));
        }
        if let Some(answer) = &draft.correct_answer {
            fields.push(text("correct_answer", answer));
        }
        if let Some(image) = &draft.image {
            fields.push(FormField::File {
                name: "image_url".to_string(),
                file_name: image.file_name.clone(),
                mime_type: image.mime_type.clone(),
                bytes: image.bytes.clone(),
            });
        }

        fields
    }
}

fn text(name: &str, value: &str) -> FormField {
    FormField::Text {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerType, Difficulty, TaskImage, TaskStatus};

    #[test]
    fn test_form_fields_required_only() {
        let draft = TaskDraft::new("T", "B", Difficulty::Easy, "t1", AnswerType::Text);
        let fields = TasksApi::form_fields(&draft);

        let names: Vec<&str> = fields
            .iter()
            .map(|f| match f {
                FormField::Text { name, .. } => name.as_str(),
                FormField::File { name, .. } => name.as_str(),
            })
            .collect();

        assert_eq!(
            names,
            vec!["title", "body_md", "difficulty", "status", "topic_id", "answer_type"]
        );
    }

    #[test]
    fn test_form_fields_with_optionals_and_image() {
        let draft = TaskDraft::new("T", "B", Difficulty::Hard, "t1", AnswerType::Number)
            .with_status(TaskStatus::Published)
            .with_official_solution("x = 2")
            .with_correct_answer("2")
            .with_image(TaskImage {
                file_name: "figure.png".to_string(),
                mime_type: "image/png".to_string(),
                bytes: vec![0x89, 0x50],
            });

        let fields = TasksApi::form_fields(&draft);
        assert_eq!(fields.len(), 9);

        let status_value = fields.iter().find_map(|f| match f {
            FormField::Text { name, value } if name == "status" => Some(value.as_str()),
            _ => None,
        });
        assert_eq!(status_value, Some("PUBLISHED"));

        assert!(matches!(
            fields.last(),
            Some(FormField::File { name, .. }) if name == "image_url"
        ));
    }
}
