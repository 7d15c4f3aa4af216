//! Topic catalogue operations.

use crate::{
    error::Result,
    http::{ApiRequest, AuthHttp},
    models::{Topic, TopicDraft},
};

/// CRUD operations for topics under `/api/v1/topics`
#[derive(Clone)]
pub struct TopicsApi {
    http: AuthHttp,
}

impl TopicsApi {
    pub(crate) fn new(http: AuthHttp) -> Self {
        Self { http }
    }

    /// List all topics
    pub async fn list(&self) -> Result<Vec<Topic>> {
        self.http
            .execute_json(ApiRequest::get("/api/v1/topics"), "Failed to fetch topics")
            .await
    }

    /// Fetch a single topic by id
    pub async fn get(&self, id: &str) -> Result<Topic> {
        self.http
            .execute_json(
                ApiRequest::get(format!("/api/v1/topics/{}", id)),
                "Failed to fetch topic",
            )
            .await
    }

    /// Create a topic
    pub async fn create(&self, draft: &TopicDraft) -> Result<Topic> {
        self.http
            .execute_json(
                ApiRequest::post("/api/v1/topics").json(draft)?,
                "Failed to create topic",
            )
            .await
    }

    /// Update an existing topic
    pub async fn update(&self, id: &str, draft: &TopicDraft) -> Result<Topic> {
        self.http
            .execute_json(
                ApiRequest::put(format!("/api/v1/topics/{}", id)).json(draft)?,
                "Failed to update topic",
            )
            .await
    }

    /// Delete a topic
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .execute_empty(
                ApiRequest::delete(format!("/api/v1/topics/{}", id)),
                "Failed to delete topic",
            )
            .await
    }
}
