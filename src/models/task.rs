use serde::{Deserialize, Serialize};

/// Task difficulty level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// Wire value, as sent in multipart form fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Extreme => "EXTREME",
        }
    }
}

/// Publication status of a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Draft,
    Published,
    Archived,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }
}

/// Expected answer type for a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerType {
    Text,
    Number,
    Formula,
}

impl AnswerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Formula => "FORMULA",
        }
    }
}

/// Task record mirrored from the backend schema.
///
/// Treated as an opaque payload for CRUD passthrough; the client enforces
/// nothing beyond required-field presence in drafts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Markdown body of the task statement
    #[serde(rename = "bodyMd", alias = "body_md")]
    pub body_md: String,
    pub difficulty: Difficulty,
    pub status: TaskStatus,
    #[serde(rename = "topicId", alias = "topic_id")]
    pub topic_id: String,
    #[serde(rename = "authorId", alias = "author_id", default)]
    pub author_id: Option<String>,
    #[serde(rename = "answerType", alias = "answer_type")]
    pub answer_type: AnswerType,
    /// Only present for tasks the caller is allowed to see solutions of
    #[serde(rename = "officialSolution", alias = "official_solution", default)]
    pub official_solution: Option<String>,
    #[serde(rename = "correctAnswer", alias = "correct_answer", default)]
    pub correct_answer: Option<String>,
    #[serde(rename = "imageUrl", alias = "image_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", alias = "updated_at", default)]
    pub updated_at: Option<String>,
}

/// Attached image for task create/update, uploaded as a multipart file part
#[derive(Debug, Clone)]
pub struct TaskImage {
    /// File name reported to the server
    pub file_name: String,
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for creating or updating a task.
///
/// Sent as a multipart form; the optional image becomes a file part named
/// `image_url`.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub body_md: String,
    pub difficulty: Difficulty,
    pub status: TaskStatus,
    pub topic_id: String,
    pub answer_type: AnswerType,
    pub official_solution: Option<String>,
    pub correct_answer: Option<String>,
    pub image: Option<TaskImage>,
}

impl TaskDraft {
    /// Create a draft with the required fields; status starts as DRAFT
    pub fn new(
        title: impl Into<String>,
        body_md: impl Into<String>,
        difficulty: Difficulty,
        topic_id: impl Into<String>,
        answer_type: AnswerType,
    ) -> Self {
        Self {
            title: title.into(),
            body_md: body_md.into(),
            difficulty,
            status: TaskStatus::Draft,
            topic_id: topic_id.into(),
            answer_type,
            official_solution: None,
            correct_answer: None,
            image: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_official_solution(mut self, solution: impl Into<String>) -> Self {
        self.official_solution = Some(solution.into());
        self
    }

    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.correct_answer = Some(answer.into());
        self
    }

    pub fn with_image(mut self, image: TaskImage) -> Self {
        self.image = Some(image);
        self
    }
}
