use serde::{Deserialize, Serialize};

/// Topic in the learning catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub id: String,
    pub title: String,
    /// URL-friendly identifier
    pub slug: String,
    /// School class / grade this topic belongs to
    #[serde(rename = "schoolClass", alias = "school_class")]
    pub school_class: String,
    /// Parent topic for nested catalogues, None for roots
    #[serde(rename = "parentId", alias = "parent_id", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", alias = "updated_at", default)]
    pub updated_at: Option<String>,
}

/// Request body for creating or updating a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDraft {
    pub title: String,
    pub slug: String,
    #[serde(rename = "school_class", alias = "schoolClass")]
    pub school_class: String,
    #[serde(rename = "parent_id", alias = "parentId")]
    pub parent_id: Option<String>,
}

impl TopicDraft {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        school_class: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            school_class: school_class.into(),
            parent_id: None,
        }
    }

    /// Nest this topic under a parent
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
