use serde::{Deserialize, Serialize};

/// Role assigned to a platform account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        }
    }

    /// True if the role may create and edit tasks
    pub fn can_author(&self) -> bool {
        matches!(self, Self::Admin | Self::Teacher)
    }
}

/// Authenticated user profile.
///
/// Immutable snapshot fetched from the backend; replaced wholesale on each
/// successful profile fetch, never partially mutated by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name shown in the UI
    #[serde(rename = "displayName", alias = "display_name", alias = "name")]
    pub display_name: String,
    pub role: UserRole,
    /// Avatar image URL, if the user uploaded one
    #[serde(rename = "avatarUrl", alias = "avatar_url", default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}
