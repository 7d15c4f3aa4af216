//! User profile and directory operations.

use crate::{
    error::Result,
    http::{ApiRequest, AuthHttp, FormField},
    models::User,
};

/// Avatar image attached to a profile update
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Operations under `/api/v1/user`
#[derive(Clone)]
pub struct UsersApi {
    http: AuthHttp,
}

impl UsersApi {
    pub(crate) fn new(http: AuthHttp) -> Self {
        Self { http }
    }

    /// Fetch the authenticated user's profile
    pub async fn profile(&self) -> Result<User> {
        self.http
            .execute_json(
                ApiRequest::get("/api/v1/user/profile"),
                "Failed to fetch profile",
            )
            .await
    }

    /// Update the authenticated user's profile.
    ///
    /// Multipart form: `email`, `displayName`, optional `avatar` file part.
    pub async fn update_profile(
        &self,
        email: &str,
        display_name: &str,
        avatar: Option<AvatarUpload>,
    ) -> Result<User> {
        let mut fields = vec![
            FormField::Text {
                name: "email".to_string(),
                value: email.to_string(),
            },
            FormField::Text {
                name: "displayName".to_string(),
                value: display_name.to_string(),
            },
        ];

        if let Some(avatar) = avatar {
            fields.push(FormField::File {
                name: "avatar".to_string(),
                file_name: avatar.file_name,
                mime_type: avatar.mime_type,
                bytes: avatar.bytes,
            });
        }

        self.http
            .execute_json(
                ApiRequest::put("/api/v1/user/profile").multipart(fields),
                "Failed to update profile",
            )
            .await
    }

    /// List all platform users
    pub async fn list_all(&self) -> Result<Vec<User>> {
        self.http
            .execute_json(ApiRequest::get("/api/v1/user/all"), "Failed to fetch users")
            .await
    }
}
