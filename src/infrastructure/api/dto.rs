use serde::{Deserialize, Serialize};

use crate::domain::entities::UserProfile;

/// Credentials sent to `/auth/login`.
#[derive(Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Account form sent to `/auth/register`.
#[derive(Serialize)]
pub struct RegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Profile of the authenticated account.
    pub user: UserProfile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
pub struct GenreBody<'a> {
    pub name: &'a str,
}

/// Backend error body. Different endpoints use `message` or `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parsing() {
        let json = r#"{
            "accessToken": "abc.def.ghi",
            "user": {"id": 3, "name": "Ada", "email": "ada@example.com", "role": "admin"}
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.access_token, "abc.def.ghi");
        assert!(response.user.role().is_admin());
    }

    #[test]
    fn test_error_message_fallback() {
        let body: ErrorResponse = serde_json::from_str(r#"{"error": "Email taken"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email taken"));

        let blank: ErrorResponse = serde_json::from_str(r#"{"message": " "}"#).unwrap();
        assert!(blank.into_message().is_none());
    }
}
