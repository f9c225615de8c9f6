use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Request body for logging in
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both credentials, when present. Empty strings count as present and
    /// are left to fail authentication.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub msg: String,
    /// Short-lived bearer token for authenticated endpoints
    pub access: String,
    /// Longer-lived token exchangeable for a new access token
    pub refresh: String,
}

#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest").finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        let mut request = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        assert_eq!(request.credentials(), None);

        request.password = Some("pw".to_string());
        assert_eq!(request.credentials(), Some(("a@x.com", "pw")));

        request.email = None;
        assert_eq!(request.credentials(), None);
    }

    #[test]
    fn test_empty_credentials_are_present() {
        let request = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: Some(String::new()),
        };
        assert_eq!(request.credentials(), Some(("a@x.com", "")));
    }
}
