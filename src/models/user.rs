use serde::{Deserialize, Serialize};

/// The `User` struct represents the authenticated user as reported by the backend.
///
/// The wire format is camelCase (`firstName`, `lastName`). A user is only ever
/// replaced as a whole; nothing edits one in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl User {
    /// Construct a new User with optional roles.
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        roles: Option<Vec<String>>,
    ) -> Self {
        User {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            roles,
        }
    }

    /// True if the role set contains `role`. A user without roles holds none.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(|r| r == role))
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login credentials, sent as the JSON body of the login request.
///
/// The store does not validate these; an empty email or password is the UI's problem.
#[derive(Serialize, Deserialize, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a login attempt, shaped for direct rendering by the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResult {
    pub fn success() -> Self {
        LoginResult {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        LoginResult {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Body of `GET /api/v1/auth/me`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct MeResponse {
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_user_without_roles() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.com"
        }))
        .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.display_name(), "A B");
        assert!(user.roles.is_none());
        assert!(!user.has_role("admin"));
    }

    #[test]
    fn has_role_checks_membership() {
        let user = User::new(2, "Eve", "Admin", "eve@example.com", Some(vec!["admin".into()]));
        assert!(user.has_role("admin"));
        assert!(!user.has_role("user"));
    }

    #[test]
    fn me_response_tolerates_null_and_missing_user() {
        let null: MeResponse = serde_json::from_value(json!({ "user": null })).unwrap();
        assert!(null.user.is_none());

        let missing: MeResponse = serde_json::from_value(json!({})).unwrap();
        assert!(missing.user.is_none());
    }

    #[test]
    fn login_result_serializes_without_empty_error() {
        assert_eq!(
            serde_json::to_value(LoginResult::success()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(LoginResult::failure("bad credentials")).unwrap(),
            json!({ "success": false, "error": "bad credentials" })
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("a@b.com", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("hunter2"));
    }
}
