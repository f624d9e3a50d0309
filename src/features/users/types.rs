use serde::{Deserialize, Serialize};

/// Role assigned to an account. The backend enforces what each role may do;
/// the frontend only uses roles to hide controls that would be rejected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ComplaintsHandler,
    ComplaintsManager,
    Reviewer,
    ReadOnly,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ComplaintsHandler => "complaints_handler",
            UserRole::ComplaintsManager => "complaints_manager",
            UserRole::Reviewer => "reviewer",
            UserRole::ReadOnly => "read_only",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::ComplaintsHandler => "Complaints Handler",
            UserRole::ComplaintsManager => "Complaints Manager",
            UserRole::Reviewer => "Reviewer",
            UserRole::ReadOnly => "Read only",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "complaints_handler" => Some(UserRole::ComplaintsHandler),
            "complaints_manager" => Some(UserRole::ComplaintsManager),
            "reviewer" => Some(UserRole::Reviewer),
            "read_only" => Some(UserRole::ReadOnly),
            _ => None,
        }
    }

    /// All roles in the order the admin screen lists them.
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::ComplaintsHandler,
        UserRole::ComplaintsManager,
        UserRole::Reviewer,
        UserRole::ReadOnly,
    ];
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserOut {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub mfa_enabled: bool,
    pub mfa_skip_count: i64,
    pub must_change_password: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Partial update; only set fields are sent.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TemporaryPasswordResponse {
    pub temporary_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_spellings_round_trip() {
        for role in UserRole::ALL {
            let json = serde_json::to_string(&role).expect("serialize role");
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let parsed: UserRole = serde_json::from_str(&json).expect("deserialize role");
            assert_eq!(parsed, role);
            assert_eq!(UserRole::from_wire(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_wire("superuser"), None);
    }

    #[test]
    fn user_update_sends_only_set_fields() {
        let update = UserUpdate {
            role: Some(UserRole::Reviewer),
            ..UserUpdate::default()
        };

        let json = serde_json::to_string(&update).expect("serialize update");
        assert_eq!(json, "{\"role\":\"reviewer\"}");
    }

    #[test]
    fn user_out_parses_backend_shape() {
        let json = r#"{
            "id": "8c1f2f4e-31f0-4c2e-a9a6-0f0a3d2a7c11",
            "email": "handler@example.com",
            "full_name": "Case Handler",
            "role": "complaints_handler",
            "is_active": true,
            "mfa_enabled": false,
            "mfa_skip_count": 2,
            "must_change_password": false,
            "created_at": "2026-01-05T09:30:00Z"
        }"#;

        let user: UserOut = serde_json::from_str(json).expect("deserialize user");
        assert_eq!(user.role, UserRole::ComplaintsHandler);
        assert_eq!(user.mfa_skip_count, 2);
        assert!(!user.must_change_password);
    }
}
