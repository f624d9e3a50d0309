//! Request and response types for auth-related API calls. These payloads carry
//! credentials and one-time codes, so they must never be logged.

use serde::{Deserialize, Serialize};

/// Credentials for `POST /auth/token`. The MFA fields stay `None` on the
/// first attempt; exactly one of them is set when answering a challenge.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_code: Option<String>,
}

/// Token grant from `POST /auth/token`. The expiry fields on the wire are
/// ignored; a stored token is trusted until the backend rejects it.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub mfa_enrollment_required: bool,
    #[serde(default)]
    pub mfa_remaining_skips: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct MfaVerifyRequest {
    pub code: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MfaEnrollResponse {
    pub secret: String,
    pub otpauth_url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RecoveryCodesResponse {
    pub recovery_codes: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MfaStatusResponse {
    pub mfa_enabled: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MfaSkipResponse {
    pub remaining_skips: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_omits_unset_mfa_fields() {
        let request = LoginRequest {
            email: "handler@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            mfa_code: None,
            recovery_code: None,
        };

        let json = serde_json::to_string(&request).expect("serialize login");
        assert!(!json.contains("mfa_code"));
        assert!(!json.contains("recovery_code"));
    }

    #[test]
    fn login_response_defaults_enrollment_fields() {
        let json = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_at": "2026-02-01T12:00:00Z"
        }"#;

        let response: LoginResponse = serde_json::from_str(json).expect("deserialize login");
        assert!(!response.mfa_enrollment_required);
        assert_eq!(response.mfa_remaining_skips, 0);
    }
}
