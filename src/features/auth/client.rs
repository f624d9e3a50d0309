//! Client wrappers for auth API endpoints. These helpers centralize endpoint
//! paths and keep credential handling consistent; none of them write to
//! browser storage.

use crate::{
    app_lib::{
        AppError, get_json, get_json_with_token, post_empty, post_empty_response, post_json,
        post_json_response,
    },
    features::auth::types::{
        ChangePasswordRequest, LoginRequest, LoginResponse, MfaEnrollResponse, MfaSkipResponse,
        MfaStatusResponse, MfaVerifyRequest, RecoveryCodesResponse,
    },
    features::users::types::UserOut,
};

/// Exchanges credentials (and at most one MFA code) for a token grant.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, AppError> {
    post_json_response("/auth/token", request).await
}

/// Fetches the signed-in account using the stored token.
pub async fn me() -> Result<UserOut, AppError> {
    get_json("/auth/me").await
}

/// Fetches the account for a token that has not been persisted yet. Used to
/// confirm a fresh grant before any session key is written.
pub async fn me_with_token(token: &str) -> Result<UserOut, AppError> {
    get_json_with_token("/auth/me", token).await
}

/// Reports whether the signed-in account has MFA enabled.
pub async fn mfa_status() -> Result<MfaStatusResponse, AppError> {
    get_json("/auth/mfa/status").await
}

/// Starts authenticator enrollment and returns the provisioning secret.
/// The response must never be logged.
pub async fn mfa_enroll() -> Result<MfaEnrollResponse, AppError> {
    post_empty_response("/auth/mfa/enroll").await
}

/// Confirms enrollment with a TOTP code and returns one-time recovery codes.
pub async fn mfa_verify(code: &str) -> Result<RecoveryCodesResponse, AppError> {
    let request = MfaVerifyRequest {
        code: code.trim().to_string(),
    };
    post_json_response("/auth/mfa/verify", &request).await
}

/// Consumes one enrollment skip for the signed-in account.
pub async fn mfa_skip() -> Result<MfaSkipResponse, AppError> {
    post_empty_response("/auth/mfa/skip").await
}

/// Changes the signed-in account's password.
pub async fn change_password(request: &ChangePasswordRequest) -> Result<(), AppError> {
    post_json("/auth/password/change", request).await
}

/// Admin action: wipes a user's MFA enrollment so they can re-enroll.
pub async fn reset_user_mfa(user_id: &str) -> Result<(), AppError> {
    post_empty(&format!("/auth/mfa/reset/{user_id}")).await
}

/// Admin action: reissues recovery codes for an enrolled user.
pub async fn regenerate_recovery_codes(user_id: &str) -> Result<RecoveryCodesResponse, AppError> {
    post_empty_response(&format!("/auth/mfa/recovery/{user_id}/regenerate")).await
}
