//! Client helpers for user management endpoints. These functions keep endpoint
//! paths centralized and assume the backend enforces authorization.

use crate::{
    app_lib::{AppError, get_json, patch_json_response, post_empty_response, post_json_response},
    features::users::types::{TemporaryPasswordResponse, UserCreate, UserOut, UserUpdate},
};

/// Fetches all user accounts.
pub async fn list_users() -> Result<Vec<UserOut>, AppError> {
    get_json("/users").await
}

/// Creates a user account.
pub async fn create_user(request: &UserCreate) -> Result<UserOut, AppError> {
    post_json_response("/users", request).await
}

/// Applies a partial update to a user account.
pub async fn update_user(id: &str, request: &UserUpdate) -> Result<UserOut, AppError> {
    require_id(id)?;
    patch_json_response(&format!("/users/{id}"), request).await
}

/// Issues a temporary password and forces a change on next login.
pub async fn reset_password(id: &str) -> Result<TemporaryPasswordResponse, AppError> {
    require_id(id)?;
    post_empty_response(&format!("/users/{id}/reset-password")).await
}

fn require_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Config("User id is required.".to_string()));
    }
    Ok(())
}
