//! Client wrappers for the reference data API. Listing is open to any
//! signed-in user; create and import are admin only, enforced server side.

use crate::{
    app_lib::{AppError, get_json, post_form_response, post_json_response},
    features::reference::types::{ImportResult, ReferenceCreate, ReferenceKind, ReferenceOut},
};
use web_sys::{File, FormData};

/// Fetches one reference list, sorted by name on the backend.
pub async fn list(kind: ReferenceKind) -> Result<Vec<ReferenceOut>, AppError> {
    get_json(&format!("/reference/{}", kind.segment())).await
}

/// Adds a single named entry. The backend rejects duplicates with a 400.
pub async fn create(kind: ReferenceKind, name: &str) -> Result<ReferenceOut, AppError> {
    let request = ReferenceCreate {
        name: name.trim().to_string(),
    };
    post_json_response(&format!("/reference/{}", kind.segment()), &request).await
}

/// Uploads a CSV with a `name` column; blank and duplicate rows are skipped.
pub async fn import_csv(kind: ReferenceKind, file: &File) -> Result<ImportResult, AppError> {
    let form = FormData::new()
        .map_err(|_| AppError::Serialization("Failed to build form data.".to_string()))?;
    form.append_with_blob("file", file)
        .map_err(|_| AppError::Serialization("Failed to attach file.".to_string()))?;
    post_form_response(&format!("/reference/{}/import", kind.segment()), form).await
}
