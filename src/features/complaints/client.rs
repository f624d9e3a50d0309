//! Client wrappers for the complaints API. One function per endpoint keeps
//! paths centralized; permission checks stay on the backend.

use crate::{
    app_lib::{
        AppError, delete_empty, get_json, patch_json_response, post_empty_response,
        post_form_response, post_json_response, query_string,
    },
    features::complaints::types::{
        CloseRequest, CommunicationOut, ComplaintCreate, ComplaintFilters, ComplaintOut,
        EscalateRequest, EventOut, MetricsResponse, NewCommunication, OutcomeCreate, OutcomeOut,
        RedressCreate, RedressOut, RedressUpdate, ReopenRequest,
    },
};
use web_sys::{File, FormData};

/// Fetches one page of complaints matching the filters, newest received
/// first.
pub async fn list_complaints(filters: &ComplaintFilters) -> Result<Vec<ComplaintOut>, AppError> {
    let query = query_string(&filters.to_pairs());
    get_json(&format!("/complaints?{query}")).await
}

/// Fetches the dashboard metrics snapshot.
pub async fn metrics() -> Result<MetricsResponse, AppError> {
    get_json("/complaints/metrics").await
}

pub async fn get_complaint(id: &str) -> Result<ComplaintOut, AppError> {
    get_json(&format!("/complaints/{id}")).await
}

pub async fn create_complaint(request: &ComplaintCreate) -> Result<ComplaintOut, AppError> {
    post_json_response("/complaints", request).await
}

/// Admin only: removes a complaint and everything attached to it.
pub async fn delete_complaint(id: &str) -> Result<(), AppError> {
    delete_empty(&format!("/complaints/{id}")).await
}

pub async fn acknowledge(id: &str) -> Result<ComplaintOut, AppError> {
    post_empty_response(&format!("/complaints/{id}/acknowledge")).await
}

/// Assigns a handler; the target travels as a query parameter.
pub async fn assign(id: &str, handler_id: &str) -> Result<ComplaintOut, AppError> {
    let query = query_string(&[("handler_id", handler_id.to_string())]);
    post_empty_response(&format!("/complaints/{id}/assign?{query}")).await
}

pub async fn start_investigation(id: &str) -> Result<ComplaintOut, AppError> {
    post_empty_response(&format!("/complaints/{id}/investigate")).await
}

/// Records or revises the outcome for a complaint.
pub async fn record_outcome(id: &str, request: &OutcomeCreate) -> Result<OutcomeOut, AppError> {
    post_json_response(&format!("/complaints/{id}/outcome"), request).await
}

pub async fn issue_final_response(id: &str) -> Result<ComplaintOut, AppError> {
    post_empty_response(&format!("/complaints/{id}/final-response")).await
}

pub async fn close(id: &str, request: &CloseRequest) -> Result<ComplaintOut, AppError> {
    post_json_response(&format!("/complaints/{id}/close"), request).await
}

pub async fn close_non_reportable(
    id: &str,
    request: &CloseRequest,
) -> Result<ComplaintOut, AppError> {
    post_json_response(&format!("/complaints/{id}/close-non-reportable"), request).await
}

pub async fn escalate(id: &str, request: &EscalateRequest) -> Result<ComplaintOut, AppError> {
    post_json_response(&format!("/complaints/{id}/escalate"), request).await
}

pub async fn reopen(id: &str, request: &ReopenRequest) -> Result<ComplaintOut, AppError> {
    post_json_response(&format!("/complaints/{id}/reopen"), request).await
}

/// Fetches the audit trail, newest first.
pub async fn list_events(id: &str) -> Result<Vec<EventOut>, AppError> {
    get_json(&format!("/complaints/{id}/events")).await
}

/// Adds a case note with optional attachments as one multipart request.
/// Marking it as the final response makes the backend issue that response,
/// which requires a recorded outcome.
pub async fn add_communication(
    id: &str,
    note: &NewCommunication,
    files: &[File],
) -> Result<CommunicationOut, AppError> {
    let form = FormData::new()
        .map_err(|_| AppError::Serialization("Failed to build form data.".to_string()))?;

    let fields = [
        ("channel", note.channel.as_str().to_string()),
        ("direction", note.direction.as_str().to_string()),
        ("summary", note.summary.clone()),
        ("occurred_at", note.occurred_at.clone()),
        ("is_final_response", note.is_final_response.to_string()),
    ];
    for (name, value) in fields {
        form.append_with_str(name, &value)
            .map_err(|_| AppError::Serialization("Failed to build form data.".to_string()))?;
    }
    for file in files {
        form.append_with_blob("files", file)
            .map_err(|_| AppError::Serialization("Failed to attach file.".to_string()))?;
    }

    post_form_response(&format!("/complaints/{id}/communications"), form).await
}

pub async fn add_redress(id: &str, request: &RedressCreate) -> Result<RedressOut, AppError> {
    post_json_response(&format!("/complaints/{id}/redress"), request).await
}

pub async fn update_redress(
    id: &str,
    redress_id: &str,
    request: &RedressUpdate,
) -> Result<RedressOut, AppError> {
    patch_json_response(&format!("/complaints/{id}/redress/{redress_id}"), request).await
}
