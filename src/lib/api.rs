//! HTTP plumbing for the backend API. Every request goes through one
//! dispatch path: bearer token from storage, a 10 s abort timer, and error
//! mapping that keeps the backend's `detail` string readable in banners.
//! Helpers never write storage and never redirect; session reactions to
//! failures belong to the auth layer.

use super::{
    config::AppConfig,
    errors::AppError,
    storage::{KEY_TOKEN, KeyValueStore, LocalStorage},
};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{Serialize, de::DeserializeOwned};
use web_sys::{AbortController, FormData};

const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Cap on error-body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// What travels in the request body. JSON is pre-serialized so encoding
/// failures surface before any network activity.
enum RequestBody {
    None,
    Empty,
    Json(String),
    Form(FormData),
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, AppError> {
    let response = dispatch(Verb::Get, path, stored_token(), RequestBody::None).await?;
    parse_json(response).await
}

/// GET with an explicit bearer token, for the identity fetch that runs
/// before a login's token has been persisted.
pub async fn get_json_with_token<T: DeserializeOwned>(
    path: &str,
    token: &str,
) -> Result<T, AppError> {
    let response = dispatch(
        Verb::Get,
        path,
        Some(token.to_string()),
        RequestBody::None,
    )
    .await?;
    parse_json(response).await
}

pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), AppError> {
    let payload = encode_body(body)?;
    let response = dispatch(Verb::Post, path, stored_token(), RequestBody::Json(payload)).await?;
    expect_empty(response).await
}

pub async fn post_json_response<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let payload = encode_body(body)?;
    let response = dispatch(Verb::Post, path, stored_token(), RequestBody::Json(payload)).await?;
    parse_json(response).await
}

pub async fn post_empty(path: &str) -> Result<(), AppError> {
    let response = dispatch(Verb::Post, path, stored_token(), RequestBody::Empty).await?;
    expect_empty(response).await
}

pub async fn post_empty_response<T: DeserializeOwned>(path: &str) -> Result<T, AppError> {
    let response = dispatch(Verb::Post, path, stored_token(), RequestBody::Empty).await?;
    parse_json(response).await
}

/// Multipart POST. The browser supplies the boundary header, so none is set
/// here.
pub async fn post_form_response<T: DeserializeOwned>(
    path: &str,
    form: FormData,
) -> Result<T, AppError> {
    let response = dispatch(Verb::Post, path, stored_token(), RequestBody::Form(form)).await?;
    parse_json(response).await
}

pub async fn patch_json_response<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let payload = encode_body(body)?;
    let response = dispatch(Verb::Patch, path, stored_token(), RequestBody::Json(payload)).await?;
    parse_json(response).await
}

pub async fn delete_empty(path: &str) -> Result<(), AppError> {
    let response = dispatch(Verb::Delete, path, stored_token(), RequestBody::None).await?;
    expect_empty(response).await
}

/// Percent-encodes the given pairs into a query string, skipping empty
/// values. Returns an empty string when nothing survives.
pub fn query_string(pairs: &[(&str, String)]) -> String {
    let mut parts = Vec::new();
    for (name, value) in pairs {
        if value.is_empty() {
            continue;
        }
        let encoded: String = js_sys::encode_uri_component(value).into();
        parts.push(format!("{name}={encoded}"));
    }
    parts.join("&")
}

/// The single request path: abort timer armed before the request is built,
/// bearer attached when a token exists, body per the variant.
async fn dispatch(
    verb: Verb,
    path: &str,
    token: Option<String>,
    body: RequestBody,
) -> Result<gloo_net::http::Response, AppError> {
    let url = build_url(path);
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Could not set up the request timeout.".to_string()))?;
    let signal = controller.signal();
    let abort_handle = controller.clone();
    let _timer = Timeout::new(DEFAULT_TIMEOUT_MS, move || abort_handle.abort());

    let mut builder = match verb {
        Verb::Get => Request::get(&url),
        Verb::Post => Request::post(&url),
        Verb::Patch => Request::patch(&url),
        Verb::Delete => Request::delete(&url),
    }
    .abort_signal(Some(&signal));
    if let Some(token) = token.as_deref() {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }

    let request = match body {
        RequestBody::None => builder.build(),
        RequestBody::Empty => builder.body(""),
        RequestBody::Json(payload) => builder
            .header("Content-Type", "application/json")
            .body(payload),
        RequestBody::Form(form) => builder.body(form),
    }
    .map_err(|err| AppError::Serialization(format!("Could not assemble the request: {err}")))?;

    request.send().await.map_err(|err| {
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("timeout") || lowered.contains("abort") {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else {
            AppError::Network(message)
        }
    })
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Could not encode the request body: {err}")))
}

fn stored_token() -> Option<String> {
    LocalStorage.get(KEY_TOKEN)
}

/// Joins the configured base and the path without doubling slashes. An
/// empty base leaves relative paths for same-origin deployments.
fn build_url(path: &str) -> String {
    let config = AppConfig::load();
    let base = config.api_base_url.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

async fn parse_json<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, AppError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| AppError::Parse(format!("Could not decode the response: {err}")))
}

async fn expect_empty(response: gloo_net::http::Response) -> Result<(), AppError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    Ok(())
}

async fn http_error(response: gloo_net::http::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message(body),
    }
}

/// Prefers the backend's JSON `detail` field, falls back to the trimmed
/// body, and truncates so a hostile body cannot flood the UI.
fn error_message(body: String) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str().map(str::to_string))
        });
    let message = match detail {
        Some(detail) => detail,
        None => body.trim().to_string(),
    };
    if message.is_empty() {
        "Request failed.".to_string()
    } else {
        message.chars().take(MAX_ERROR_CHARS).collect()
    }
}
