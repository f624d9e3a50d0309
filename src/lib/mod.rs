//! Shared infrastructure for the frontend: HTTP helpers, configuration,
//! error types, and browser storage access.
//!
//! Session handling is split across layers. [`storage`] owns the persisted
//! keys, [`api`] attaches the bearer token to outgoing requests, and the
//! auth feature decides when a persisted token is trusted (never before the
//! backend has confirmed it).

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod storage;

/// Git commit recorded at build time, surfaced in the page footer.
pub(crate) const GIT_COMMIT_HASH: &str = env!("COMPASS_WEB_GIT_SHA");

#[cfg(target_arch = "wasm32")]
pub(crate) use api::{
    delete_empty, get_json, get_json_with_token, patch_json_response, post_empty,
    post_empty_response, post_form_response, post_json, post_json_response, query_string,
};
pub(crate) use errors::AppError;
