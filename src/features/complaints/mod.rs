//! Complaint case management: the wire model, the lifecycle rules shared by
//! the list, detail, and intake pages, and the API client.

#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod types;
pub(crate) mod workflow;
