//! User accounts as the admin screen and assignment pickers see them.

#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod types;
