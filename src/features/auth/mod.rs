//! Auth feature module covering session bootstrap, the MFA-gated login flow,
//! and route guarding. It keeps authentication logic out of the UI and must
//! stay aligned with backend protocol expectations. This module touches
//! security boundaries and must avoid logging secrets or token material.
//!
//! Flow Overview: bootstrap validates any persisted token against `/auth/me`
//! before trusting it. Login exchanges credentials for a token, confirms the
//! account, and only then persists the session. The flow state machine owns
//! every one-time code the login screen collects.

#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod flow;
pub(crate) mod guard;
#[cfg(target_arch = "wasm32")]
mod guards;
pub(crate) mod qr;
pub(crate) mod session;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub(crate) mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::Guarded;
