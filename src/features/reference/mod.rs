//! Reference data lookups: products, brokers, and insurers used by the
//! complaint intake and filter forms.

#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod types;
