//! Compass frontend entry point. Browser modules are gated to wasm32;
//! `app_lib` and `features` stay in the host build so their logic tests run
//! under plain `cargo test`.

#[path = "lib/mod.rs"]
mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
mod features;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
use crate::features::auth::state::AuthProvider;
#[cfg(target_arch = "wasm32")]
use crate::routes::AppRoutes;
#[cfg(target_arch = "wasm32")]
use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use leptos_router::components::Router;

#[cfg(target_arch = "wasm32")]
#[component]
fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Router>
                <AppRoutes />
            </Router>
        </AuthProvider>
    }
}

#[cfg(target_arch = "wasm32")]
pub fn main() {
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
