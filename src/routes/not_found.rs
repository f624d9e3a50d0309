//! Fallback route for paths the router does not know.

use crate::components::AppShell;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <NotFoundContent />
        </AppShell>
    }
}

/// Inner 404 content without the shell, for pages that already provide one,
/// such as a complaint detail view with an unknown id.
#[component]
pub fn NotFoundContent() -> impl IntoView {
    view! {
        <div class="mx-auto mt-16 max-w-md rounded-lg border border-gray-200 bg-white p-8 text-center shadow-sm dark:border-gray-700 dark:bg-gray-800">
            <span class="material-symbols-outlined text-5xl text-gray-300 dark:text-gray-600">
                "explore_off"
            </span>
            <h1 class="mt-3 text-xl font-semibold text-gray-900 dark:text-white">
                "Page not found"
            </h1>
            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                "The page you requested is missing or you don't have permission to view it."
            </p>
            <div class="mt-6 flex items-center justify-center gap-3">
                <A
                    href="/"
                    {..}
                    class="rounded-lg bg-blue-700 px-4 py-2 text-sm font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
                >
                    "Go to dashboard"
                </A>
                <button
                    class="rounded-lg border border-gray-300 bg-white px-4 py-2 text-sm font-medium text-gray-700 hover:bg-gray-50 dark:border-gray-600 dark:bg-gray-800 dark:text-gray-300 dark:hover:bg-gray-700"
                    on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            if let Ok(history) = window.history() {
                                let _ = history.back();
                            }
                        }
                    }
                >
                    "Go back"
                </button>
            </div>
        </div>
    }
}
