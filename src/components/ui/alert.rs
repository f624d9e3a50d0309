//! Inline alert banners. Messages are rendered as-is, so callers keep
//! secrets and tokens out of them.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
    Info,
    Warning,
}

impl AlertKind {
    fn classes(self) -> &'static str {
        match self {
            AlertKind::Error => {
                "rounded-lg bg-red-50 border border-red-200 px-4 py-3 text-sm text-red-800 dark:bg-red-900/30 dark:border-red-400 dark:text-red-200"
            }
            AlertKind::Success => {
                "rounded-lg bg-emerald-50 border border-emerald-200 px-4 py-3 text-sm text-emerald-800 dark:bg-emerald-900/30 dark:border-emerald-400 dark:text-emerald-200"
            }
            AlertKind::Info => {
                "rounded-lg bg-blue-50 border border-blue-200 px-4 py-3 text-sm text-blue-800 dark:bg-blue-900/30 dark:border-blue-400 dark:text-blue-200"
            }
            AlertKind::Warning => {
                "rounded-lg bg-amber-50 border border-amber-200 px-4 py-3 text-sm text-amber-800 dark:bg-amber-900/30 dark:border-amber-400 dark:text-amber-200"
            }
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    view! { <div class=kind.classes() role="alert">{message}</div> }
}
