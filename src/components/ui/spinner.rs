use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div
            role="status"
            aria-live="polite"
            aria-label=label.unwrap_or("Loading")
            class="inline-block h-8 w-8 animate-spin rounded-full border-4 border-gray-200 border-t-blue-600 dark:border-gray-700 dark:border-t-blue-500"
        ></div>
    }
}
