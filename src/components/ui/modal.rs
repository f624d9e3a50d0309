use leptos::prelude::*;

/// Overlay dialog. Children supply the body, usually a form with its own
/// padding, and the close button in the header fires `on_close`.
#[component]
pub fn Modal(
    title: &'static str,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let width = if wide { "max-w-2xl" } else { "max-w-md" };

    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50 backdrop-blur-sm">
            <div class=format!(
                "bg-white dark:bg-gray-800 rounded-xl shadow-xl border border-gray-200 dark:border-gray-700 w-full {width} max-h-[90vh] overflow-y-auto animate-in fade-in zoom-in duration-200",
            )>
                <div class="px-6 py-4 border-b border-gray-100 dark:border-gray-700 flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">{title}</h2>
                    <button
                        on:click=move |_| on_close.run(())
                        class="text-gray-400 hover:text-gray-600 dark:hover:text-gray-200"
                    >
                        <span class="material-symbols-outlined">"close"</span>
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}
