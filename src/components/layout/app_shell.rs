//! Authenticated page chrome: the Compass top bar with role-dependent
//! navigation and the content container. Link visibility is presentation
//! only; the backend enforces access on every call.

use crate::features::auth::{guard::LOGIN_PATH, state::use_auth};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_navigate};

const NAV_LINK_CLASS: &str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let auth = use_auth();
    let session = auth.session;
    let is_admin = Signal::derive(move || session.get().is_some_and(|s| s.is_admin()));
    let can_create = Signal::derive(move || session.get().is_some_and(|s| !s.is_read_only()));
    let display_name = Signal::derive(move || {
        session
            .get()
            .map(|s| s.name)
            .unwrap_or_else(|| "Profile".to_string())
    });
    let role_label = Signal::derive(move || {
        session
            .get()
            .map(|s| match s.role_parsed() {
                Some(role) => role.label().to_string(),
                None => s.role,
            })
            .unwrap_or_default()
    });

    // None means the link shows for every signed-in role.
    let links: [(&'static str, &'static str, Option<Signal<bool>>); 5] = [
        ("/", "Dashboard", None),
        ("/complaints", "Complaints", None),
        ("/complaints/new", "New complaint", Some(can_create)),
        ("/admin", "Admin", Some(is_admin)),
        ("/reference", "Reference", Some(is_admin)),
    ];

    let navigate = use_navigate();
    let on_sign_out = move |_| {
        auth.sign_out();
        set_menu_open.set(false);
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-800">
                <div class="mx-auto flex max-w-screen-xl flex-wrap items-center justify-between p-4">
                    <A
                        href="/"
                        {..}
                        class="flex items-center gap-3"
                        on:click=move |_| set_menu_open.set(false)
                    >
                        <img src="/logo.svg" class="h-8" alt="Compass" />
                        <span class="font-semibold whitespace-nowrap dark:text-white">
                            "Compass"
                        </span>
                    </A>
                    <button
                        type="button"
                        class="inline-flex h-10 w-10 items-center justify-center rounded-lg text-gray-500 hover:bg-gray-100 md:hidden dark:text-gray-400 dark:hover:bg-gray-700"
                        aria-controls="primary-nav"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        <span class="sr-only">"Open main menu"</span>
                        <span class="material-symbols-outlined" aria-hidden="true">
                            "menu"
                        </span>
                    </button>
                    <nav
                        id="primary-nav"
                        class="w-full md:block md:w-auto"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="mt-4 flex flex-col rounded-lg border border-gray-100 bg-gray-50 p-4 font-medium md:mt-0 md:flex-row md:items-center md:gap-6 md:border-0 md:bg-white md:p-0 dark:border-gray-700 dark:bg-gray-800 md:dark:bg-gray-900">
                            {links
                                .into_iter()
                                .map(|(href, label, visible)| {
                                    view! {
                                        <Show when=move || {
                                            visible.map(|v| v.get()).unwrap_or(true)
                                        }>
                                            <li>
                                                <A
                                                    href=href
                                                    {..}
                                                    class=NAV_LINK_CLASS
                                                    on:click=move |_| set_menu_open.set(false)
                                                >
                                                    {label}
                                                </A>
                                            </li>
                                        </Show>
                                    }
                                })
                                .collect_view()}
                            <li>
                                <A
                                    href="/profile"
                                    {..}
                                    class=NAV_LINK_CLASS
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    {move || display_name.get()}
                                    <span class="ml-2 hidden text-xs text-gray-400 md:inline dark:text-gray-500">
                                        {move || role_label.get()}
                                    </span>
                                </A>
                            </li>
                            <li>
                                <button type="button" class=NAV_LINK_CLASS on:click=on_sign_out>
                                    "Sign out"
                                </button>
                            </li>
                        </ul>
                    </nav>
                </div>
            </header>
            <main class="flex-1">
                <div class="mx-auto w-full max-w-screen-xl px-4 py-6">{children()}</div>
            </main>
        </div>
    }
}
