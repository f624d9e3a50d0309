//! Complaints list route. Filters and search run server-side; sorting and the
//! "unassigned" handler choice are applied to the fetched page because the
//! API offers neither.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner, StatusBadge};
use crate::features::auth::Guarded;
use crate::features::complaints::{
    client,
    types::{ComplaintFilters, ComplaintOut, ComplaintStatus, format_date},
    workflow::{self, SortField},
};
use crate::features::users::client as users_client;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

const PAGE_SIZE: u32 = 50;

const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const SECONDARY_BUTTON_CLASS: &str = "px-3 py-2 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700";

#[component]
pub fn ComplaintsListPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <ListContent />
            </AppShell>
        </Guarded>
    }
}

/// One fetched page plus whether another page is likely to exist. The API
/// returns no total count, so the pager assumes more pages while full pages
/// keep coming back.
async fn load_page(
    filters: ComplaintFilters,
    unassigned_only: bool,
) -> Result<(Vec<ComplaintOut>, bool), AppError> {
    let mut items = client::list_complaints(&filters).await?;
    let has_more = items.len() as u32 == filters.page_size;
    if unassigned_only {
        items.retain(|complaint| complaint.assigned_handler_id.is_none());
    }
    Ok((items, has_more))
}

#[component]
fn ListContent() -> impl IntoView {
    let query = use_query_map();
    // Deep links from the dashboard arrive as query params, read once.
    let initial = query.get_untracked();

    let (search, set_search) = signal(initial.get("search").unwrap_or_default());
    let (status_filter, set_status_filter) =
        signal(initial.get("status").unwrap_or_else(|| "all".to_string()));
    let (handler_filter, set_handler_filter) =
        signal(initial.get("handler").unwrap_or_else(|| "all".to_string()));
    let (overdue_only, set_overdue_only) = signal(initial.get("overdue").as_deref() == Some("true"));
    let (vulnerable_only, set_vulnerable_only) =
        signal(initial.get("vulnerability").as_deref() == Some("true"));
    let (page, set_page) = signal(1u32);
    let (sort_field, set_sort_field) = signal(SortField::Received);
    let (ascending, set_ascending) = signal(false);
    // Bumped by Enter or Refresh so the typed search re-runs without a
    // filter change.
    let (version, set_version) = signal(0u32);

    let handlers = LocalResource::new(move || async move { users_client::list_users().await });

    let complaints = LocalResource::new(move || {
        version.track();
        let current_page = page.get();
        let status = ComplaintStatus::from_wire(&status_filter.get());
        let handler = handler_filter.get();
        let overdue = overdue_only.get();
        let vulnerable = vulnerable_only.get();
        // The typed search applies on Enter or Refresh, not per keystroke.
        let search = search.get_untracked().trim().to_string();

        let filters = ComplaintFilters {
            status,
            handler_id: (handler != "all" && handler != "unassigned").then(|| handler.clone()),
            vulnerability: vulnerable.then_some(true),
            overdue: overdue.then_some(true),
            search: (!search.is_empty()).then_some(search),
            page: current_page,
            page_size: PAGE_SIZE,
            ..Default::default()
        };
        let unassigned_only = handler == "unassigned";
        async move { load_page(filters, unassigned_only).await }
    });

    let run_search = move || {
        set_page.set(1);
        set_version.update(|version| *version += 1);
    };
    let refresh = move || set_version.update(|version| *version += 1);

    let clear_filters = move || {
        set_search.set(String::new());
        set_status_filter.set("all".to_string());
        set_handler_filter.set("all".to_string());
        set_overdue_only.set(false);
        set_vulnerable_only.set(false);
        set_page.set(1);
    };

    let active_filter_count = Signal::derive(move || {
        [
            !search.get().is_empty(),
            status_filter.get() != "all",
            handler_filter.get() != "all",
            overdue_only.get(),
            vulnerable_only.get(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    });

    let on_sort = Callback::new(move |field: SortField| {
        if sort_field.get_untracked() == field {
            set_ascending.update(|ascending| *ascending = !*ascending);
        } else {
            set_sort_field.set(field);
            set_ascending.set(true);
        }
    });

    let loading = Signal::derive(move || complaints.get().is_none());

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Complaints"</h1>
                <div class="flex gap-2">
                    <button
                        type="button"
                        class=SECONDARY_BUTTON_CLASS
                        disabled=move || loading.get()
                        on:click=move |_| refresh()
                    >
                        {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
                    </button>
                    <A
                        href="/complaints/new"
                        {..}
                        class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800"
                    >
                        "New complaint"
                    </A>
                </div>
            </div>

            <div class="rounded-lg border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800">
                <div class="mb-4 flex items-center justify-between">
                    <h3 class="text-sm font-semibold text-gray-900 dark:text-white">
                        "Filters & search"
                    </h3>
                    <Show when=move || active_filter_count.get() > 0>
                        <button
                            type="button"
                            class=SECONDARY_BUTTON_CLASS
                            on:click=move |_| clear_filters()
                        >
                            {move || format!("Clear all ({})", active_filter_count.get())}
                        </button>
                    </Show>
                </div>

                <div class="grid grid-cols-1 gap-4 md:grid-cols-5">
                    <div class="md:col-span-2">
                        <input
                            type="search"
                            class=FIELD_CLASS
                            placeholder="Search by reference, description, or complainant..."
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    run_search();
                                }
                            }
                            value=move || search.get()
                        />
                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                            "Tip: press Enter or click Refresh to run a new search (server-side)."
                        </p>
                    </div>

                    <div>
                        <label class="block mb-1 text-xs font-medium text-gray-900 dark:text-white">
                            "Status"
                        </label>
                        <select
                            class=FIELD_CLASS
                            on:change=move |ev| set_status_filter.set(event_target_value(&ev))
                            prop:value=move || status_filter.get()
                        >
                            <option value="all">"All statuses"</option>
                            {ComplaintStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    view! { <option value=status.as_str()>{status.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </div>

                    <div>
                        <label class="block mb-1 text-xs font-medium text-gray-900 dark:text-white">
                            "Handler"
                        </label>
                        <select
                            class=FIELD_CLASS
                            on:change=move |ev| set_handler_filter.set(event_target_value(&ev))
                            prop:value=move || {
                                // Re-apply after the options arrive; a deep-linked
                                // handler id otherwise falls back to "All handlers".
                                let _ = handlers.get();
                                handler_filter.get()
                            }
                        >
                            <option value="all">"All handlers"</option>
                            <option value="unassigned">"Unassigned"</option>
                            {move || {
                                handlers
                                    .get()
                                    .and_then(Result::ok)
                                    .map(|users| {
                                        users
                                            .into_iter()
                                            .map(|user| {
                                                view! {
                                                    <option value=user.id>{user.full_name}</option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </div>

                    <div class="flex flex-col justify-center gap-2">
                        <label class="flex cursor-pointer items-center gap-2">
                            <input
                                type="checkbox"
                                class="h-4 w-4 rounded border-gray-300 text-blue-600 focus:ring-blue-500 dark:border-gray-600 dark:bg-gray-700"
                                prop:checked=move || overdue_only.get()
                                on:change=move |ev| set_overdue_only.set(event_target_checked(&ev))
                            />
                            <span class="text-sm text-gray-900 dark:text-white">"Overdue only"</span>
                        </label>
                        <label class="flex cursor-pointer items-center gap-2">
                            <input
                                type="checkbox"
                                class="h-4 w-4 rounded border-gray-300 text-blue-600 focus:ring-blue-500 dark:border-gray-600 dark:bg-gray-700"
                                prop:checked=move || vulnerable_only.get()
                                on:change=move |ev| set_vulnerable_only.set(event_target_checked(&ev))
                            />
                            <span class="text-sm text-gray-900 dark:text-white">
                                "Vulnerable only"
                            </span>
                        </label>
                    </div>
                </div>
            </div>

            {move || match complaints.get() {
                None => view! { <Spinner label="Loading complaints" /> }.into_any(),
                Some(Err(err)) => view! {
                    <div class="space-y-3">
                        <Alert kind=AlertKind::Error message=err.to_string() />
                        <Button on_click=move |_| refresh()>"Retry"</Button>
                    </div>
                }
                .into_any(),
                Some(Ok((mut items, has_more))) => {
                    workflow::sort_page(&mut items, sort_field.get(), ascending.get());
                    let current_page = page.get();
                    let total_pages = if has_more { current_page + 1 } else { current_page };
                    let count = items.len();

                    if items.is_empty() {
                        let filtered = active_filter_count.get_untracked() > 0;
                        view! {
                            <div class="py-12 text-center">
                                <p class="text-sm font-semibold text-gray-900 dark:text-white">
                                    "No complaints found"
                                </p>
                                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                    {if filtered {
                                        "Try adjusting your filters or search criteria"
                                    } else {
                                        "No complaints have been created yet"
                                    }}
                                </p>
                                <Show when=move || filtered>
                                    <button
                                        type="button"
                                        class=format!("{SECONDARY_BUTTON_CLASS} mt-4")
                                        on:click=move |_| clear_filters()
                                    >
                                        "Clear all filters"
                                    </button>
                                </Show>
                            </div>
                        }
                        .into_any()
                    } else {
                        let now: String = js_sys::Date::new_0().to_iso_string().into();
                        view! {
                            <div class="space-y-4">
                                <div class="flex items-center justify-between">
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        {format!(
                                            "Showing {count} complaint{}",
                                            if count == 1 { "" } else { "s" },
                                        )}
                                    </p>
                                    <Show when=move || total_pages > 1>
                                        <Pager page=current_page total_pages=total_pages set_page=set_page />
                                    </Show>
                                </div>

                                <div class="overflow-x-auto rounded-lg border border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-800">
                                    <div class="min-w-[56rem]">
                                        <div class="grid grid-cols-12 gap-3 border-b border-gray-200 bg-gray-50 px-4 py-3 dark:border-gray-700 dark:bg-gray-700/50">
                                            <div class="col-span-2">
                                                <SortHeader
                                                    label="Reference"
                                                    field=SortField::Reference
                                                    sort_field=sort_field
                                                    ascending=ascending
                                                    on_sort=on_sort
                                                />
                                            </div>
                                            <div class="col-span-2">
                                                <SortHeader
                                                    label="Status"
                                                    field=SortField::Status
                                                    sort_field=sort_field
                                                    ascending=ascending
                                                    on_sort=on_sort
                                                />
                                            </div>
                                            <div class="col-span-2">
                                                <SortHeader
                                                    label="Complainant"
                                                    field=SortField::Complainant
                                                    sort_field=sort_field
                                                    ascending=ascending
                                                    on_sort=on_sort
                                                />
                                            </div>
                                            <div class="col-span-2 text-xs font-medium uppercase tracking-wide text-gray-500 dark:text-gray-400">
                                                "Description"
                                            </div>
                                            <div class="col-span-1">
                                                <SortHeader
                                                    label="Received"
                                                    field=SortField::Received
                                                    sort_field=sort_field
                                                    ascending=ascending
                                                    on_sort=on_sort
                                                />
                                            </div>
                                            <div class="col-span-2">
                                                <SortHeader
                                                    label="Handler"
                                                    field=SortField::Handler
                                                    sort_field=sort_field
                                                    ascending=ascending
                                                    on_sort=on_sort
                                                />
                                            </div>
                                            <div class="col-span-1 text-xs font-medium uppercase tracking-wide text-gray-500 dark:text-gray-400">
                                                "Flags"
                                            </div>
                                        </div>
                                        <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                                            {items
                                                .into_iter()
                                                .map(|complaint| {
                                                    view! { <ComplaintRow complaint=complaint now=now.clone() /> }
                                                })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                </div>

                                <Show when=move || total_pages > 1>
                                    <div class="flex justify-center">
                                        <Pager page=current_page total_pages=total_pages set_page=set_page />
                                    </div>
                                </Show>
                            </div>
                        }
                        .into_any()
                    }
                }
            }}
        </div>
    }
}

#[component]
fn ComplaintRow(complaint: ComplaintOut, now: String) -> impl IntoView {
    let overdue = workflow::is_overdue(&complaint, &now);
    let description = if complaint.description.is_empty() {
        "No description".to_string()
    } else {
        complaint.description.clone()
    };
    let handler = complaint
        .assigned_handler_name
        .clone()
        .unwrap_or_else(|| "Unassigned".to_string());

    view! {
        <li>
            <A
                href=format!("/complaints/{}", complaint.id)
                {..}
                class="grid grid-cols-12 items-center gap-3 px-4 py-3 hover:bg-gray-50 dark:hover:bg-gray-700/50"
            >
                <span class="col-span-2 text-sm font-semibold text-gray-900 dark:text-white">
                    {complaint.reference.clone()}
                </span>
                <span class="col-span-2">
                    <StatusBadge status=complaint.status />
                </span>
                <span class="col-span-2 truncate text-sm text-gray-900 dark:text-white">
                    {complaint.complainant.full_name.clone()}
                </span>
                <span class="col-span-2 truncate text-sm text-gray-500 dark:text-gray-400">
                    {description}
                </span>
                <span class="col-span-1 text-sm text-gray-500 dark:text-gray-400">
                    {format_date(&complaint.received_at)}
                </span>
                <span class="col-span-2 truncate text-sm text-gray-500 dark:text-gray-400">
                    {handler}
                </span>
                <span class="col-span-1 flex flex-wrap gap-1">
                    {overdue
                        .then_some(view! {
                            <span class="inline-block rounded bg-red-100 px-2 py-0.5 text-xs font-medium text-red-700 dark:bg-red-900/40 dark:text-red-200">
                                "Overdue"
                            </span>
                        })}
                    {complaint
                        .vulnerability_flag
                        .then_some(view! {
                            <span class="inline-block rounded bg-amber-100 px-2 py-0.5 text-xs font-medium text-amber-800 dark:bg-amber-900/40 dark:text-amber-200">
                                "Vulnerable"
                            </span>
                        })}
                    {complaint
                        .fos_complaint
                        .then_some(view! {
                            <span class="inline-block rounded bg-purple-100 px-2 py-0.5 text-xs font-medium text-purple-700 dark:bg-purple-900/40 dark:text-purple-200">
                                "FOS"
                            </span>
                        })}
                </span>
            </A>
        </li>
    }
}

#[component]
fn SortHeader(
    label: &'static str,
    field: SortField,
    sort_field: ReadSignal<SortField>,
    ascending: ReadSignal<bool>,
    on_sort: Callback<SortField>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="flex items-center gap-1 text-xs font-medium uppercase tracking-wide text-gray-500 hover:text-gray-700 dark:text-gray-400 dark:hover:text-gray-200"
            on:click=move |_| on_sort.run(field)
        >
            {label}
            <span class="material-symbols-outlined text-sm">
                {move || {
                    if sort_field.get() != field {
                        "swap_vert"
                    } else if ascending.get() {
                        "arrow_upward"
                    } else {
                        "arrow_downward"
                    }
                }}
            </span>
        </button>
    }
}

#[component]
fn Pager(page: u32, total_pages: u32, set_page: WriteSignal<u32>) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2">
            <button
                type="button"
                class=SECONDARY_BUTTON_CLASS
                disabled=page <= 1
                on:click=move |_| set_page.update(|current| *current = current.saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            <span class="text-sm text-gray-500 dark:text-gray-400">
                {format!("Page {page} of {total_pages}")}
            </span>
            <button
                type="button"
                class=SECONDARY_BUTTON_CLASS
                disabled=page >= total_pages
                on:click=move |_| set_page.update(|current| *current += 1)
            >
                "Next"
            </button>
        </div>
    }
}
