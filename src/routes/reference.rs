//! Reference data route. Products, brokers, and insurers each get the same
//! section: a name list, single-entry add, and CSV import with a downloadable
//! starter template. Creation and import are admin operations.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{Guarded, state::use_auth};
use crate::features::complaints::types::format_date_time;
use crate::features::reference::{
    client,
    types::{CSV_TEMPLATE, ImportResult, ReferenceKind},
};
use leptos::html;
use leptos::prelude::*;

const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";

#[component]
pub fn ReferenceDataPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <ReferenceContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn ReferenceContent() -> impl IntoView {
    let auth = use_auth();
    if !auth
        .session
        .get_untracked()
        .is_some_and(|current| current.is_admin())
    {
        return view! {
            <div class="space-y-2">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Admin only"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "You need admin rights to manage reference data."
                </p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Reference data"
                </h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Manage products, brokers, and insurers. Add individually or import via CSV (column: name)."
                </p>
            </div>
            {ReferenceKind::ALL
                .into_iter()
                .map(|kind| view! { <ReferenceSection kind=kind /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// One reference list with its add and import controls. Sections are
/// independent; an import into one never reloads the others.
#[component]
fn ReferenceSection(kind: ReferenceKind) -> impl IntoView {
    let (refresh, set_refresh) = signal(0u32);
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let (file_name, set_file_name) = signal(None::<String>);
    let file_ref = NodeRef::<html::Input>::new();

    let items = LocalResource::new(move || {
        refresh.track();
        async move { client::list(kind).await }
    });

    let add = Action::new_local(move |entry: &String| {
        let entry = entry.clone();
        async move { client::create(kind, &entry).await }
    });
    let add_pending = add.pending();
    Effect::new(move |_| {
        if let Some(result) = add.value().get() {
            match result {
                Ok(_) => {
                    set_name.set(String::new());
                    set_error.set(None);
                    set_notice.set(None);
                    set_refresh.update(|count| *count += 1);
                }
                Err(add_error) => set_error.set(Some(add_error.to_string())),
            }
        }
    });

    // The CSV is read from the input at dispatch time; the handle never sits
    // in reactive state.
    let import = Action::new_local(move |_: &()| {
        let file = file_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        async move {
            let Some(file) = file else {
                return Err(AppError::Config("Choose a CSV file first.".to_string()));
            };
            client::import_csv(kind, &file).await
        }
    });
    let import_pending = import.pending();
    Effect::new(move |_| {
        if let Some(result) = import.value().get() {
            match result {
                Ok(ImportResult { added }) => {
                    if let Some(input) = file_ref.get_untracked() {
                        input.set_value("");
                    }
                    set_file_name.set(None);
                    set_error.set(None);
                    set_notice.set(Some(if added == 1 {
                        "Import added 1 entry.".to_string()
                    } else {
                        format!("Import added {added} entries.")
                    }));
                    set_refresh.update(|count| *count += 1);
                }
                Err(import_error) => set_error.set(Some(import_error.to_string())),
            }
        }
    });

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let entry = name.get_untracked();
        if entry.trim().is_empty() {
            return;
        }
        add.dispatch(entry);
    };

    let template_href = format!(
        "data:text/csv;charset=utf-8,{}",
        String::from(js_sys::encode_uri_component(CSV_TEMPLATE)),
    );

    view! {
        <section class="rounded-lg border border-gray-200 bg-white p-6 dark:border-gray-700 dark:bg-gray-800">
            <div class="mb-4 flex flex-wrap items-center justify-between gap-3">
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                    {kind.label()}
                </h2>
                <a
                    class="text-sm font-medium text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300"
                    href=template_href
                    download=kind.template_file_name()
                >
                    "Download CSV template"
                </a>
            </div>
            <form class="mb-4 flex flex-col gap-3 sm:flex-row" on:submit=on_add>
                <input
                    type="text"
                    class=FIELD_CLASS
                    placeholder=format!("Add {}", kind.singular().to_lowercase())
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <Button button_type="submit" disabled=add_pending>
                    {move || if add_pending.get() { "Adding..." } else { "Add" }}
                </Button>
            </form>
            <div class="mb-4 flex flex-col gap-3 sm:flex-row sm:items-center">
                <input
                    type="file"
                    accept=".csv,text/csv"
                    node_ref=file_ref
                    class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg cursor-pointer bg-gray-50 focus:outline-none dark:text-gray-400 dark:bg-gray-700 dark:border-gray-600"
                    on:change=move |_| {
                        let selected = file_ref
                            .get_untracked()
                            .and_then(|input| input.files())
                            .and_then(|list| list.get(0))
                            .map(|file| file.name());
                        set_file_name.set(selected);
                    }
                />
                <Button
                    disabled=Signal::derive(move || {
                        import_pending.get() || file_name.get().is_none()
                    })
                    on_click=move |_| {
                        import.dispatch(());
                    }
                >
                    {move || if import_pending.get() { "Importing..." } else { "Import CSV" }}
                </Button>
            </div>
            {move || {
                error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
            }}
            {move || {
                notice
                    .get()
                    .map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
            }}
            <div class="mt-4 overflow-hidden rounded-lg border border-gray-200 dark:border-gray-700">
                <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                    <thead class="bg-gray-50 dark:bg-gray-900/50">
                        <tr>
                            <th scope="col" class=TH_CLASS>"Name"</th>
                            <th scope="col" class=TH_CLASS>"Created"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                        {move || match items.get() {
                            None => view! {
                                <tr>
                                    <td colspan="2" class="px-6 py-8 text-center">
                                        <Spinner label="Loading reference data" />
                                    </td>
                                </tr>
                            }
                                .into_any(),
                            Some(Err(load_error)) => view! {
                                <tr>
                                    <td colspan="2" class="px-6 py-4">
                                        <Alert kind=AlertKind::Error message=load_error.to_string() />
                                    </td>
                                </tr>
                            }
                                .into_any(),
                            Some(Ok(list)) if list.is_empty() => view! {
                                <tr>
                                    <td colspan="2" class="px-6 py-8 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "No records."
                                    </td>
                                </tr>
                            }
                                .into_any(),
                            Some(Ok(list)) => list
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
                                            <td class="px-6 py-3 whitespace-nowrap text-sm font-medium text-gray-900 dark:text-white">
                                                {item.name}
                                            </td>
                                            <td class="px-6 py-3 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400">
                                                {format_date_time(&item.created_at)}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any(),
                        }}
                    </tbody>
                </table>
            </div>
        </section>
    }
}
