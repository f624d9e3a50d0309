//! User administration route. Account changes go straight to the API; the
//! table reloads after every successful action so the screen never shows a
//! stale role or MFA state. Temporary passwords and recovery codes are shown
//! exactly once and are never persisted client side.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Modal, Spinner};
use crate::features::auth::{Guarded, client as auth_client, state::use_auth};
use crate::features::users::{
    client,
    types::{UserCreate, UserOut, UserRole, UserUpdate},
};
use leptos::prelude::*;

const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
const CHECKBOX_CLASS: &str = "w-4 h-4 text-blue-600 bg-gray-100 border-gray-300 rounded focus:ring-blue-500 dark:focus:ring-blue-600 dark:ring-offset-gray-800 focus:ring-2 dark:bg-gray-700 dark:border-gray-600";
const CANCEL_BUTTON_CLASS: &str = "px-5 py-2.5 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 focus:ring-4 focus:ring-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700 dark:focus:ring-gray-700";
const ROW_ACTION_CLASS: &str = "px-3 py-1.5 text-xs font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700";
const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";
const CHIP_GREEN: &str = "inline-flex items-center rounded-full bg-emerald-100 px-2.5 py-0.5 text-xs font-medium text-emerald-800 dark:bg-emerald-900/40 dark:text-emerald-200";
const CHIP_GRAY: &str = "inline-flex items-center rounded-full bg-gray-100 px-2.5 py-0.5 text-xs font-medium text-gray-700 dark:bg-gray-700 dark:text-gray-300";

#[derive(Clone, PartialEq, Eq)]
enum AdminDialog {
    Create,
    TemporaryPassword { email: String, password: String },
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <AdminContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn AdminContent() -> impl IntoView {
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
                    "You need admin rights to manage users."
                </p>
            </div>
        }
        .into_any();
    }

    let (refresh, set_refresh) = signal(0u32);
    let (error, set_error) = signal(None::<String>);
    let (dialog, set_dialog) = signal(None::<AdminDialog>);
    let (revealed_codes, set_revealed_codes) = signal(None::<(String, Vec<String>)>);

    let users = LocalResource::new(move || {
        refresh.track();
        async move { client::list_users().await }
    });

    let update = Action::new_local(|input: &(String, UserUpdate)| {
        let (id, request) = input.clone();
        async move { client::update_user(&id, &request).await }
    });
    Effect::new(move |_| {
        if let Some(result) = update.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    set_refresh.update(|count| *count += 1);
                }
                Err(update_error) => set_error.set(Some(update_error.to_string())),
            }
        }
    });

    let reset_password = Action::new_local(|input: &(String, String)| {
        let (id, email) = input.clone();
        async move {
            let issued = client::reset_password(&id).await?;
            Ok::<_, AppError>((email, issued.temporary_password))
        }
    });
    Effect::new(move |_| {
        if let Some(result) = reset_password.value().get() {
            match result {
                Ok((email, password)) => {
                    set_error.set(None);
                    set_dialog.set(Some(AdminDialog::TemporaryPassword { email, password }));
                    set_refresh.update(|count| *count += 1);
                }
                Err(reset_error) => set_error.set(Some(reset_error.to_string())),
            }
        }
    });

    let reset_mfa = Action::new_local(|id: &String| {
        let id = id.clone();
        async move { auth_client::reset_user_mfa(&id).await }
    });
    Effect::new(move |_| {
        if let Some(result) = reset_mfa.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_refresh.update(|count| *count += 1);
                }
                Err(mfa_error) => set_error.set(Some(mfa_error.to_string())),
            }
        }
    });

    // Regeneration invalidates any codes issued before, so it only runs from
    // the explicit button, never from a row click.
    let codes = Action::new_local(|id: &String| {
        let id = id.clone();
        async move {
            let issued = auth_client::regenerate_recovery_codes(&id).await?;
            Ok::<_, AppError>((id, issued.recovery_codes))
        }
    });
    Effect::new(move |_| {
        if let Some(result) = codes.value().get() {
            match result {
                Ok(pair) => {
                    set_error.set(None);
                    set_revealed_codes.set(Some(pair));
                }
                Err(codes_error) => set_error.set(Some(codes_error.to_string())),
            }
        }
    });
    let toggle_codes = Callback::new(move |id: String| {
        let open = revealed_codes
            .get_untracked()
            .is_some_and(|(open_id, _)| open_id == id);
        if open {
            set_revealed_codes.set(None);
        } else {
            codes.dispatch(id);
        }
    });

    let saving = Signal::derive(move || {
        update.pending().get()
            || reset_password.pending().get()
            || reset_mfa.pending().get()
            || codes.pending().get()
    });

    let on_created = Callback::new(move |()| {
        set_dialog.set(None);
        set_error.set(None);
        set_refresh.update(|count| *count += 1);
    });
    let on_close = Callback::new(move |()| set_dialog.set(None));

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                        "User management"
                    </h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "Accounts, roles, and MFA state for everyone who can sign in."
                    </p>
                </div>
                <Button disabled=saving on_click=move |_| set_dialog.set(Some(AdminDialog::Create))>
                    "Create user"
                </Button>
            </div>
            {move || {
                error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
            }}
            <div class="overflow-hidden bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg">
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                        <thead class="bg-gray-50 dark:bg-gray-900/50">
                            <tr>
                                <th scope="col" class=TH_CLASS>"Email"</th>
                                <th scope="col" class=TH_CLASS>"Name"</th>
                                <th scope="col" class=TH_CLASS>"Role"</th>
                                <th scope="col" class=TH_CLASS>"MFA"</th>
                                <th scope="col" class=TH_CLASS>"Status"</th>
                                <th scope="col" class="px-6 py-3 text-right text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider">
                                    "Actions"
                                </th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                            {move || match users.get() {
                                None => view! {
                                    <tr>
                                        <td colspan="6" class="px-6 py-12 text-center">
                                            <Spinner label="Loading users" />
                                        </td>
                                    </tr>
                                }
                                    .into_any(),
                                Some(Err(load_error)) => view! {
                                    <tr>
                                        <td colspan="6" class="px-6 py-4">
                                            <Alert kind=AlertKind::Error message=load_error.to_string() />
                                        </td>
                                    </tr>
                                }
                                    .into_any(),
                                Some(Ok(list)) if list.is_empty() => view! {
                                    <tr>
                                        <td colspan="6" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                            "No users found."
                                        </td>
                                    </tr>
                                }
                                    .into_any(),
                                Some(Ok(list)) => list
                                    .into_iter()
                                    .map(|user| {
                                        view! {
                                            <UserRow
                                                user=user
                                                saving=saving
                                                update=update
                                                reset_password=reset_password
                                                reset_mfa=reset_mfa
                                                revealed_codes=revealed_codes
                                                toggle_codes=toggle_codes
                                            />
                                        }
                                    })
                                    .collect_view()
                                    .into_any(),
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
            {move || {
                dialog
                    .get()
                    .map(|open| match open {
                        AdminDialog::Create => {
                            view! { <CreateUserModal on_created=on_created on_close=on_close /> }
                                .into_any()
                        }
                        AdminDialog::TemporaryPassword { email, password } => {
                            view! {
                                <TemporaryPasswordModal
                                    email=email
                                    password=password
                                    on_close=on_close
                                />
                            }
                                .into_any()
                        }
                    })
            }}
        </div>
    }
    .into_any()
}

#[component]
fn UserRow(
    user: UserOut,
    saving: Signal<bool>,
    update: Action<(String, UserUpdate), Result<UserOut, AppError>>,
    reset_password: Action<(String, String), Result<(String, String), AppError>>,
    reset_mfa: Action<String, Result<(), AppError>>,
    revealed_codes: ReadSignal<Option<(String, Vec<String>)>>,
    toggle_codes: Callback<String>,
) -> impl IntoView {
    let role_id = user.id.clone();
    let active_id = user.id.clone();
    let password_id = user.id.clone();
    let password_email = user.email.clone();
    let mfa_id = user.id.clone();
    let codes_id = user.id.clone();
    let panel_id = user.id.clone();
    let is_active = user.is_active;

    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900 dark:text-white">
                {user.email.clone()}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400">
                {user.full_name.clone()}
            </td>
            <td class="px-6 py-4 whitespace-nowrap">
                <select
                    class=FIELD_CLASS
                    disabled=move || saving.get()
                    prop:value=user.role.as_str()
                    on:change=move |ev| {
                        if let Some(role) = UserRole::from_wire(&event_target_value(&ev)) {
                            update
                                .dispatch((
                                    role_id.clone(),
                                    UserUpdate {
                                        role: Some(role),
                                        ..UserUpdate::default()
                                    },
                                ));
                        }
                    }
                >
                    {UserRole::ALL
                        .into_iter()
                        .map(|role| {
                            view! { <option value=role.as_str()>{role.label()}</option> }
                        })
                        .collect_view()}
                </select>
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                <div class="space-y-1">
                    {if user.mfa_enabled {
                        view! { <span class=CHIP_GREEN>"Enabled"</span> }.into_any()
                    } else {
                        view! { <span class=CHIP_GRAY>"Not enrolled"</span> }.into_any()
                    }}
                    {(!user.mfa_enabled && user.mfa_skip_count > 0)
                        .then(|| {
                            view! {
                                <p class="text-xs text-gray-500 dark:text-gray-400">
                                    {format!("{} of 3 skips used", user.mfa_skip_count)}
                                </p>
                            }
                        })}
                </div>
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                {if user.is_active {
                    view! { <span class=CHIP_GREEN>"Active"</span> }.into_any()
                } else {
                    view! { <span class=CHIP_GRAY>"Disabled"</span> }.into_any()
                }}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-right">
                <div class="flex flex-wrap items-center justify-end gap-2">
                    <label class="flex items-center gap-1.5 text-xs text-gray-700 dark:text-gray-300">
                        <input
                            type="checkbox"
                            class=CHECKBOX_CLASS
                            prop:checked=is_active
                            disabled=move || saving.get()
                            on:change=move |ev| {
                                update
                                    .dispatch((
                                        active_id.clone(),
                                        UserUpdate {
                                            is_active: Some(event_target_checked(&ev)),
                                            ..UserUpdate::default()
                                        },
                                    ));
                            }
                        />
                        "Active"
                    </label>
                    <button
                        type="button"
                        class=ROW_ACTION_CLASS
                        disabled=move || saving.get()
                        on:click=move |_| {
                            reset_password.dispatch((password_id.clone(), password_email.clone()));
                        }
                    >
                        "Reset password"
                    </button>
                    <button
                        type="button"
                        class=ROW_ACTION_CLASS
                        disabled=move || saving.get()
                        on:click=move |_| {
                            reset_mfa.dispatch(mfa_id.clone());
                        }
                    >
                        "Reset MFA"
                    </button>
                    {user
                        .mfa_enabled
                        .then(|| {
                            view! {
                                <button
                                    type="button"
                                    class=ROW_ACTION_CLASS
                                    disabled=move || saving.get()
                                    on:click=move |_| {
                                        toggle_codes.run(codes_id.clone());
                                    }
                                >
                                    "Recovery codes"
                                </button>
                            }
                        })}
                </div>
            </td>
        </tr>
        {move || {
            revealed_codes
                .get()
                .filter(|(open_id, _)| *open_id == panel_id)
                .map(|(_, issued)| {
                    view! {
                        <tr class="bg-gray-50 dark:bg-gray-900/30">
                            <td colspan="6" class="px-6 py-4">
                                <div class="space-y-2">
                                    <p class="text-sm font-medium text-gray-900 dark:text-white">
                                        "Recovery codes"
                                    </p>
                                    <p class="text-xs text-gray-500 dark:text-gray-400">
                                        "These codes replace any previously issued codes and are shown once. Pass them to the user over a trusted channel."
                                    </p>
                                    <div class="flex flex-wrap gap-2">
                                        {issued
                                            .into_iter()
                                            .map(|code| {
                                                view! {
                                                    <span class="rounded border border-gray-300 bg-white px-2 py-1 font-mono text-xs text-gray-900 dark:border-gray-600 dark:bg-gray-800 dark:text-gray-200">
                                                        {code}
                                                    </span>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            </td>
                        </tr>
                    }
                })
        }}
    }
}

#[component]
fn CreateUserModal(on_created: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(UserRole::ComplaintsHandler);
    let (active, set_active) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(|request: &UserCreate| {
        let request = request.clone();
        async move { client::create_user(&request).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_created.run(()),
                Err(save_error) => set_error.set(Some(save_error.to_string())),
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get_untracked().trim().to_string();
        let name_value = full_name.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || name_value.is_empty() {
            set_error.set(Some("Email and full name are required.".to_string()));
            return;
        }
        if password_value.len() < 8 {
            set_error.set(Some(
                "The temporary password must be at least 8 characters.".to_string(),
            ));
            return;
        }
        set_error.set(None);
        save.dispatch(UserCreate {
            email: email_value,
            full_name: name_value,
            password: password_value,
            role: role.get_untracked(),
            is_active: active.get_untracked(),
        });
    };

    view! {
        <Modal title="Create user" on_close=on_close>
            <form class="p-6 space-y-4" on:submit=on_submit>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div>
                    <label class=LABEL_CLASS>"Email"</label>
                    <input
                        type="email"
                        class=FIELD_CLASS
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Full name"</label>
                    <input
                        type="text"
                        class=FIELD_CLASS
                        prop:value=move || full_name.get()
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Temporary password"</label>
                    <input
                        type="password"
                        class=FIELD_CLASS
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Role"</label>
                    <select
                        class=FIELD_CLASS
                        prop:value=move || role.get().as_str()
                        on:change=move |ev| {
                            if let Some(parsed) = UserRole::from_wire(&event_target_value(&ev)) {
                                set_role.set(parsed);
                            }
                        }
                    >
                        {UserRole::ALL
                            .into_iter()
                            .map(|option| {
                                view! { <option value=option.as_str()>{option.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
                <label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white">
                    <input
                        type="checkbox"
                        class=CHECKBOX_CLASS
                        prop:checked=move || active.get()
                        on:change=move |ev| set_active.set(event_target_checked(&ev))
                    />
                    "Active"
                </label>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        class=CANCEL_BUTTON_CLASS
                        on:click=move |_| on_close.run(())
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Creating..." } else { "Create user" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

/// Shows a freshly issued temporary password. The value exists only in this
/// dialog; closing it is the last time the admin can read it.
#[component]
fn TemporaryPasswordModal(
    email: String,
    password: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let copy_value = password.clone();
    let copy = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().clipboard().write_text(&copy_value);
        }
    };

    view! {
        <Modal title="Password reset" on_close=on_close>
            <div class="p-6 space-y-4">
                <Alert
                    kind=AlertKind::Warning
                    message="This user will be forced to change their password on next login. Copy the temporary password and email it to them."
                        .to_string()
                />
                <p class="text-sm text-gray-700 dark:text-gray-300">
                    "User: "
                    <span class="font-medium text-gray-900 dark:text-white">{email}</span>
                </p>
                <div>
                    <label class=LABEL_CLASS>"Temporary password"</label>
                    <input type="text" class=FIELD_CLASS readonly prop:value=password />
                </div>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button type="button" class=CANCEL_BUTTON_CLASS on:click=copy>
                        "Copy to clipboard"
                    </button>
                    <Button on_click=move |_| on_close.run(())>"Done"</Button>
                </div>
            </div>
        </Modal>
    }
}
