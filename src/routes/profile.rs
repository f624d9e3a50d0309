//! Profile route. Password changes and authenticator enrollment act on the
//! signed-in account only; admin resets land people here with the forced
//! banner until a new password sticks.

use crate::app_lib::{AppError, config::AppConfig};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{
    Guarded, client, qr,
    state::{self, use_auth},
    types::ChangePasswordRequest,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
const CARD_CLASS: &str =
    "rounded-lg border border-gray-200 bg-white p-6 dark:border-gray-700 dark:bg-gray-800";
const LINK_BUTTON_CLASS: &str =
    "text-sm font-medium text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300";
const CHIP_GREEN: &str = "inline-flex items-center rounded-full bg-emerald-100 px-2.5 py-0.5 text-xs font-medium text-emerald-800 dark:bg-emerald-900/40 dark:text-emerald-200";

const MIN_PASSWORD_LENGTH: usize = 8;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <ProfileContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn ProfileContent() -> impl IntoView {
    let auth = use_auth();
    let config = AppConfig::load();
    let query = use_query_map();
    let forced = Signal::derive(move || {
        query.get().get("forced").is_some()
            || auth
                .session
                .get()
                .is_some_and(|current| current.must_change_password)
    });
    let identity = Signal::derive(move || {
        auth.session
            .get()
            .map(|current| {
                let role = current
                    .role_parsed()
                    .map(|role| role.label().to_string())
                    .unwrap_or_else(|| current.role.clone());
                format!("Signed in as {} • {role}", current.name)
            })
            .unwrap_or_default()
    });

    view! {
        <div class="mx-auto max-w-2xl space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Profile"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">{move || identity.get()}</p>
            </div>
            {move || {
                forced
                    .get()
                    .then(|| {
                        view! {
                            <Alert
                                kind=AlertKind::Warning
                                message="Your password has been reset by an admin. You must set a new password before continuing."
                                    .to_string()
                            />
                        }
                    })
            }}
            {if config.demo_mode {
                view! {
                    <Alert
                        kind=AlertKind::Info
                        message="Demo session. Password and MFA changes need a real backend.".to_string()
                    />
                }
                    .into_any()
            } else {
                view! {
                    <div class="space-y-6">
                        <ChangePasswordCard />
                        <MfaCard />
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn ChangePasswordCard() -> impl IntoView {
    let auth = use_auth();
    let (current, set_current) = signal(String::new());
    let (fresh, set_fresh) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (success, set_success) = signal(None::<String>);

    let valid = Signal::derive(move || {
        let fresh_value = fresh.get();
        fresh_value.len() >= MIN_PASSWORD_LENGTH
            && fresh_value == confirm.get()
            && !current.get().is_empty()
    });

    let change = Action::new_local(|request: &ChangePasswordRequest| {
        let request = request.clone();
        async move { client::change_password(&request).await }
    });
    let pending = change.pending();
    Effect::new(move |_| {
        if let Some(result) = change.value().get() {
            match result {
                Ok(()) => {
                    set_current.set(String::new());
                    set_fresh.set(String::new());
                    set_confirm.set(String::new());
                    set_error.set(None);
                    set_success.set(Some("Password updated.".to_string()));
                    // Revalidating clears a forced-change flag server side.
                    spawn_local(async move {
                        if let Err(refresh_error) = state::refresh_me(auth).await {
                            log::warn!("Session refresh after password change failed: {refresh_error}");
                        }
                    });
                }
                Err(change_error) => {
                    set_success.set(None);
                    set_error.set(Some(change_error.to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !valid.get_untracked() {
            set_error.set(Some(
                "Enter your current password and a matching new password of at least 8 characters."
                    .to_string(),
            ));
            return;
        }
        set_error.set(None);
        change.dispatch(ChangePasswordRequest {
            current_password: current.get_untracked(),
            new_password: fresh.get_untracked(),
        });
    };

    view! {
        <section class=CARD_CLASS>
            <h2 class="mb-4 text-lg font-semibold text-gray-900 dark:text-white">
                "Change password"
            </h2>
            <form class="space-y-4" on:submit=on_submit>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || {
                    success
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
                }}
                <div>
                    <label class=LABEL_CLASS>"Current password"</label>
                    <input
                        type="password"
                        class=FIELD_CLASS
                        autocomplete="current-password"
                        prop:value=move || current.get()
                        on:input=move |ev| set_current.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"New password (min 8 chars)"</label>
                    <input
                        type="password"
                        class=FIELD_CLASS
                        autocomplete="new-password"
                        prop:value=move || fresh.get()
                        on:input=move |ev| set_fresh.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Confirm new password"</label>
                    <input
                        type="password"
                        class=FIELD_CLASS
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    />
                </div>
                <Button
                    button_type="submit"
                    disabled=Signal::derive(move || pending.get() || !valid.get())
                >
                    {move || if pending.get() { "Updating..." } else { "Update password" }}
                </Button>
            </form>
        </section>
    }
}

#[derive(Clone, PartialEq, Eq)]
enum MfaPanel {
    Summary,
    Setup { secret: String, otpauth_url: String },
    Codes(Vec<String>),
}

/// Authenticator enrollment for the signed-in account. Disabling or resetting
/// an enrollment is an admin action, so the card only ever adds protection.
#[component]
fn MfaCard() -> impl IntoView {
    let (refresh, set_refresh) = signal(0u32);
    let (panel, set_panel) = signal(MfaPanel::Summary);
    let (code, set_code) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let account = LocalResource::new(move || {
        refresh.track();
        async move { client::me().await }
    });

    let enroll = Action::new_local(|_: &()| async move { client::mfa_enroll().await });
    Effect::new(move |_| {
        if let Some(result) = enroll.value().get() {
            match result {
                Ok(response) => {
                    set_error.set(None);
                    set_panel.set(MfaPanel::Setup {
                        secret: response.secret,
                        otpauth_url: response.otpauth_url,
                    });
                }
                Err(enroll_error) => set_error.set(Some(enroll_error.to_string())),
            }
        }
    });

    let verify = Action::new_local(|entered: &String| {
        let entered = entered.clone();
        async move { client::mfa_verify(&entered).await }
    });
    Effect::new(move |_| {
        if let Some(result) = verify.value().get() {
            match result {
                Ok(response) => {
                    set_error.set(None);
                    set_code.set(String::new());
                    set_panel.set(MfaPanel::Codes(response.recovery_codes));
                    set_refresh.update(|count| *count += 1);
                }
                Err(verify_error) => set_error.set(Some(verify_error.to_string())),
            }
        }
    });

    let on_verify = move |ev: SubmitEvent| {
        ev.prevent_default();
        let entered = code.get_untracked().trim().to_string();
        if entered.len() < 6 {
            set_error.set(Some("Enter the 6-digit code from your app.".to_string()));
            return;
        }
        verify.dispatch(entered);
    };

    view! {
        <section class=CARD_CLASS>
            <h2 class="mb-4 text-lg font-semibold text-gray-900 dark:text-white">
                "Multi-factor authentication"
            </h2>
            {move || {
                error.get().map(|message| view! {
                    <div class="mb-4">
                        <Alert kind=AlertKind::Error message=message />
                    </div>
                })
            }}
            {move || match panel.get() {
                MfaPanel::Summary => {
                    match account.get() {
                        None => view! { <Spinner label="Loading MFA status" /> }.into_any(),
                        Some(Err(load_error)) => view! {
                            <Alert kind=AlertKind::Error message=load_error.to_string() />
                        }
                            .into_any(),
                        Some(Ok(user)) if user.mfa_enabled => view! {
                            <div class="space-y-3">
                                <span class=CHIP_GREEN>"Enabled"</span>
                                <p class="text-sm text-gray-600 dark:text-gray-300">
                                    "An authenticator app is enrolled for this account. Ask an admin to reset it if you lose the device."
                                </p>
                            </div>
                        }
                            .into_any(),
                        Some(Ok(user)) => view! {
                            <div class="space-y-3">
                                <p class="text-sm text-gray-600 dark:text-gray-300">
                                    "Not enrolled. Codes from an authenticator app add a second check at sign-in."
                                </p>
                                {(user.mfa_skip_count > 0)
                                    .then(|| {
                                        view! {
                                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                                {format!(
                                                    "{} of 3 sign-in skips used.",
                                                    user.mfa_skip_count,
                                                )}
                                            </p>
                                        }
                                    })}
                                <Button
                                    disabled=enroll.pending()
                                    on_click=move |_| {
                                        enroll.dispatch(());
                                    }
                                >
                                    {move || {
                                        if enroll.pending().get() {
                                            "Starting..."
                                        } else {
                                            "Set up authenticator"
                                        }
                                    }}
                                </Button>
                            </div>
                        }
                            .into_any(),
                    }
                }
                MfaPanel::Setup { secret, otpauth_url } => {
                    let qr_src = qr::qr_data_url(&otpauth_url);
                    view! {
                        <form class="space-y-4" on:submit=on_verify>
                            {match qr_src {
                                Some(src) => view! {
                                    <img
                                        src=src
                                        class="mx-auto h-44 w-44 rounded-lg bg-white p-2"
                                        alt="Authenticator enrollment QR code"
                                    />
                                }
                                    .into_any(),
                                None => view! {
                                    <code class="block break-all text-xs text-gray-600 dark:text-gray-300">
                                        {otpauth_url.clone()}
                                    </code>
                                }
                                    .into_any(),
                            }}
                            <p class="text-sm text-gray-600 dark:text-gray-300">
                                "Secret (manual entry): "
                                <span class="font-mono">{secret.clone()}</span>
                            </p>
                            <div>
                                <label class=LABEL_CLASS for="profile_enroll_code">
                                    "6-digit code"
                                </label>
                                <input
                                    id="profile_enroll_code"
                                    type="text"
                                    class=FIELD_CLASS
                                    autocomplete="one-time-code"
                                    prop:value=move || code.get()
                                    on:input=move |ev| set_code.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="flex items-center gap-4">
                                <Button
                                    button_type="submit"
                                    disabled=Signal::derive(move || {
                                        code.get().trim().len() < 6 || verify.pending().get()
                                    })
                                >
                                    {move || {
                                        if verify.pending().get() {
                                            "Verifying..."
                                        } else {
                                            "Verify & enable"
                                        }
                                    }}
                                </Button>
                                <button
                                    type="button"
                                    class=LINK_BUTTON_CLASS
                                    on:click=move |_| {
                                        set_error.set(None);
                                        set_code.set(String::new());
                                        set_panel.set(MfaPanel::Summary);
                                    }
                                >
                                    "Cancel"
                                </button>
                            </div>
                        </form>
                    }
                        .into_any()
                }
                MfaPanel::Codes(codes) => view! {
                    <div class="space-y-4">
                        <Alert
                            kind=AlertKind::Info
                            message="Each code can be used once if you lose access to your authenticator. They are shown only now."
                                .to_string()
                        />
                        <div class="grid grid-cols-2 gap-2 rounded-lg border border-gray-200 bg-gray-50 p-4 font-mono text-sm dark:border-gray-700 dark:bg-gray-900">
                            {codes
                                .into_iter()
                                .map(|issued| view! { <span>{issued}</span> })
                                .collect_view()}
                        </div>
                        <Button on_click=move |_| set_panel.set(MfaPanel::Summary)>
                            "Done"
                        </Button>
                    </div>
                }
                    .into_any(),
            }}
        </section>
    }
}
