//! Sign-in route. Renders whatever step the login flow machine is in:
//! credentials, MFA challenge, enrollment prompt, authenticator setup, or the
//! one-time recovery code display. Code inputs belong to the machine, so a
//! step change always clears them.

use crate::app_lib::GIT_COMMIT_HASH;
use crate::components::{Alert, AlertKind, Button, Spinner};
use crate::features::auth::{
    client,
    flow::{CHALLENGE_PROMPT, FlowStep, LoginFlow, surface_message},
    qr,
    state::{self, use_auth},
    types::LoginRequest,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
const LINK_BUTTON_CLASS: &str =
    "text-sm text-blue-700 hover:underline dark:text-blue-400 text-left";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (flow, set_flow) = signal(LoginFlow::initial());
    // Field edits inside a step must not remount the inputs.
    let step = Memo::new(move |_| flow.with(|state| state.step()));
    let demo_mode = crate::app_lib::config::AppConfig::load().demo_mode;
    let build_hash = if GIT_COMMIT_HASH.len() > 7 {
        &GIT_COMMIT_HASH[0..7]
    } else {
        GIT_COMMIT_HASH
    };

    let attempt_action = Action::new_local(move |request: &LoginRequest| {
        let request = request.clone();
        async move { state::perform_login(auth, request).await }
    });
    let enroll_action = Action::new_local(move |_: &()| async move { client::mfa_enroll().await });
    let skip_action = Action::new_local(move |_: &()| async move { client::mfa_skip().await });
    let verify_action = Action::new_local(move |code: &String| {
        let code = code.clone();
        async move { client::mfa_verify(&code).await }
    });

    Effect::new(move |_| {
        if let Some(outcome) = attempt_action.value().get() {
            set_flow.set(flow.get_untracked().resolve_attempt(outcome));
        }
    });

    Effect::new(move |_| {
        if let Some(result) = enroll_action.value().get() {
            match result {
                Ok(enrollment) => set_flow.set(flow.get_untracked().begin_enrollment(enrollment)),
                Err(err) => {
                    set_flow.set(flow.get_untracked().enrollment_failed(surface_message(&err)));
                }
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = skip_action.value().get() {
            match result {
                Ok(_) => set_flow.set(flow.get_untracked().finish()),
                Err(err) => {
                    set_flow.set(flow.get_untracked().enrollment_failed(surface_message(&err)));
                }
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(response) => {
                    set_flow.set(flow.get_untracked().verify_succeeded(response.recovery_codes));
                }
                Err(err) => set_flow.set(flow.get_untracked().verify_failed(&err)),
            }
        }
    });

    // Arriving here with a valid stored session skips the form entirely. Only
    // before the first attempt: mid-flow the session already exists while the
    // enrollment steps are still on screen.
    Effect::new(move |_| {
        if auth.is_ready.get()
            && auth.is_authenticated.get()
            && step.get() == FlowStep::Credentials
            && attempt_action.value().get().is_none()
        {
            set_flow.set(flow.get_untracked().finish());
        }
    });

    let navigate = use_navigate();
    Effect::new(move |_| {
        if step.get() == FlowStep::Authenticated {
            let target = match auth.session.get_untracked() {
                Some(session) if session.must_change_password => "/profile?forced=1",
                _ => "/",
            };
            navigate(target, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_flow.set(LoginFlow::Credentials {
                error: Some("Email and password are required.".to_string()),
            });
            return;
        }
        let request = flow
            .get_untracked()
            .attempt_request(&email_value, &password_value);
        attempt_action.dispatch(request);
    };

    let flow_error = move || {
        flow.with(|state| state.error()).map(|message| {
            view! {
                <div class="mt-4">
                    <Alert kind=AlertKind::Error message=message />
                </div>
            }
        })
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-white dark:bg-gray-900 px-4 py-8">
            <div class="w-full max-w-md">
                <div class="flex items-center justify-center space-x-3 mb-8">
                    <img src="/logo.svg" class="h-10" alt="Compass" />
                    <span class="text-2xl font-semibold text-gray-900 dark:text-white">
                        "Compass"
                    </span>
                </div>
                <div class="rounded-xl border border-gray-200 bg-white p-6 shadow-sm dark:border-gray-700 dark:bg-gray-800">
                    {move || match step.get() {
                        FlowStep::Credentials => view! {
                            <form on:submit=on_submit>
                                <h1 class="text-xl font-semibold text-gray-900 dark:text-white">
                                    {if demo_mode { "Sign in (demo mode available)" } else { "Sign in" }}
                                </h1>
                                <p class="mt-1 mb-5 text-sm text-gray-500 dark:text-gray-400">
                                    "Use your credentials to access the complaints workspace."
                                </p>
                                <div class="mb-5">
                                    <label class=LABEL_CLASS for="email">"Email"</label>
                                    <input
                                        id="email"
                                        type="email"
                                        class=INPUT_CLASS
                                        autocomplete="email"
                                        placeholder="name@example.com"
                                        required
                                        value=move || email.get()
                                        on:input=move |event| set_email.set(event_target_value(&event))
                                    />
                                </div>
                                <div class="mb-5">
                                    <label class=LABEL_CLASS for="password">"Password"</label>
                                    <input
                                        id="password"
                                        type="password"
                                        class=INPUT_CLASS
                                        autocomplete="current-password"
                                        required
                                        value=move || password.get()
                                        on:input=move |event| set_password.set(event_target_value(&event))
                                    />
                                </div>
                                <Button button_type="submit" disabled=attempt_action.pending()>
                                    "Login"
                                </Button>
                                {move || {
                                    attempt_action
                                        .pending()
                                        .get()
                                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                                }}
                                {flow_error}
                            </form>
                        }
                        .into_any(),
                        FlowStep::Challenge => view! {
                            <form on:submit=on_submit>
                                <h1 class="text-xl font-semibold text-gray-900 dark:text-white mb-4">
                                    "Two-factor check"
                                </h1>
                                <div class="mb-5">
                                    <Alert kind=AlertKind::Info message=CHALLENGE_PROMPT.to_string() />
                                </div>
                                <div class="mb-5">
                                    <label class=LABEL_CLASS for="challenge_code">
                                        {move || {
                                            if flow.with(|state| state.uses_recovery()) {
                                                "Recovery code"
                                            } else {
                                                "MFA code (6 digits)"
                                            }
                                        }}
                                    </label>
                                    <input
                                        id="challenge_code"
                                        type="text"
                                        class=INPUT_CLASS
                                        autocomplete="one-time-code"
                                        prop:value=move || flow.with(|state| state.active_code())
                                        on:input=move |event| {
                                            set_flow.update(|state| state.set_active_code(event_target_value(&event)));
                                        }
                                    />
                                </div>
                                <div class="flex flex-col gap-3">
                                    <Button
                                        button_type="submit"
                                        disabled=Signal::derive(move || {
                                            !flow.with(|state| state.can_submit_challenge())
                                                || attempt_action.pending().get()
                                        })
                                    >
                                        "Verify"
                                    </Button>
                                    <button
                                        type="button"
                                        class=LINK_BUTTON_CLASS
                                        on:click=move |_| set_flow.set(flow.get_untracked().toggle_code_kind())
                                    >
                                        {move || {
                                            if flow.with(|state| state.uses_recovery()) {
                                                "Use an authenticator code"
                                            } else {
                                                "Use a recovery code instead"
                                            }
                                        }}
                                    </button>
                                    <button
                                        type="button"
                                        class=LINK_BUTTON_CLASS
                                        on:click=move |_| set_flow.set(flow.get_untracked().back_to_credentials())
                                    >
                                        "Back to sign in"
                                    </button>
                                </div>
                                {move || {
                                    attempt_action
                                        .pending()
                                        .get()
                                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                                }}
                                {flow_error}
                            </form>
                        }
                        .into_any(),
                        FlowStep::EnrollmentPrompt => {
                            let remaining = flow.with_untracked(|state| state.remaining_skips());
                            view! {
                                <div class="space-y-4">
                                    <h1 class="text-xl font-semibold text-gray-900 dark:text-white">
                                        "Set up MFA"
                                    </h1>
                                    {if remaining > 0 {
                                        view! {
                                            <Alert
                                                kind=AlertKind::Warning
                                                message=format!(
                                                    "We recommend enabling MFA. You can skip up to {remaining} more time(s).",
                                                )
                                            />
                                        }
                                        .into_any()
                                    } else {
                                        view! {
                                            <Alert
                                                kind=AlertKind::Warning
                                                message="You must enable MFA to continue.".to_string()
                                            />
                                        }
                                        .into_any()
                                    }}
                                    <div class="flex flex-col sm:flex-row gap-3">
                                        <Button
                                            disabled=Signal::derive(move || {
                                                enroll_action.pending().get() || skip_action.pending().get()
                                            })
                                            on_click=Callback::new(move |_| {
                                                enroll_action.dispatch(());
                                            })
                                        >
                                            "Set up MFA"
                                        </Button>
                                        <Show when=move || flow.with(|state| state.can_skip())>
                                            <button
                                                type="button"
                                                class=LINK_BUTTON_CLASS
                                                on:click=move |_| {
                                                    skip_action.dispatch(());
                                                }
                                            >
                                                "Skip for now"
                                            </button>
                                        </Show>
                                    </div>
                                    {move || {
                                        (enroll_action.pending().get() || skip_action.pending().get())
                                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                                    }}
                                    {flow_error}
                                </div>
                            }
                            .into_any()
                        }
                        FlowStep::EnrollmentSetup => {
                            let (secret, otpauth_url) = flow.with_untracked(|state| match state {
                                LoginFlow::EnrollmentSetup { secret, otpauth_url, .. } => {
                                    (secret.clone(), otpauth_url.clone())
                                }
                                _ => (String::new(), String::new()),
                            });
                            let qr_src = qr::qr_data_url(&otpauth_url);
                            let on_verify = move |event: SubmitEvent| {
                                event.prevent_default();
                                let code = flow.with_untracked(|state| state.enrollment_code());
                                verify_action.dispatch(code.trim().to_string());
                            };
                            view! {
                                <form on:submit=on_verify class="space-y-4">
                                    <h1 class="text-xl font-semibold text-gray-900 dark:text-white">
                                        "Scan in your authenticator app"
                                    </h1>
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
                                        <label class=LABEL_CLASS for="enroll_code">"6-digit code"</label>
                                        <input
                                            id="enroll_code"
                                            type="text"
                                            class=INPUT_CLASS
                                            autocomplete="one-time-code"
                                            prop:value=move || flow.with(|state| state.enrollment_code())
                                            on:input=move |event| {
                                                set_flow.update(|state| {
                                                    state.set_enrollment_code(event_target_value(&event));
                                                });
                                            }
                                        />
                                    </div>
                                    <Button
                                        button_type="submit"
                                        disabled=Signal::derive(move || {
                                            !flow.with(|state| state.can_verify_enrollment())
                                                || verify_action.pending().get()
                                        })
                                    >
                                        "Verify & enable"
                                    </Button>
                                    {move || {
                                        verify_action
                                            .pending()
                                            .get()
                                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                                    }}
                                    {flow_error}
                                </form>
                            }
                            .into_any()
                        }
                        FlowStep::RecoveryCodes => {
                            let codes = flow.with_untracked(|state| match state {
                                LoginFlow::RecoveryCodes { codes } => codes.clone(),
                                _ => Vec::new(),
                            });
                            view! {
                                <div class="space-y-4">
                                    <h1 class="text-xl font-semibold text-gray-900 dark:text-white">
                                        "Recovery codes (store securely)"
                                    </h1>
                                    <Alert
                                        kind=AlertKind::Info
                                        message="Each code can be used once if you lose access to your authenticator. They are shown only now.".to_string()
                                    />
                                    <div class="grid grid-cols-2 gap-2 rounded-lg border border-gray-200 bg-gray-50 p-4 font-mono text-sm dark:border-gray-700 dark:bg-gray-900">
                                        {codes
                                            .into_iter()
                                            .map(|code| view! { <span>{code}</span> })
                                            .collect_view()}
                                    </div>
                                    <Button on_click=Callback::new(move |_| {
                                        set_flow.set(flow.get_untracked().finish());
                                    })>
                                        "Continue"
                                    </Button>
                                </div>
                            }
                            .into_any()
                        }
                        FlowStep::Authenticated => view! {
                            <div class="flex justify-center py-12">
                                <Spinner />
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
                <p class="mt-6 text-center text-xs text-gray-400 dark:text-gray-500">
                    {format!("Build {build_hash}")}
                </p>
            </div>
        </div>
    }
}
