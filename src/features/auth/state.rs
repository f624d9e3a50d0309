//! Auth session state and context for the frontend. The provider checks the
//! stored session against the backend once on mount and exposes derived auth
//! signals for guards and routes. A persisted token is only trusted after
//! `/auth/me` accepts it; on any doubt the stored session is cleared.

use crate::{
    app_lib::{AppError, config::AppConfig, storage::LocalStorage},
    features::auth::{
        client,
        flow::{LoginOutcome, classify_login_error},
        session::{Session, clear_session, load_session, persist_session},
        types::LoginRequest,
    },
};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub session: RwSignal<Option<Session>>,
    /// True once the stored session has been checked, valid or not.
    pub is_ready: RwSignal<bool>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    /// Builds a context around the provided signals.
    fn new(session: RwSignal<Option<Session>>, is_ready: RwSignal<bool>) -> Self {
        let is_authenticated = Signal::derive(move || session.get().is_some());
        Self {
            session,
            is_ready,
            is_authenticated,
        }
    }

    /// Updates the in-memory session after a confirmed login.
    pub fn set_session(&self, session: Session) {
        self.session.set(Some(session));
    }

    /// Drops the session from memory and storage. Logout is local; the token
    /// simply stops being sent.
    pub fn sign_out(&self) {
        clear_session(&LocalStorage);
        self.session.set(None);
    }
}

/// Checks the persisted session once at startup. Missing or partial keys are
/// cleared; a present token is validated against `/auth/me` before the app
/// renders anything authenticated. Demo mode trusts the stored session as is.
pub async fn bootstrap(auth: AuthContext) {
    let store = LocalStorage;
    let config = AppConfig::load();

    match load_session(&store) {
        None => {
            clear_session(&store);
        }
        Some(session) if config.demo_mode => {
            auth.set_session(session);
        }
        Some(session) => match client::me_with_token(&session.token).await {
            Ok(user) => {
                let refreshed = Session::from_user(session.token, &user);
                persist_session(&store, &refreshed);
                auth.set_session(refreshed);
            }
            Err(err) => {
                log::warn!("Stored session rejected by the backend: {err}");
                clear_session(&store);
            }
        },
    }

    auth.is_ready.set(true);
}

/// Runs one sign-in attempt end to end: token grant, account lookup, then
/// persistence. Nothing is written to storage unless both calls succeed, so a
/// rejected attempt leaves stored state byte for byte unchanged.
pub async fn perform_login(auth: AuthContext, request: LoginRequest) -> LoginOutcome {
    let store = LocalStorage;
    let config = AppConfig::load();

    if config.demo_mode {
        let session = Session::demo();
        persist_session(&store, &session);
        auth.set_session(session);
        return LoginOutcome::Success {
            enrollment_required: false,
            remaining_skips: 0,
        };
    }

    let grant = match client::login(&request).await {
        Ok(grant) => grant,
        Err(err) => return classify_login_error(&err),
    };

    match client::me_with_token(&grant.access_token).await {
        Ok(user) => {
            let session = Session::from_user(grant.access_token, &user);
            persist_session(&store, &session);
            auth.set_session(session);
            LoginOutcome::Success {
                enrollment_required: grant.mfa_enrollment_required,
                remaining_skips: grant.mfa_remaining_skips,
            }
        }
        Err(err) => {
            log::warn!("Account lookup failed after token grant: {err}");
            LoginOutcome::Rejected(err.to_string())
        }
    }
}

/// Revalidates the session against `/auth/me`, picking up server-side changes
/// such as a completed forced password change. No-op in demo mode.
pub async fn refresh_me(auth: AuthContext) -> Result<(), AppError> {
    let config = AppConfig::load();
    let Some(current) = auth.session.get_untracked() else {
        return Ok(());
    };
    if config.demo_mode {
        return Ok(());
    }

    let user = client::me_with_token(&current.token).await?;
    let refreshed = Session::from_user(current.token, &user);
    persist_session(&LocalStorage, &refreshed);
    auth.set_session(refreshed);
    Ok(())
}

/// Provides auth context and checks the stored session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(None);
    let is_ready = RwSignal::new(false);
    let auth = AuthContext::new(session, is_ready);
    provide_context(auth);

    spawn_local(async move {
        bootstrap(auth).await;
    });

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        let session = RwSignal::new(None);
        let is_ready = RwSignal::new(false);
        AuthContext::new(session, is_ready)
    })
}
