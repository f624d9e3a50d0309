//! Route guard component. Holds rendering until the stored session has been
//! checked, then either shows the page or sends the browser to the right
//! place. UX-only gating; real access control must live on the API.

use crate::features::auth::{
    guard::{self, GuardDecision},
    state::use_auth,
};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

/// Wraps a protected page. A neutral loading state covers the bootstrap
/// window; once the session check settles the page renders or the browser
/// is redirected.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let decision = Signal::derive(move || {
        let session = auth.session.get();
        guard::guard_decision(
            auth.is_ready.get(),
            session.as_ref(),
            &location.pathname.get(),
        )
    });

    let navigate = use_navigate();
    Effect::new(move |_| match decision.get() {
        GuardDecision::RedirectLogin => {
            navigate(guard::LOGIN_PATH, Default::default());
        }
        GuardDecision::RedirectForcedPasswordChange => {
            navigate(
                &format!("{}?forced=1", guard::PROFILE_PATH),
                Default::default(),
            );
        }
        GuardDecision::Pending | GuardDecision::Allow => {}
    });

    view! {
        {move || match decision.get() {
            GuardDecision::Allow => children().into_any(),
            _ => view! {
                <div class="flex justify-center items-center min-h-screen bg-white dark:bg-gray-900">
                    <div class="animate-pulse text-gray-400">"Loading..."</div>
                </div>
            }
            .into_any(),
        }}
    }
}
