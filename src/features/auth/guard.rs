//! Route guard decisions. The guard stays inert until the stored session has
//! been checked against the backend, so a slow bootstrap never bounces a
//! valid user through the login screen.

use crate::features::auth::session::Session;

/// Where a forced password change is completed.
pub const PROFILE_PATH: &str = "/profile";
/// Login screen target for unauthenticated visitors.
pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still running; render a placeholder, never redirect.
    Pending,
    Allow,
    RedirectLogin,
    /// Account must set a new password before using anything else.
    RedirectForcedPasswordChange,
}

/// Decides what a guarded route should do for the current auth state.
pub fn guard_decision(
    bootstrapped: bool,
    session: Option<&Session>,
    pathname: &str,
) -> GuardDecision {
    if !bootstrapped {
        return GuardDecision::Pending;
    }
    let Some(session) = session else {
        return GuardDecision::RedirectLogin;
    };
    if session.must_change_password && !pathname.starts_with(PROFILE_PATH) {
        return GuardDecision::RedirectForcedPasswordChange;
    }
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(must_change_password: bool) -> Session {
        Session {
            token: "jwt".to_string(),
            role: "complaints_handler".to_string(),
            name: "Case Handler".to_string(),
            user_id: "u-1".to_string(),
            must_change_password,
        }
    }

    #[test]
    fn guard_waits_for_bootstrap() {
        assert_eq!(guard_decision(false, None, "/"), GuardDecision::Pending);
        assert_eq!(
            guard_decision(false, Some(&session(false)), "/complaints"),
            GuardDecision::Pending
        );
    }

    #[test]
    fn unauthenticated_visitors_go_to_login() {
        assert_eq!(guard_decision(true, None, "/"), GuardDecision::RedirectLogin);
        assert_eq!(
            guard_decision(true, None, "/complaints/abc"),
            GuardDecision::RedirectLogin
        );
    }

    #[test]
    fn forced_password_change_redirects_everywhere_but_profile() {
        let forced = session(true);
        assert_eq!(
            guard_decision(true, Some(&forced), "/"),
            GuardDecision::RedirectForcedPasswordChange
        );
        assert_eq!(
            guard_decision(true, Some(&forced), "/complaints"),
            GuardDecision::RedirectForcedPasswordChange
        );
        assert_eq!(
            guard_decision(true, Some(&forced), "/profile"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn authenticated_users_pass() {
        assert_eq!(
            guard_decision(true, Some(&session(false)), "/admin"),
            GuardDecision::Allow
        );
    }
}
