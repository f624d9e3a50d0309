//! Persisted session identity. A session is the unit of trust for the whole
//! app: either all four keys are present and the token has been confirmed by
//! the backend, or there is no session at all. Partial identities are never
//! handed to callers.

use crate::{
    app_lib::storage::{KEY_NAME, KEY_ROLE, KEY_TOKEN, KEY_USER_ID, KeyValueStore},
    features::users::types::{UserOut, UserRole},
};

/// In-memory session. The four identity fields mirror browser storage
/// byte for byte; `must_change_password` comes from `/auth/me` and is
/// never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub name: String,
    pub user_id: String,
    pub must_change_password: bool,
}

impl Session {
    /// Builds a session from a token grant and the confirmed account record.
    pub fn from_user(token: String, user: &UserOut) -> Self {
        Self {
            token,
            role: user.role.as_str().to_string(),
            name: user.full_name.clone(),
            user_id: user.id.clone(),
            must_change_password: user.must_change_password,
        }
    }

    /// Fixed persona used when the app runs in demo mode.
    pub fn demo() -> Self {
        Self {
            token: "demo".to_string(),
            role: "admin".to_string(),
            name: "Demo User".to_string(),
            user_id: "demo".to_string(),
            must_change_password: false,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.token == "demo"
    }

    pub fn role_parsed(&self) -> Option<UserRole> {
        UserRole::from_wire(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role_parsed(), Some(UserRole::Admin))
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.role_parsed(), Some(UserRole::ReadOnly))
    }
}

/// Reads a complete session from storage. Any missing key means no session;
/// callers decide whether to clear the leftovers.
pub fn load_session(store: &dyn KeyValueStore) -> Option<Session> {
    let token = store.get(KEY_TOKEN)?;
    let role = store.get(KEY_ROLE)?;
    let name = store.get(KEY_NAME)?;
    let user_id = store.get(KEY_USER_ID)?;

    Some(Session {
        token,
        role,
        name,
        user_id,
        must_change_password: false,
    })
}

/// Persists all four identity keys. Callers only do this after the backend
/// has confirmed the token.
pub fn persist_session(store: &dyn KeyValueStore, session: &Session) {
    store.set(KEY_TOKEN, &session.token);
    store.set(KEY_ROLE, &session.role);
    store.set(KEY_NAME, &session.name);
    store.set(KEY_USER_ID, &session.user_id);
}

/// Removes every session key, including strays left by an older build or an
/// interrupted write.
pub fn clear_session(store: &dyn KeyValueStore) {
    for key in crate::app_lib::storage::SESSION_KEYS {
        store.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::MemoryStore;

    #[test]
    fn load_requires_every_key() {
        let store = MemoryStore::default();
        assert_eq!(load_session(&store), None);

        store.set(KEY_TOKEN, "jwt");
        assert_eq!(load_session(&store), None);

        store.set(KEY_ROLE, "admin");
        store.set(KEY_NAME, "Ana Admin");
        assert_eq!(load_session(&store), None);

        store.set(KEY_USER_ID, "u-1");
        let session = load_session(&store).expect("complete session loads");
        assert_eq!(session.token, "jwt");
        assert_eq!(session.user_id, "u-1");
        assert!(!session.must_change_password);
    }

    #[test]
    fn persist_then_load_round_trips_exact_values() {
        let store = MemoryStore::default();
        let session = Session {
            token: "ey.J0exAi  OiJKV1Qi".to_string(),
            role: "complaints_manager".to_string(),
            name: "Zoë Müller".to_string(),
            user_id: "8c1f2f4e-31f0-4c2e-a9a6-0f0a3d2a7c11".to_string(),
            must_change_password: true,
        };

        persist_session(&store, &session);
        let loaded = load_session(&store).expect("session loads");

        assert_eq!(loaded.token, session.token);
        assert_eq!(loaded.role, session.role);
        assert_eq!(loaded.name, session.name);
        assert_eq!(loaded.user_id, session.user_id);
        // The flag is backend state, not storage state.
        assert!(!loaded.must_change_password);
    }

    #[test]
    fn clear_removes_all_session_keys() {
        let store = MemoryStore::default();
        store.set(KEY_TOKEN, "jwt");
        store.set(KEY_ROLE, "reviewer");
        store.set(KEY_NAME, "Rae Reviewer");
        store.set(KEY_USER_ID, "u-2");
        store.set("unrelated", "stays");

        clear_session(&store);

        assert_eq!(load_session(&store), None);
        assert_eq!(store.get(KEY_TOKEN), None);
        assert_eq!(store.get(KEY_ROLE), None);
        assert_eq!(store.get(KEY_NAME), None);
        assert_eq!(store.get(KEY_USER_ID), None);
        assert_eq!(store.get("unrelated"), Some("stays".to_string()));
    }

    #[test]
    fn clear_removes_strays_when_token_is_missing() {
        let store = MemoryStore::default();
        store.set(KEY_ROLE, "admin");
        store.set(KEY_NAME, "Left Over");

        assert_eq!(load_session(&store), None);
        clear_session(&store);

        assert_eq!(store.get(KEY_ROLE), None);
        assert_eq!(store.get(KEY_NAME), None);
    }

    #[test]
    fn role_helpers_parse_stored_role() {
        let mut session = Session::demo();
        assert!(session.is_admin());
        assert!(session.is_demo());
        assert!(!session.is_read_only());

        session.role = "read_only".to_string();
        assert!(!session.is_admin());
        assert!(session.is_read_only());

        session.role = "not-a-role".to_string();
        assert_eq!(session.role_parsed(), None);
        assert!(!session.is_admin());
    }
}
