//! Browser storage access behind a small key-value trait so session logic
//! can be exercised without a DOM.

/// Bearer token for API requests.
pub const KEY_TOKEN: &str = "token";
/// Role of the signed-in user.
pub const KEY_ROLE: &str = "role";
/// Display name of the signed-in user.
pub const KEY_NAME: &str = "name";
/// Backend id of the signed-in user.
pub const KEY_USER_ID: &str = "userId";

/// Every key the session layer persists. Clearing a session removes all of
/// them so no partial identity survives a failed login or logout.
pub const SESSION_KEYS: [&str; 4] = [KEY_TOKEN, KEY_ROLE, KEY_NAME, KEY_USER_ID];

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage` backed store used by the running app.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn raw(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.raw() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.raw() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    data: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.data.borrow_mut().remove(key);
    }
}
