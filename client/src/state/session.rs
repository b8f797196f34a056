//! Bearer-token session persisted in browser storage.
//!
//! DESIGN
//! ======
//! The token and username live in session-scoped storage so closing the tab
//! ends the session. The token is mirrored into local storage for embedded
//! views, and the remembered username survives logout for login autofill.
//! Storage access goes through `KeyValueStore` so the same logic runs against
//! `web_sys::Storage` in the browser and an in-memory map on the server and in
//! tests.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Session-scope key holding the bearer token.
pub const BEARER_TOKEN_KEY: &str = "bearerToken";
/// Session-scope alias for the bearer token written by older shells.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Session-scope key holding the logged-in username.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Session-scope flag set to `"true"` while logged in.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";
/// Local-scope key holding the username to prefill on the login form.
pub const REMEMBERED_USER_KEY: &str = "rememberedUser";

const DEFAULT_USERNAME: &str = "Admin";

/// Minimal string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store used during SSR and in tests.
///
/// Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Token + username persistence over a session store and a local store.
#[derive(Clone, Debug)]
pub struct Session<S, L> {
    session: S,
    local: L,
}

impl<S: KeyValueStore, L: KeyValueStore> Session<S, L> {
    pub fn new(session: S, local: L) -> Self {
        Self { session, local }
    }

    /// Persist a successful login.
    pub fn login(&self, token: &str, username: &str, remember: bool) {
        self.session.set(BEARER_TOKEN_KEY, token);
        self.session.set(AUTH_TOKEN_KEY, token);
        self.session.set(CURRENT_USER_KEY, username);
        self.session.set(IS_LOGGED_IN_KEY, "true");
        self.local.set(BEARER_TOKEN_KEY, token);
        if remember {
            self.local.set(REMEMBERED_USER_KEY, username);
        } else {
            self.local.remove(REMEMBERED_USER_KEY);
        }
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.session
            .get(BEARER_TOKEN_KEY)
            .or_else(|| self.session.get(AUTH_TOKEN_KEY))
            .or_else(|| self.local.get(BEARER_TOKEN_KEY))
            .filter(|token| !token.is_empty())
    }

    /// Display name of the logged-in user.
    pub fn username(&self) -> String {
        self.session
            .get(CURRENT_USER_KEY)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned())
    }

    pub fn remembered_user(&self) -> Option<String> {
        self.local.get(REMEMBERED_USER_KEY).filter(|name| !name.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Drop every credential. The remembered username is kept.
    pub fn clear(&self) {
        for key in [BEARER_TOKEN_KEY, AUTH_TOKEN_KEY, CURRENT_USER_KEY, IS_LOGGED_IN_KEY] {
            self.session.remove(key);
        }
        self.local.remove(BEARER_TOKEN_KEY);
    }

    /// Explicit sign-out from the console: clears the session and forgets the
    /// remembered username.
    pub fn logout(&self) {
        self.clear();
        self.local.remove(REMEMBERED_USER_KEY);
    }

    /// Reactive snapshot of the stored session.
    pub fn snapshot(&self) -> SessionState {
        SessionState { token: self.token(), username: self.username(), loaded: true }
    }
}

/// Session snapshot provided to components through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub username: String,
    /// False until browser storage has been read; SSR never sets it.
    pub loaded: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Storage has been read and holds no token.
    pub fn needs_login(&self) -> bool {
        self.loaded && self.token.is_none()
    }
}
