use super::*;

fn session() -> (Session<MemoryStore, MemoryStore>, MemoryStore, MemoryStore) {
    let session_store = MemoryStore::new();
    let local_store = MemoryStore::new();
    (Session::new(session_store.clone(), local_store.clone()), session_store, local_store)
}

// =============================================================
// login
// =============================================================

#[test]
fn login_writes_every_session_key() {
    let (session, session_store, local_store) = session();
    session.login("tok-1", "alice", false);

    assert_eq!(session_store.get(BEARER_TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(session_store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(session_store.get(CURRENT_USER_KEY).as_deref(), Some("alice"));
    assert_eq!(session_store.get(IS_LOGGED_IN_KEY).as_deref(), Some("true"));
    assert_eq!(local_store.get(BEARER_TOKEN_KEY).as_deref(), Some("tok-1"));
}

#[test]
fn login_with_remember_keeps_username() {
    let (session, _, _) = session();
    session.login("tok-1", "alice", true);
    assert_eq!(session.remembered_user().as_deref(), Some("alice"));
}

#[test]
fn login_without_remember_forgets_previous_username() {
    let (session, _, _) = session();
    session.login("tok-1", "alice", true);
    session.login("tok-2", "bob", false);
    assert_eq!(session.remembered_user(), None);
}

// =============================================================
// token / username
// =============================================================

#[test]
fn token_missing_when_nothing_stored() {
    let (session, _, _) = session();
    assert_eq!(session.token(), None);
    assert!(!session.is_logged_in());
}

#[test]
fn token_falls_back_to_auth_token_then_local_mirror() {
    let (session, session_store, local_store) = session();
    local_store.set(BEARER_TOKEN_KEY, "local");
    assert_eq!(session.token().as_deref(), Some("local"));

    session_store.set(AUTH_TOKEN_KEY, "alias");
    assert_eq!(session.token().as_deref(), Some("alias"));

    session_store.set(BEARER_TOKEN_KEY, "primary");
    assert_eq!(session.token().as_deref(), Some("primary"));
}

#[test]
fn empty_token_counts_as_missing() {
    let (session, session_store, _) = session();
    session_store.set(BEARER_TOKEN_KEY, "");
    assert_eq!(session.token(), None);
}

#[test]
fn username_defaults_to_admin() {
    let (session, _, _) = session();
    assert_eq!(session.username(), "Admin");
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_removes_credentials_but_keeps_remembered_user() {
    let (session, session_store, local_store) = session();
    session.login("tok-1", "alice", true);
    session.clear();

    assert!(session_store.is_empty());
    assert_eq!(local_store.get(BEARER_TOKEN_KEY), None);
    assert_eq!(session.remembered_user().as_deref(), Some("alice"));
    assert!(!session.is_logged_in());
}

#[test]
fn snapshot_reflects_store() {
    let (session, _, _) = session();
    assert!(!session.snapshot().is_authenticated());
    session.login("tok-9", "carol", false);
    let snap = session.snapshot();
    assert_eq!(snap.token.as_deref(), Some("tok-9"));
    assert_eq!(snap.username, "carol");
    assert!(snap.is_authenticated());
}

#[test]
fn only_a_loaded_snapshot_asks_for_login() {
    assert!(!SessionState::default().needs_login());
    let (session, _, _) = session();
    assert!(session.snapshot().needs_login());
    session.login("tok", "dave", false);
    assert!(!session.snapshot().needs_login());
}

#[test]
fn logout_also_forgets_remembered_user() {
    let local = MemoryStore::new();
    let session = Session::new(MemoryStore::new(), local.clone());
    session.login("tok", "alice", true);
    session.logout();
    assert_eq!(session.token(), None);
    assert_eq!(session.remembered_user(), None);
    assert!(local.is_empty());
}
