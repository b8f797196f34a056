use std::cell::RefCell;

use super::*;
use crate::state::session::MemoryStore;

fn logged_in() -> Session<MemoryStore, MemoryStore> {
    let session = Session::new(MemoryStore::new(), MemoryStore::new());
    session.login("tok-1", "alice", true);
    session
}

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse { status, body: body.to_owned() }
}

// =============================================================
// 401 policy
// =============================================================

#[test]
fn unauthorized_clears_session_and_redirects_to_login() {
    let session = logged_in();
    let redirected = RefCell::new(None::<String>);

    let result = check_auth(response(401, ""), &session, |path| {
        *redirected.borrow_mut() = Some(path.to_owned());
    });

    assert_eq!(result, Err(ApiError::AuthRequired));
    assert_eq!(session.token(), None);
    assert_eq!(redirected.into_inner().as_deref(), Some(LOGIN_PATH));
}

#[test]
fn unauthorized_without_session_still_redirects() {
    let session = Session::new(MemoryStore::new(), MemoryStore::new());
    let mut redirects = 0;
    let result = check_auth(response(401, "expired"), &session, |_| redirects += 1);
    assert_eq!(result, Err(ApiError::AuthRequired));
    assert_eq!(redirects, 1);
}

#[test]
fn unauthorized_keeps_the_remembered_user() {
    let session = logged_in();
    let result = check_auth(response(401, ""), &session, |_| {});
    assert_eq!(result, Err(ApiError::AuthRequired));
    assert!(!session.is_logged_in());
    assert_eq!(session.remembered_user().as_deref(), Some("alice"));
}

#[test]
fn other_failures_pass_through_unmodified() {
    let session = logged_in();
    for status in [400, 403, 404, 500, 503] {
        let result = check_auth(response(status, "boom"), &session, |_| panic!("must not redirect"));
        assert_eq!(result, Ok(response(status, "boom")));
    }
    assert_eq!(session.token().as_deref(), Some("tok-1"));
}

#[test]
fn success_passes_through() {
    let session = logged_in();
    let result = check_auth(response(200, "{}"), &session, |_| panic!("must not redirect"));
    assert!(result.expect("ok response").ok());
}

// =============================================================
// headers
// =============================================================

#[test]
fn headers_include_bearer_when_token_present() {
    let request = ApiRequest::get("/probler/0/NCache");
    let headers = request.headers(Some("abc"));
    assert!(headers.contains(&("Authorization", "Bearer abc".to_owned())));
    assert!(headers.contains(&("Content-Type", "application/json".to_owned())));
}

#[test]
fn headers_skip_authorization_without_token() {
    let request = ApiRequest::get("/probler/0/NCache");
    assert!(request.headers(None).iter().all(|(name, _)| *name != "Authorization"));
    assert!(request.headers(Some("")).iter().all(|(name, _)| *name != "Authorization"));
}

#[test]
fn json_request_serializes_body() {
    let request = ApiRequest::json(Method::Post, "/auth", &serde_json::json!({ "user": "a" })).expect("encodes");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body.as_deref(), Some(r#"{"user":"a"}"#));
}

// =============================================================
// error messages
// =============================================================

#[test]
fn error_message_uses_body_for_bad_request_and_unauthorized() {
    assert_eq!(error_message(&response(400, "duplicate id\n"), "Failed"), "duplicate id");
    assert_eq!(error_message(&response(401, "token expired"), "Failed"), "token expired");
}

#[test]
fn error_message_falls_back_for_other_statuses_and_empty_bodies() {
    assert_eq!(error_message(&response(500, "stack trace"), "Failed to save"), "Failed to save");
    assert_eq!(error_message(&response(400, "   "), "Failed to save"), "Failed to save");
}

#[test]
fn require_ok_maps_status_error() {
    let err = response(400, "bad name").require_ok("Failed to save user").unwrap_err();
    assert_eq!(err, ApiError::Status { status: 400, message: "bad name".to_owned() });
    assert_eq!(err.to_string(), "bad name (400)");
}

#[test]
fn json_decode_error_is_typed() {
    let err = response(200, "<html>").json::<serde_json::Value>().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn user_message_strips_status_suffix() {
    let err = ApiError::Status { status: 400, message: "duplicate id".to_owned() };
    assert_eq!(err.user_message(), "duplicate id");
    assert_eq!(ApiError::AuthRequired.user_message(), "authentication required");
}

// =============================================================
// body reads
// =============================================================

#[test]
fn unreadable_body_is_a_network_error() {
    let result = read_response(200, Err::<String, _>("stream reset"));
    assert_eq!(result, Err(ApiError::Network("failed to read response body: stream reset".to_owned())));
}

#[test]
fn unreadable_body_on_unauthorized_still_reaches_the_auth_policy() {
    let result = read_response(401, Err::<String, _>("stream reset"));
    assert_eq!(result, Ok(response(401, "")));
}

#[test]
fn readable_body_is_kept() {
    assert_eq!(read_response(404, Ok::<_, String>("missing".to_owned())), Ok(response(404, "missing")));
}
