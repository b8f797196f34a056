use super::*;

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse { status, body: body.to_owned() }
}

#[test]
fn auth_failure_message_prefers_body_text() {
    assert_eq!(auth_failure_message(&response(401, "invalid user or password\n")), "invalid user or password");
}

#[test]
fn auth_failure_message_falls_back_to_status() {
    assert_eq!(auth_failure_message(&response(503, "")), "Authentication failed (503)");
}

#[test]
fn register_error_message_reads_json_string() {
    assert_eq!(register_error_message(r#""user exists""#), "user exists");
}

#[test]
fn register_error_message_prefers_error_over_message() {
    assert_eq!(register_error_message(r#"{"error":"bad captcha","message":"nope"}"#), "bad captcha");
    assert_eq!(register_error_message(r#"{"message":"weak password"}"#), "weak password");
}

#[test]
fn register_error_message_uses_plain_text_body() {
    assert_eq!(register_error_message("captcha mismatch"), "captcha mismatch");
}

#[test]
fn register_error_message_defaults() {
    assert_eq!(register_error_message(""), "Registration failed.");
    assert_eq!(register_error_message("{}"), "Registration failed.");
    assert_eq!(register_error_message(r#""""#), "Registration failed.");
    assert_eq!(register_error_message("42"), "Registration failed.");
}

#[test]
fn item_url_encodes_id() {
    assert_eq!(item_url("/probler/75/Creds", "lab creds"), "/probler/75/Creds/lab%20creds");
    assert_eq!(item_url("/probler/73/users", "admin"), "/probler/73/users/admin");
}

#[test]
fn element_types_puts_wildcard_first_and_sorts() {
    let names = vec!["NetworkDevice".to_owned(), "L8User".to_owned(), "*".to_owned(), "L8User".to_owned()];
    assert_eq!(element_types(names), vec!["*", "L8User", "NetworkDevice"]);
    assert_eq!(element_types(Vec::new()), vec!["*"]);
}

#[test]
fn save_method_depends_on_mode() {
    assert_eq!(save_method(true), Method::Post);
    assert_eq!(save_method(false), Method::Patch);
}
