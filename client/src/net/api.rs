//! REST API helpers for the login flow and the entity views.
//!
//! Client-side (hydrate): real HTTP calls through [`super::fetch`].
//! Server-side (SSR): every call resolves to `ApiError::Unavailable`, since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-OK statuses become
//! `ApiError::Status` carrying the message the UI should show, so views only
//! need `err.to_string()` or the message field for their toast.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::fetch::{ApiError, ApiRequest, ApiResponse, Method, send, send_anonymous, send_json};
use super::query::{ListResponse, QueryBody, query_url};
use super::types::{
    AuthRequest, AuthResponse, CaptchaResponse, RegisterRequest, TfaSetupRequest, TfaSetupResponse, TfaVerifyRequest,
    TfaVerifyResponse,
};

pub const TFA_VERIFY_PATH: &str = "/tfaVerify";
pub const TFA_SETUP_PATH: &str = "/tfaSetup";
pub const TFA_SETUP_VERIFY_PATH: &str = "/tfaSetupVerify";
pub const CAPTCHA_PATH: &str = "/captcha";
pub const REGISTER_PATH: &str = "/register";

const REGISTER_FAILED: &str = "Registration failed.";
/// Wildcard element type offered ahead of the registry's type names.
pub const ANY_ELEMENT_TYPE: &str = "*";

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Message shown when the auth endpoint rejects the credentials.
pub fn auth_failure_message(response: &ApiResponse) -> String {
    let text = response.body.trim();
    if text.is_empty() { format!("Authentication failed ({})", response.status) } else { text.to_owned() }
}

/// Message shown when registration fails.
///
/// A JSON string body wins, then an object's `error`, then its `message`.
/// Bodies that are not JSON are shown verbatim.
pub fn register_error_message(body: &str) -> String {
    let text = body.trim();
    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) if !text.is_empty() => return text.to_owned(),
        Err(_) => return REGISTER_FAILED.to_owned(),
    };
    match parsed {
        Value::String(s) if !s.is_empty() => s,
        Value::Object(map) => ["error", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map_or_else(|| REGISTER_FAILED.to_owned(), str::to_owned),
        _ => REGISTER_FAILED.to_owned(),
    }
}

/// `<endpoint>/<url-encoded id>`.
pub fn item_url(endpoint: &str, id: &str) -> String {
    format!("{endpoint}/{}", urlencoding::encode(id))
}

/// Element types for the rule editor: the wildcard followed by the sorted
/// registry names.
pub fn element_types(mut names: Vec<String>) -> Vec<String> {
    names.retain(|n| n != ANY_ELEMENT_TYPE);
    names.sort();
    names.dedup();
    names.insert(0, ANY_ELEMENT_TYPE.to_owned());
    names
}

/// `POST` for a new record, `PATCH` for an edit.
pub fn save_method(is_new: bool) -> Method {
    if is_new { Method::Post } else { Method::Patch }
}

// =============================================================================
// LOGIN / TFA / REGISTER
// =============================================================================

/// Post credentials to the configured auth endpoint.
///
/// # Errors
///
/// Returns `ApiError::Status` with the backend text (or
/// `Authentication failed (<status>)`) when the credentials are rejected.
pub async fn authenticate(endpoint: &str, user: &str, pass: &str) -> Result<AuthResponse, ApiError> {
    let body = AuthRequest { user: user.to_owned(), pass: pass.to_owned() };
    let response = send_anonymous(ApiRequest::json(Method::Post, endpoint, &body)?).await?;
    if !response.ok() {
        return Err(ApiError::Status { status: response.status, message: auth_failure_message(&response) });
    }
    response.json()
}

/// Verify a TOTP code for a user who already has TFA enabled.
///
/// # Errors
///
/// Returns transport and decode errors; a wrong code is `ok: false` in the
/// response, not an error.
pub async fn tfa_verify(user_id: &str, code: &str, bearer: &str) -> Result<TfaVerifyResponse, ApiError> {
    verify_code(TFA_VERIFY_PATH, user_id, code, bearer).await
}

/// Confirm the first code after scanning the provisioning QR.
///
/// # Errors
///
/// Same as [`tfa_verify`].
pub async fn tfa_setup_verify(user_id: &str, code: &str, bearer: &str) -> Result<TfaVerifyResponse, ApiError> {
    verify_code(TFA_SETUP_VERIFY_PATH, user_id, code, bearer).await
}

async fn verify_code(path: &str, user_id: &str, code: &str, bearer: &str) -> Result<TfaVerifyResponse, ApiError> {
    let body = TfaVerifyRequest { user_id: user_id.to_owned(), code: code.to_owned(), bearer: bearer.to_owned() };
    send_anonymous(ApiRequest::json(Method::Post, path, &body)?).await?.json()
}

/// Fetch the provisioning QR code and secret for a user enrolling in TFA.
///
/// # Errors
///
/// Returns `ApiError::Status` on a non-OK response and decode errors for a
/// malformed body.
pub async fn tfa_setup(user_id: &str) -> Result<TfaSetupResponse, ApiError> {
    let body = TfaSetupRequest { user_id: user_id.to_owned() };
    let response = send_anonymous(ApiRequest::json(Method::Post, TFA_SETUP_PATH, &body)?).await?;
    if !response.ok() {
        return Err(ApiError::Status { status: response.status, message: "Failed to fetch TFA setup data".to_owned() });
    }
    response.json()
}

/// Fetch a new captcha image (base64 PNG).
///
/// # Errors
///
/// Returns `ApiError::Status` on a non-OK response and `ApiError::Decode`
/// when the body carries no image.
pub async fn fetch_captcha() -> Result<String, ApiError> {
    let response = send_anonymous(ApiRequest { method: Method::Post, url: CAPTCHA_PATH.to_owned(), body: None }).await?;
    if !response.ok() {
        return Err(ApiError::Status { status: response.status, message: "Failed to load captcha".to_owned() });
    }
    response
        .json::<CaptchaResponse>()?
        .captcha
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Decode("captcha missing from response".to_owned()))
}

/// Register a new account. Only a 200 counts as success.
///
/// # Errors
///
/// Returns `ApiError::Status` with [`register_error_message`] text otherwise.
pub async fn register(user: &str, pass: &str, captcha: &str) -> Result<(), ApiError> {
    let body = RegisterRequest { user: user.to_owned(), pass: pass.to_owned(), captcha: captcha.to_owned() };
    let response = send_anonymous(ApiRequest::json(Method::Post, REGISTER_PATH, &body)?).await?;
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::Status { status: response.status, message: register_error_message(&response.body) })
}

// =============================================================================
// ENTITY CRUD
// =============================================================================

/// Run an L8 query against `endpoint` and decode the list envelope.
///
/// # Errors
///
/// Propagates [`send_json`] errors.
pub async fn fetch_list<T: DeserializeOwned>(
    endpoint: &str,
    text: &str,
    default_message: &str,
) -> Result<ListResponse<T>, ApiError> {
    send_json(ApiRequest::get(query_url(endpoint, text)), default_message).await
}

/// Fetch the registered element type names for the rule editor.
///
/// # Errors
///
/// Propagates [`send_json`] errors.
pub async fn fetch_element_types(endpoint: &str) -> Result<Vec<String>, ApiError> {
    let list: ListResponse<String> = send_json(ApiRequest::get(endpoint), "Failed to fetch registry types").await?;
    Ok(element_types(list.list))
}

/// Create (`POST`) or update (`PATCH`) a record at `endpoint`.
///
/// # Errors
///
/// Returns `ApiError::Status` with the backend message on failure.
pub async fn save<T: Serialize>(endpoint: &str, record: &T, is_new: bool, default_message: &str) -> Result<(), ApiError> {
    post_or_patch(ApiRequest::json(save_method(is_new), endpoint, record)?, default_message).await
}

/// `POST` an arbitrary JSON payload (bulk actions).
///
/// # Errors
///
/// Returns `ApiError::Status` with the backend message on failure.
pub async fn post<T: Serialize>(endpoint: &str, payload: &T, default_message: &str) -> Result<(), ApiError> {
    post_or_patch(ApiRequest::json(Method::Post, endpoint, payload)?, default_message).await
}

/// `DELETE <endpoint>/<id>`.
///
/// # Errors
///
/// Returns `ApiError::Status` with the backend message on failure.
pub async fn delete_by_id(endpoint: &str, id: &str, default_message: &str) -> Result<(), ApiError> {
    send(ApiRequest::delete(item_url(endpoint, id))).await?.require_ok(default_message)?;
    Ok(())
}

/// `DELETE <endpoint>` with an L8 query body selecting the records to drop.
///
/// # Errors
///
/// Returns `ApiError::Status` with the backend message on failure.
pub async fn delete_by_query(endpoint: &str, text: &str, default_message: &str) -> Result<(), ApiError> {
    let request = ApiRequest::json(Method::Delete, endpoint, &QueryBody::new(text))?;
    send(request).await?.require_ok(default_message)?;
    Ok(())
}

async fn post_or_patch(request: ApiRequest, default_message: &str) -> Result<(), ApiError> {
    send(request).await?.require_ok(default_message)?;
    Ok(())
}
