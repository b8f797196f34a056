//! Authenticated fetch wrapper.
//!
//! Every backend call goes through [`send`], which attaches the bearer token
//! from the session store and turns a 401 into a forced logout. Other non-OK
//! statuses come back untouched so callers can read the backend's error text.
//!
//! ERROR HANDLING
//! ==============
//! No retries, no timeouts, no cancellation. Each call is independent and a
//! failure is terminal for the user action that triggered it.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::session::{KeyValueStore, Session};

/// Route of the login view.
pub const LOGIN_PATH: &str = "/login";

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    AuthRequired,
    #[error("request failed: {0}")]
    Network(String),
    #[error("{message} ({status})")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Text for a toast or inline error: the backend message for status
    /// errors, the display form otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// HTTP verbs used by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// An outbound request before authentication headers are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), body: None }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self { method: Method::Delete, url: url.into(), body: None }
    }

    /// Build a request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` if `body` cannot be serialized.
    pub fn json<T: Serialize>(method: Method, url: impl Into<String>, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self { method, url: url.into(), body: Some(body) })
    }

    /// Headers sent with this request for the given token.
    pub fn headers(&self, token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Content-Type", "application/json".to_owned())];
        if let Some(value) = authorization_header(token) {
            headers.push(("Authorization", value));
        }
        headers
    }
}

/// A completed response with its body already read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Convert a non-OK response into `ApiError::Status` with a readable message.
    ///
    /// # Errors
    ///
    /// Returns the status error when the response is not OK.
    pub fn require_ok(self, default_message: &str) -> Result<Self, ApiError> {
        if self.ok() {
            return Ok(self);
        }
        Err(ApiError::Status { status: self.status, message: error_message(&self, default_message) })
    }
}

/// `Bearer <token>` for a non-empty token.
pub fn authorization_header(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(|t| format!("Bearer {t}"))
}

/// Backend error text for 400/401 responses, otherwise `default_message`.
pub fn error_message(response: &ApiResponse, default_message: &str) -> String {
    if matches!(response.status, STATUS_BAD_REQUEST | STATUS_UNAUTHORIZED) {
        let text = response.body.trim();
        if !text.is_empty() {
            return text.to_owned();
        }
    }
    default_message.to_owned()
}

/// Apply the 401 policy to a completed response.
///
/// A 401 clears the stored credentials, sends the user to the login view via
/// `redirect`, and yields `ApiError::AuthRequired`. Any other status passes
/// through.
///
/// # Errors
///
/// Returns `ApiError::AuthRequired` for a 401 response.
pub fn check_auth<S, L, F>(response: ApiResponse, session: &Session<S, L>, redirect: F) -> Result<ApiResponse, ApiError>
where
    S: KeyValueStore,
    L: KeyValueStore,
    F: FnOnce(&str),
{
    if response.status == STATUS_UNAUTHORIZED {
        log::warn!("401 from backend, clearing session");
        session.clear();
        redirect(LOGIN_PATH);
        return Err(ApiError::AuthRequired);
    }
    Ok(response)
}

/// Send `request` with the browser session's token.
///
/// # Errors
///
/// Returns `ApiError::AuthRequired` on 401 (after logging the user out),
/// `ApiError::Network` when the request cannot be sent, and
/// `ApiError::Unavailable` outside the browser.
pub async fn send(request: ApiRequest) -> Result<ApiResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let session = crate::util::storage::browser_session();
        let response = send_raw(&request, session.token().as_deref()).await?;
        check_auth(response, &session, redirect_to)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Send `request` without the session token or the 401 policy.
///
/// Used by the login and registration screens, which run before a session
/// exists.
///
/// # Errors
///
/// Returns `ApiError::Network` when the request cannot be sent and
/// `ApiError::Unavailable` outside the browser.
pub async fn send_anonymous(request: ApiRequest) -> Result<ApiResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        send_raw(&request, None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Send a request and decode a JSON body, mapping non-OK statuses to errors.
///
/// # Errors
///
/// Propagates [`send`] errors, `ApiError::Status` for non-OK responses, and
/// `ApiError::Decode` for malformed bodies.
pub async fn send_json<T: DeserializeOwned>(request: ApiRequest, default_message: &str) -> Result<T, ApiError> {
    send(request).await?.require_ok(default_message)?.json()
}

/// Pair a status with its body text. An unreadable body is a transport
/// failure, except on 401 where the sign-out policy must still run.
///
/// # Errors
///
/// Returns `ApiError::Network` when the body could not be read.
pub fn read_response<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> Result<ApiResponse, ApiError> {
    match body {
        Ok(body) => Ok(ApiResponse { status, body }),
        Err(_) if status == STATUS_UNAUTHORIZED => Ok(ApiResponse { status, body: String::new() }),
        Err(e) => {
            log::error!("failed to read response body ({status}): {e}");
            Err(ApiError::Network(format!("failed to read response body: {e}")))
        }
    }
}

/// Navigate the whole window to `path`.
pub fn redirect_to(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}

#[cfg(feature = "hydrate")]
async fn send_raw(request: &ApiRequest, token: Option<&str>) -> Result<ApiResponse, ApiError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};

    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&request.url).method(method);
    for (name, value) in request.headers(token) {
        builder = builder.header(name, &value);
    }
    let built = match &request.body {
        Some(body) => builder.body(body.clone()),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = built.send().await.map_err(|e| {
        log::error!("API request failed: {e}");
        ApiError::Network(e.to_string())
    })?;
    let status = resp.status();
    read_response(status, resp.text().await)
}
