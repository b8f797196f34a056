//! Login page: username/password, then TFA verification or first-time TFA
//! enrollment when the auth endpoint asks for it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth endpoint answers with a bearer token plus `needTfa`/`setupTfa`
//! flags. The token is only persisted once every required step passed; until
//! then it lives in [`PendingAuth`] and is sent back as the `bearer` field of
//! the TFA calls.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_stack::use_toasts;
use crate::net::fetch::ApiError;
use crate::net::types::{AuthResponse, TfaSetupResponse, TfaVerifyResponse};
use crate::state::config::ConsoleConfig;
use crate::state::session::SessionState;

pub const TFA_CODE_LEN: usize = 6;

const CREDENTIALS_REQUIRED: &str = "Please enter username and password";
const INVALID_CODE: &str = "Please enter a valid 6-digit code";
const UNREACHABLE: &str = "Unable to connect to server. Please try again.";
const VERIFY_FAILED: &str = "Verification failed. Please try again.";
const CODE_REJECTED: &str = "Invalid verification code";
const SETUP_CODE_REJECTED: &str = "Invalid verification code. Please try again.";
const SETUP_LOAD_FAILED: &str = "Failed to load TFA setup. Please try again.";

/// Which form the page is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginStep {
    Credentials,
    Tfa,
    TfaSetup(SetupState),
}

/// Progress of the TFA enrollment panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupState {
    Loading,
    Ready { qr: String, secret: String },
    Failed(String),
}

/// Credentials accepted by the auth endpoint but still waiting on TFA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAuth {
    pub username: String,
    pub bearer: String,
    pub remember: bool,
}

/// What to do after the auth endpoint accepted the credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Complete(String),
    NeedTfa(String),
    SetupTfa(String),
}

pub fn auth_outcome(response: AuthResponse) -> AuthOutcome {
    if response.setup_tfa {
        AuthOutcome::SetupTfa(response.token)
    } else if response.need_tfa {
        AuthOutcome::NeedTfa(response.token)
    } else {
        AuthOutcome::Complete(response.token)
    }
}

/// Trimmed username and raw password.
///
/// # Errors
///
/// Returns the inline error when either is empty.
pub fn validate_credentials(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(CREDENTIALS_REQUIRED);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// The trimmed TFA code.
///
/// # Errors
///
/// Returns the inline error unless the code is exactly six characters.
pub fn validate_tfa_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim();
    if code.chars().count() != TFA_CODE_LEN {
        return Err(INVALID_CODE);
    }
    Ok(code.to_owned())
}

/// Inline error for a failed auth call: the backend's text when it
/// rejected the login, a connectivity message otherwise.
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { message, .. } => message.clone(),
        _ => UNREACHABLE.to_owned(),
    }
}

/// Inline error for a TFA verification the backend turned down.
pub fn rejected_code_message(response: &TfaVerifyResponse, setup: bool) -> String {
    response
        .error
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| (if setup { SETUP_CODE_REJECTED } else { CODE_REJECTED }).to_owned())
}

pub fn setup_state(response: TfaSetupResponse) -> SetupState {
    if let Some(error) = response.error.filter(|e| !e.is_empty()) {
        return SetupState::Failed(error);
    }
    match (response.qr, response.secret) {
        (Some(qr), Some(secret)) if !qr.is_empty() => SetupState::Ready { qr: png_data_url(&qr), secret },
        _ => SetupState::Failed(SETUP_LOAD_FAILED.to_owned()),
    }
}

pub fn png_data_url(base64: &str) -> String {
    format!("data:image/png;base64,{base64}")
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(false);
    let code = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let step = RwSignal::new(LoginStep::Credentials);
    let pending = StoredValue::new(None::<PendingAuth>);

    let navigate_home = navigate.clone();
    Effect::new(move || {
        if session.with(SessionState::is_authenticated) {
            let target = config.with_untracked(|c| c.login.redirect_url.clone());
            navigate_home(&target, NavigateOptions::default());
        }
    });

    #[cfg(feature = "hydrate")]
    {
        if let Some(user) = crate::util::storage::browser_session().remembered_user() {
            username.set(user);
            remember.set(true);
        }
    }

    let back_to_login = move || {
        pending.set_value(None);
        step.set(LoginStep::Credentials);
        code.set(String::new());
        password.set(String::new());
        error.set(None);
    };

    let complete = StoredValue::new_local(move |token: String, user: String, remember_me: bool| {
        let browser = crate::util::storage::browser_session();
        browser.login(&token, &user, remember_me);
        session.set(browser.snapshot());
        toasts.success("Login successful!");
        let target = config.with_untracked(|c| c.login.redirect_url.clone());
        navigate(&target, NavigateOptions::default());
    });

    let start_setup = move |user_id: String| {
        step.set(LoginStep::TfaSetup(SetupState::Loading));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let state = match crate::net::api::tfa_setup(&user_id).await {
                Ok(response) => setup_state(response),
                Err(e) => {
                    log::error!("tfa setup failed: {e}");
                    SetupState::Failed(SETUP_LOAD_FAILED.to_owned())
                }
            };
            step.set(LoginStep::TfaSetup(state));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = user_id;
    };

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (user, pass) = match validate_credentials(&username.get_untracked(), &password.get_untracked()) {
            Ok(pair) => pair,
            Err(message) => return error.set(Some(message.to_owned())),
        };
        error.set(None);
        busy.set(true);
        let endpoint = config.with_untracked(|c| c.login.auth_endpoint.clone());
        let remember_me = remember.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::authenticate(&endpoint, &user, &pass).await {
                Ok(response) => match auth_outcome(response) {
                    AuthOutcome::Complete(token) => complete.with_value(|f| f(token, user, remember_me)),
                    AuthOutcome::NeedTfa(bearer) => {
                        pending.set_value(Some(PendingAuth { username: user, bearer, remember: remember_me }));
                        code.set(String::new());
                        step.set(LoginStep::Tfa);
                    }
                    AuthOutcome::SetupTfa(bearer) => {
                        pending.set_value(Some(PendingAuth { username: user.clone(), bearer, remember: remember_me }));
                        code.set(String::new());
                        start_setup(user);
                    }
                },
                Err(e) => {
                    log::error!("login failed: {e}");
                    error.set(Some(login_error_message(&e)));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (endpoint, remember_me, user, pass, start_setup);
    };

    let verify = move |setup: bool| {
        if busy.get_untracked() {
            return;
        }
        let Some(auth) = pending.get_value() else {
            return;
        };
        let code_value = match validate_tfa_code(&code.get_untracked()) {
            Ok(c) => c,
            Err(message) => return error.set(Some(message.to_owned())),
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = if setup {
                crate::net::api::tfa_setup_verify(&auth.username, &code_value, &auth.bearer).await
            } else {
                crate::net::api::tfa_verify(&auth.username, &code_value, &auth.bearer).await
            };
            match result {
                Ok(response) if response.ok && setup => {
                    toasts.success("Two-factor authentication enabled successfully!");
                    back_to_login();
                    toasts.warning("Please login again with your TFA code");
                }
                Ok(response) if response.ok => {
                    complete.with_value(|f| f(auth.bearer, auth.username, auth.remember));
                }
                Ok(response) => error.set(Some(rejected_code_message(&response, setup))),
                Err(e) => {
                    log::error!("tfa verification failed: {e}");
                    error.set(Some(VERIFY_FAILED.to_owned()));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, code_value, setup, back_to_login, complete);
    };

    let title = move || config.with(|c| c.login.app_title.clone());
    let description = move || config.with(|c| c.login.app_description.clone());
    let show_remember = move || config.with(|c| c.login.show_remember_me);
    let show_register = move || config.with(|c| c.login.show_register);

    let code_input = move || {
        view! {
            <input
                class="tfa-code-input"
                type="text"
                inputmode="numeric"
                maxlength="6"
                placeholder="000000"
                autocomplete="one-time-code"
                prop:value=move || code.get()
                on:input=move |ev| code.set(event_target_value(&ev))
            />
        }
    };

    let setup_panel = move |state: SetupState| match state {
        SetupState::Loading => view! { <div class="tfa-setup-loading">"Loading TFA setup..."</div> }.into_any(),
        SetupState::Failed(message) => view! {
            <div class="tfa-setup-error">
                <p>{message}</p>
                <a href="#" on:click=move |ev| { ev.prevent_default(); back_to_login(); }>"Back to login"</a>
            </div>
        }
        .into_any(),
        SetupState::Ready { qr, secret } => view! {
            <form class="tfa-setup-content" on:submit=move |ev| { ev.prevent_default(); verify(true); }>
                <p>"Scan this QR code with your authenticator app, then enter the 6-digit code."</p>
                <img class="tfa-qr-image" src=qr alt="TFA QR code"/>
                <p class="tfa-secret">"Secret: " <code>{secret}</code></p>
                {code_input()}
                <button class="login-btn" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Verifying..." } else { "Verify & Enable" }}
                </button>
                <a href="#" on:click=move |ev| { ev.prevent_default(); back_to_login(); }>"Back to login"</a>
            </form>
        }
        .into_any(),
    };

    let body = move || match step.get() {
        LoginStep::Credentials => view! {
            <form class="login-form" on:submit=on_login>
                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        id="username"
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>
                <Show when=show_remember>
                    <label class="remember-me">
                        <input
                            type="checkbox"
                            prop:checked=move || remember.get()
                            on:change=move |ev| remember.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                </Show>
                <button class="login-btn" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Authenticating..." } else { "Login" }}
                </button>
                <Show when=show_register>
                    <p class="register-link">"No account? " <a href="/register">"Register"</a></p>
                </Show>
            </form>
        }
        .into_any(),
        LoginStep::Tfa => view! {
            <form class="tfa-form" on:submit=move |ev| { ev.prevent_default(); verify(false); }>
                <p>"Enter the 6-digit code from your authenticator app."</p>
                {code_input()}
                <button class="login-btn" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Verifying..." } else { "Verify" }}
                </button>
                <a href="#" on:click=move |ev| { ev.prevent_default(); back_to_login(); }>"Back to login"</a>
            </form>
        }
        .into_any(),
        LoginStep::TfaSetup(state) => setup_panel(state),
    };

    view! {
        <div class="login-page">
            <div class="login-container" class:tfa-setup-active=move || matches!(step.get(), LoginStep::TfaSetup(_))>
                <h1 class="app-title">{title}</h1>
                <p class="app-description">{description}</p>
                <Show when=move || error.with(Option::is_some)>
                    <div class="error-message visible">{move || error.get().unwrap_or_default()}</div>
                </Show>
                {body}
            </div>
        </div>
    }
}
