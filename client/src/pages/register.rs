//! Self-service registration guarded by a server captcha.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::net::fetch::LOGIN_PATH;
use crate::net::types::RegisterRequest;

const FIELDS_REQUIRED: &str = "Please fill in all fields.";
const CAPTCHA_FAILED: &str = "Failed to load captcha. Please refresh.";
const REGISTERED: &str = "Registration successful! Redirecting to login...";
/// Delay before leaving for the login page after a successful registration.
pub const REDIRECT_DELAY_MS: u32 = 1500;

/// Inline message under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Error(_) => "message error",
            Self::Success(_) => "message success",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Error(t) | Self::Success(t) => t,
        }
    }
}

/// Trimmed registration payload.
///
/// # Errors
///
/// Returns the inline error when any field is empty.
pub fn validate_registration(user: &str, pass: &str, captcha: &str) -> Result<RegisterRequest, &'static str> {
    let (user, captcha) = (user.trim(), captcha.trim());
    if user.is_empty() || pass.is_empty() || captcha.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    Ok(RegisterRequest { user: user.to_owned(), pass: pass.to_owned(), captcha: captcha.to_owned() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let user = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let captcha = RwSignal::new(String::new());
    let image = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let load_captcha = move || {
        captcha.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_captcha().await {
                Ok(png) => image.set(Some(crate::pages::login::png_data_url(&png))),
                Err(e) => {
                    log::error!("error loading captcha: {e}");
                    image.set(None);
                    notice.set(Some(Notice::Error(CAPTCHA_FAILED.to_owned())));
                }
            }
        });
    };
    load_captcha();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_registration(&user.get_untracked(), &password.get_untracked(), &captcha.get_untracked()) {
            Ok(request) => request,
            Err(message) => return notice.set(Some(Notice::Error(message.to_owned()))),
        };
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&request.user, &request.pass, &request.captcha).await {
                Ok(()) => {
                    notice.set(Some(Notice::Success(REGISTERED.to_owned())));
                    gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, || {
                        crate::net::fetch::redirect_to(LOGIN_PATH);
                    })
                    .forget();
                    return;
                }
                Err(e) => {
                    log::warn!("registration failed: {e}");
                    notice.set(Some(Notice::Error(e.user_message())));
                }
            }
            busy.set(false);
            load_captcha();
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, load_captcha);
    };

    view! {
        <div class="login-page">
            <div class="login-container register-container">
                <h1 class="app-title">"Create Account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="user">"Username"</label>
                        <input id="user" type="text" prop:value=move || user.get() on:input=move |ev| user.set(event_target_value(&ev))/>
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group captcha-group">
                        <label for="captcha">"Captcha"</label>
                        <div class="captcha-row">
                            {move || match image.get() {
                                Some(src) => view! { <img class="captcha-image" src=src alt="Captcha"/> }.into_any(),
                                None => view! { <span class="captcha-missing">"Failed to load captcha"</span> }.into_any(),
                            }}
                            <button type="button" class="btn btn-small" on:click=move |_| load_captcha()>"Refresh"</button>
                        </div>
                        <input
                            id="captcha"
                            type="text"
                            prop:value=move || captcha.get()
                            on:input=move |ev| captcha.set(event_target_value(&ev))
                        />
                    </div>
                    <Show when=move || notice.with(Option::is_some)>
                        {move || notice.get().map(|n| view! { <div class=n.class()>{n.text().to_owned()}</div> })}
                    </Show>
                    <button class="login-btn" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                    <p class="register-link">"Already have an account? " <a href=LOGIN_PATH>"Login"</a></p>
                </form>
            </div>
        </div>
    }
}
