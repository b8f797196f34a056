//! Authenticated console shell: header, section navigation, content region.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route after login. It owns the current section name,
//! redirects to `/login` once the stored session turns out to be empty, and
//! runs the idle timer configured by `login.json`.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::ConfigReady;
use crate::components::nav::Nav;
use crate::components::section_host::SectionHost;
use crate::net::fetch::LOGIN_PATH;
use crate::state::config::ConsoleConfig;
use crate::state::section::DEFAULT_SECTION;
use crate::state::session::SessionState;

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Idle time before the console signs out, or `None` when disabled.
pub fn session_timeout_ms(minutes: u32) -> Option<u32> {
    (minutes > 0).then(|| minutes.saturating_mul(60_000))
}

/// Session state after a sign-out: storage was read and holds nothing.
pub fn signed_out() -> SessionState {
    SessionState { loaded: true, ..SessionState::default() }
}

#[component]
pub fn ConsolePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let ConfigReady(ready) = expect_context::<ConfigReady>();
    let navigate = use_navigate();
    let section = RwSignal::new(DEFAULT_SECTION.to_owned());

    Effect::new(move || {
        if session.with(SessionState::needs_login) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });

    install_idle_timeout(session, config);

    let on_logout = move |_| {
        crate::util::storage::browser_session().logout();
        session.set(signed_out());
    };

    let username = move || session.with(|s| s.username.clone());
    let title = move || config.with(|c| c.login.app_title.clone());

    view! {
        <Show when=move || session.with(SessionState::is_authenticated)>
            <div class="app-container">
                <header class="app-header">
                    <div class="header-title">{title}</div>
                    <div class="header-user">
                        <span class="username">{username}</span>
                        <button class="logout-btn" on:click=on_logout>"Logout"</button>
                    </div>
                </header>
                <div class="app-body">
                    <aside class="sidebar">
                        <Nav section=section/>
                    </aside>
                    <main class="content-area">
                        <Show when=move || ready.get()>
                            <SectionHost section=section/>
                        </Show>
                    </main>
                </div>
            </div>
        </Show>
    }
}

/// Sign out after `sessionTimeout` minutes without a click, key press,
/// scroll or mouse move. Each activity restarts the countdown.
fn install_idle_timeout(session: RwSignal<SessionState>, config: RwSignal<ConsoleConfig>) {
    #[cfg(feature = "hydrate")]
    {
        use crate::components::toast_stack::use_toasts;

        let toasts = use_toasts();
        let generation = StoredValue::new(0_u64);

        let reset = move || {
            let Some(ms) = config.with_untracked(|c| session_timeout_ms(c.login.session_timeout)) else {
                return;
            };
            generation.update_value(|g| *g += 1);
            let current = generation.get_value();
            gloo_timers::callback::Timeout::new(ms, move || {
                if generation.try_get_value() != Some(current) {
                    return;
                }
                log::info!("idle timeout reached, signing out");
                crate::util::storage::browser_session().clear();
                toasts.warning(SESSION_EXPIRED);
                session.set(signed_out());
            })
            .forget();
        };

        Effect::new(move || {
            config.track();
            reset();
        });

        let handles = [
            window_event_listener(leptos::ev::click, move |_| reset()),
            window_event_listener(leptos::ev::keypress, move |_| reset()),
            window_event_listener(leptos::ev::scroll, move |_| reset()),
            window_event_listener(leptos::ev::mousemove, move |_| reset()),
        ];
        on_cleanup(move || {
            generation.update_value(|g| *g += 1);
            for handle in handles {
                handle.remove();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, config);
    }
}
