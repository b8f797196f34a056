//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::confirm_dialog::{ConfirmDialog, Confirmer};
use crate::components::toast_stack::{ToastStack, Toasts};
use crate::pages::{console::ConsolePage, login::LoginPage, register::RegisterPage};
use crate::state::config::ConsoleConfig;
use crate::state::modal::{EventBus, ModalStack};
use crate::state::session::SessionState;

/// Set once `login.json` has been applied to the config context. Views read
/// their endpoints at mount, so the console waits for it.
#[derive(Clone, Copy)]
pub struct ConfigReady(pub RwSignal<bool>);

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared contexts (session, `login.json` configuration,
/// toasts, confirmations, dialog stack, event bus) and the three routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let config = RwSignal::new(ConsoleConfig::default());
    let ready = RwSignal::new(false);

    provide_context(session);
    provide_context(config);
    provide_context(ConfigReady(ready));
    provide_context(Toasts::new());
    provide_context(Confirmer::new());
    provide_context(RwSignal::new(ModalStack::default()));
    provide_context(RwSignal::new(EventBus::default()));

    // Browser storage and login.json are only readable after hydration.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        session.set(crate::util::storage::browser_session().snapshot());
        leptos::task::spawn_local(async move {
            config.set(ConsoleConfig::load().await);
            ready.set(true);
        });
    });

    let title = move || config.with(|c| c.login.app_title.clone());

    view! {
        <Stylesheet id="leptos" href="/pkg/probler-console.css"/>
        <Title text=title/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("") view=ConsolePage/>
            </Routes>
        </Router>
        <ToastStack/>
        <ConfirmDialog/>
    }
}
