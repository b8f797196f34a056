//! Toast stack pinned to the corner of the viewport.

use leptos::prelude::*;

use crate::state::toast::{DEFAULT_TOAST_MS, ToastKind, ToastQueue};

/// Handle for raising toasts from any component.
#[derive(Clone, Copy)]
pub struct Toasts(pub RwSignal<ToastQueue>);

impl Toasts {
    pub fn new() -> Self {
        Self(RwSignal::new(ToastQueue::default()))
    }

    /// Show a toast; `duration_ms == 0` keeps it until dismissed.
    pub fn show(self, kind: ToastKind, message: &str, duration_ms: u32) {
        let mut id = 0;
        self.0.update(|q| id = q.push(kind, message, duration_ms));
        match kind {
            ToastKind::Error => log::error!("{message}"),
            ToastKind::Warning => log::warn!("{message}"),
            ToastKind::Success => log::info!("{message}"),
        }
        if duration_ms > 0 {
            self.dismiss_after(id, duration_ms);
        }
    }

    pub fn error(self, message: &str) {
        self.show(ToastKind::Error, message, DEFAULT_TOAST_MS);
    }

    pub fn success(self, message: &str) {
        self.show(ToastKind::Success, message, DEFAULT_TOAST_MS);
    }

    pub fn warning(self, message: &str) {
        self.show(ToastKind::Warning, message, DEFAULT_TOAST_MS);
    }

    pub fn dismiss(self, id: u64) {
        self.0.update(|q| {
            q.dismiss(id);
        });
    }

    fn dismiss_after(self, id: u64, duration_ms: u32) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::callback::Timeout::new(duration_ms, move || self.dismiss(id)).forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, duration_ms);
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-container">
            <For each=move || toasts.0.get().toasts().to_vec() key=|t| t.id let:toast>
                <div class=toast.kind.class()>
                    <div class="toast-icon">{toast.kind.icon()}</div>
                    <div class="toast-content">
                        <div class="toast-title">{toast.kind.title()}</div>
                        <div class="toast-message">{toast.message.clone()}</div>
                    </div>
                    <button class="toast-close" title="Dismiss" on:click=move |_| toasts.dismiss(toast.id)>
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
