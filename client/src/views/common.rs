//! Pieces shared by the security editors: count badges, record loading,
//! change announcements, and the labelled form inputs.

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;

use std::future::Future;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;
use serde::de::DeserializeOwned;

use crate::components::toast_stack::Toasts;
use crate::net::fetch::ApiError;
use crate::state::modal::{ConsoleEvent, DataDomain, EventBus};
use crate::state::table::Cell;

/// Page-size choices for the entity editors.
pub const ENTITY_PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// `1 item`, `3 items`.
pub fn count_label(count: usize, singular: &str) -> String {
    if count == 1 { format!("{count} {singular}") } else { format!("{count} {singular}s") }
}

pub fn count_cell(count: usize, singular: &str) -> Cell {
    Cell::Tags(vec![count_label(count, singular)])
}

/// Tag list, or `-` when there is nothing to show.
pub fn tags_or_dash(tags: Vec<String>) -> Cell {
    if tags.is_empty() { Cell::text("-") } else { Cell::Tags(tags) }
}

/// Run `f` under `owner` so context lookups inside it still resolve once the
/// spawning component's turn is over.
pub fn run_in_owner<T>(owner: Option<&Owner>, f: impl FnOnce() -> T) -> T {
    match owner {
        Some(owner) => owner.with(f),
        None => f(),
    }
}

/// Run a save or delete. On success: toast `success`, announce the change
/// to `domain` on the event bus, then call `done` under the caller's owner.
pub fn submit<F>(request: F, success: String, domain: DataDomain, done: impl FnOnce() + 'static)
where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    let owner = Owner::current();
    let toasts = use_context::<Toasts>();
    let bus = use_context::<RwSignal<EventBus>>();
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match request.await {
                Ok(()) => {
                    if let Some(toasts) = toasts {
                        toasts.success(&success);
                    }
                    if let Some(bus) = bus {
                        bus.update(|b| b.publish(ConsoleEvent::DataChanged(domain)));
                    }
                    run_in_owner(owner.as_ref(), done);
                }
                Err(ApiError::AuthRequired) => {}
                Err(e) => {
                    log::error!("{domain:?} request failed: {e}");
                    if let Some(toasts) = toasts {
                        toasts.error(&e.user_message());
                    }
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, success, domain, done, owner, toasts, bus);
    }
}

/// Whether a subscriber that last saw `seen` should reload at `current`.
/// The first run only records the sequence.
pub fn reload_due(seen: Option<u64>, current: u64) -> bool {
    seen.is_some_and(|seen| current > seen)
}

/// Re-run `reload` whenever another view announces a change to `domain`.
pub fn reload_on_change(domain: DataDomain, reload: impl Fn() + 'static) {
    let Some(bus) = use_context::<RwSignal<EventBus>>() else {
        return;
    };
    Effect::new(move |seen: Option<u64>| {
        let current = bus.with(|b| b.change_seq(domain));
        if reload_due(seen, current) {
            reload();
        }
        current
    });
}

/// Run `query` against `endpoint` and hand the decoded list to `apply`.
///
/// Failures are logged and toasted; a 401 has already sent the user to the
/// login view, so it stays quiet. Safe to call from a task with no owner:
/// the toast is then skipped.
pub fn load_records<T>(endpoint: String, query: &'static str, failure: &'static str, apply: impl FnOnce(Vec<T>) + 'static)
where
    T: DeserializeOwned + 'static,
{
    let toasts = use_context::<Toasts>();
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_list::<T>(&endpoint, query, failure).await {
                Ok(page) => apply(page.list),
                Err(ApiError::AuthRequired) => {}
                Err(e) => {
                    log::error!("{failure}: {e}");
                    if let Some(toasts) = toasts {
                        toasts.error(&e.user_message());
                    }
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (endpoint, query, failure, apply, toasts);
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] disabled: bool,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type.unwrap_or_else(|| "text".to_owned())
                placeholder=placeholder
                disabled=disabled
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Password input with a Show/Hide toggle.
#[component]
pub fn SecretField(#[prop(into)] label: String, value: RwSignal<String>) -> impl IntoView {
    let visible = RwSignal::new(false);
    view! {
        <div class="form-group">
            <label>{label}</label>
            <div class="password-field">
                <input
                    type=move || if visible.get() { "text" } else { "password" }
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
                <button type="button" class="btn btn-small" on:click=move |_| visible.update(|v| *v = !*v)>
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
        </div>
    }
}

/// Cancel / save buttons at the bottom of an editor.
#[component]
pub fn FormActions(
    on_cancel: Callback<()>,
    on_save: Callback<()>,
    #[prop(optional, into)] save_label: Option<String>,
) -> impl IntoView {
    view! {
        <div class="probler-popup-footer">
            <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            <button type="button" class="btn btn-primary" on:click=move |_| on_save.run(())>
                {save_label.unwrap_or_else(|| "Save".to_owned())}
            </button>
        </div>
    }
}
