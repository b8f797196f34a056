//! Shared dialog frame used by every entity editor and detail view.
//!
//! DESIGN
//! ======
//! A mounted `Modal` registers itself on the `ModalStack` context and drops
//! off it on cleanup. Only the top dialog answers Escape, so a rule editor
//! opened above a role editor closes first. Clicking the overlay closes the
//! dialog it belongs to; clicks inside the container never reach it.

use leptos::prelude::*;

use crate::state::modal::{ConsoleEvent, EventBus, ModalSize, ModalStack, key_closes_modal};

#[component]
pub fn Modal(
    #[prop(into)] id: String,
    #[prop(into)] title: Signal<String>,
    #[prop(optional)] size: ModalSize,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let stack = expect_context::<RwSignal<ModalStack>>();
    let bus = expect_context::<RwSignal<EventBus>>();

    stack.update(|s| s.open(&id));
    bus.update(|b| b.publish(ConsoleEvent::ModalOpened(id.clone())));

    let cleanup_id = id.clone();
    on_cleanup(move || {
        if stack.try_update(|s| s.close(&cleanup_id)).unwrap_or(false) {
            bus.update(|b| b.publish(ConsoleEvent::ModalClosed(cleanup_id)));
        }
    });

    #[cfg(feature = "hydrate")]
    {
        let key_id = id.clone();
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            let is_top = stack.with_untracked(|s| s.top() == Some(key_id.as_str()));
            if is_top && key_closes_modal(&ev.key()) {
                ev.prevent_default();
                on_close.run(());
            }
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key_closes_modal;
    }

    let stacked_id = id.clone();
    let overlay_class = move || {
        if stack.with(|s| s.is_stacked(&stacked_id)) {
            "probler-popup-overlay active stacked"
        } else {
            "probler-popup-overlay active"
        }
    };

    view! {
        <div class=overlay_class on:click=move |_| on_close.run(())>
            <div
                class=format!("probler-popup-container {}", size.class())
                role="dialog"
                on:click=move |ev| ev.stop_propagation()
            >
                <div class="probler-popup-header">
                    <h3 class="probler-popup-title">{move || title.get()}</h3>
                    <button class="probler-popup-close" title="Close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="probler-popup-body">{children()}</div>
            </div>
        </div>
    }
}
