//! Shared yes/no dialog for destructive actions.
//!
//! Views ask through [`Confirmer::ask`]; the answer is published on the
//! event bus and, when confirmed, the caller's action runs.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::state::modal::{ConfirmRequest, ConsoleEvent, EventBus, ModalSize};

/// Pending confirmation plus the action to run on "yes".
#[derive(Clone, Copy)]
pub struct Confirmer {
    request: RwSignal<Option<ConfirmRequest>>,
    on_confirm: StoredValue<Option<Callback<()>>>,
}

impl Confirmer {
    pub fn new() -> Self {
        Self { request: RwSignal::new(None), on_confirm: StoredValue::new(None) }
    }

    /// Show `request`, replacing any unanswered one.
    pub fn ask(self, request: ConfirmRequest, on_confirm: impl Fn() + Send + Sync + 'static) {
        self.on_confirm.set_value(Some(Callback::new(move |()| on_confirm())));
        self.request.set(Some(request));
    }

    fn resolve(self, confirmed: bool) {
        let Some(request) = self.request.get_untracked() else {
            return;
        };
        self.request.set(None);
        let action = self.on_confirm.try_update_value(Option::take).flatten();
        if let Some(bus) = use_context::<RwSignal<EventBus>>() {
            bus.update(|b| b.publish(ConsoleEvent::ConfirmResolved { id: request.id.clone(), confirmed }));
        }
        if confirmed {
            if let Some(action) = action {
                action.run(());
            }
        }
    }
}

impl Default for Confirmer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_confirmer() -> Confirmer {
    expect_context::<Confirmer>()
}

/// Renders the pending confirmation, if any. Mount once in the console shell.
#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let confirmer = use_confirmer();

    move || {
        confirmer.request.get().map(|request| {
            let cancel = Callback::new(move |()| confirmer.resolve(false));
            let detail = request.detail.clone();
            view! {
                <Modal id=request.modal_id() title=request.title.clone() size=ModalSize::Small on_close=cancel>
                    <div class="confirm-dialog">
                        <div class=format!("confirm-icon {}", request.kind.icon_class())>"!"</div>
                        <p class="confirm-message">{request.message.clone()}</p>
                        {detail.map(|d| view! { <p class="confirm-detail">{d}</p> })}
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| cancel.run(())>{request.cancel_text.clone()}</button>
                            <button
                                class=format!("btn {}", request.kind.button_class())
                                on:click=move |_| confirmer.resolve(true)
                            >
                                {request.confirm_text.clone()}
                            </button>
                        </div>
                    </div>
                </Modal>
            }
        })
    }
}
