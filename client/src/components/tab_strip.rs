//! Row of tab buttons bound to a string signal.

use leptos::prelude::*;

/// One tab: the value written to `active` and its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub label: String,
}

impl Tab {
    pub fn new(key: &str, label: &str) -> Self {
        Self { key: key.to_owned(), label: label.to_owned() }
    }
}

#[component]
pub fn TabStrip(tabs: Vec<Tab>, active: RwSignal<String>, #[prop(optional)] on_change: Option<Callback<String>>) -> impl IntoView {
    let buttons = tabs
        .into_iter()
        .map(|tab| {
            let key = tab.key.clone();
            let active_key = tab.key;
            view! {
                <button
                    class="tab-btn"
                    class:active=move || active.with(|a| *a == active_key)
                    on:click=move |_| {
                        if active.with_untracked(|a| *a == key) {
                            return;
                        }
                        active.set(key.clone());
                        if let Some(cb) = on_change {
                            cb.run(key.clone());
                        }
                    }
                >
                    {tab.label}
                </button>
            }
        })
        .collect_view();

    view! { <div class="tabs">{buttons}</div> }
}
