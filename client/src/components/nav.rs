//! Sidebar navigation between console sections.

use leptos::prelude::*;

use crate::state::section::SECTIONS;

#[component]
pub fn Nav(section: RwSignal<String>) -> impl IntoView {
    let items = SECTIONS
        .iter()
        .map(|info| {
            let name = info.name;
            view! {
                <li>
                    <a
                        href="#"
                        class="nav-link"
                        class:active=move || section.with(|s| s == name)
                        data-section=name
                        on:click=move |ev| {
                            ev.prevent_default();
                            section.set(name.to_owned());
                        }
                    >
                        {info.label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar-nav">
            <ul class="nav-list">{items}</ul>
        </nav>
    }
}
