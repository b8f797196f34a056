//! Security section: one tab per editor. Only the active editor is mounted,
//! so each tab loads fresh when it is opened.

use leptos::prelude::*;

use crate::components::tab_strip::{Tab, TabStrip};
use crate::views::credentials::CredentialsView;
use crate::views::roles::RolesView;
use crate::views::targets::TargetsView;
use crate::views::users::UsersView;

pub const DEFAULT_TAB: &str = "users";

pub fn tabs() -> Vec<Tab> {
    vec![
        Tab::new("users", "Users"),
        Tab::new("roles", "Roles"),
        Tab::new("credentials", "Credentials"),
        Tab::new("targets", "Targets"),
    ]
}

#[component]
pub fn SecurityView() -> impl IntoView {
    let active = RwSignal::new(DEFAULT_TAB.to_owned());

    let pane = move || match active.get().as_str() {
        "roles" => view! { <RolesView/> }.into_any(),
        "credentials" => view! { <CredentialsView/> }.into_any(),
        "targets" => view! { <TargetsView/> }.into_any(),
        _ => view! { <UsersView/> }.into_any(),
    };

    view! {
        <div class="security-view">
            <TabStrip tabs=tabs() active=active/>
            <div class="security-tab-content">{pane}</div>
        </div>
    }
}
