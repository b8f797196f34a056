//! Users editor. Role assignments render as tags of role names, so the role
//! list is loaded alongside the users and refreshed when roles change.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::collections::{BTreeMap, BTreeSet};

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::confirm_dialog::use_confirmer;
use crate::components::data_table::{DataTable, RowActions};
use crate::components::modal::Modal;
use crate::components::toast_stack::use_toasts;
use crate::net::api;
use crate::net::types::{Password, Role, User};
use crate::state::config::ConsoleConfig;
use crate::state::modal::{ConfirmRequest, DataDomain, ModalSize};
use crate::state::table::{Column, Row, TableConfig, TableState, value_text};
use crate::views::common::{
    ENTITY_PAGE_SIZES, FormActions, TextField, load_records, reload_on_change, submit, tags_or_dash,
};

pub const USERS_QUERY: &str = "select * from L8User";
pub const ROLES_QUERY: &str = "select * from L8Role";

const REQUIRED: &str = "Please fill in all required fields";
const DUPLICATE_ID: &str = "User ID already exists";
const PASSWORD_REQUIRED: &str = "Password is required for new users";
const EMPTY_MESSAGE: &str = "No users found. Click \"Add User\" to create one.";

/// Names of the roles assigned to `user`; unknown role ids show as-is.
pub fn role_names(user: &User, roles: &BTreeMap<String, Role>) -> Vec<String> {
    user.roles
        .iter()
        .filter(|(_, on)| **on)
        .map(|(id, _)| roles.get(id).map_or_else(|| id.clone(), |r| r.role_name.clone()))
        .collect()
}

pub fn user_row(user: &User, roles: &BTreeMap<String, Role>) -> Row {
    match json!({ "userId": user.user_id, "fullName": user.full_name, "roles": role_names(user, roles) }) {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("userId", "User ID"),
        Column::new("fullName", "Full Name"),
        Column::new("roles", "Assigned Roles").format(|value, _| {
            let names = value.as_array().map(|a| a.iter().map(value_text).collect()).unwrap_or_default();
            tags_or_dash(names)
        }),
    ]
}

pub fn table_config() -> TableConfig {
    TableConfig::new(columns()).rows_per_page(10).page_sizes(&ENTITY_PAGE_SIZES).empty_message(EMPTY_MESSAGE)
}

/// Fields of the user editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub user_id: String,
    pub full_name: String,
    pub password: String,
    pub roles: BTreeSet<String>,
}

/// Check the editor fields and build the record to send.
///
/// Adding requires a password. Editing keeps everything on `original`
/// (including the password hash) apart from the name and role set.
///
/// # Errors
///
/// Returns the warning to show.
pub fn validate_user(
    form: &UserForm,
    existing: &BTreeMap<String, User>,
    original: Option<&User>,
) -> Result<User, &'static str> {
    let (user_id, full_name) = (form.user_id.trim(), form.full_name.trim());
    if user_id.is_empty() || full_name.is_empty() {
        return Err(REQUIRED);
    }
    let roles = form.roles.iter().map(|id| (id.clone(), true)).collect();
    match original {
        Some(user) => Ok(User { full_name: full_name.to_owned(), roles, ..user.clone() }),
        None if existing.contains_key(user_id) => Err(DUPLICATE_ID),
        None if form.password.is_empty() => Err(PASSWORD_REQUIRED),
        None => Ok(User {
            user_id: user_id.to_owned(),
            full_name: full_name.to_owned(),
            password: Some(Password { hash: form.password.clone() }),
            roles,
        }),
    }
}

// =============================================================================
// VIEW
// =============================================================================

#[component]
pub fn UsersView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let users_url = StoredValue::new(config.with_untracked(|c| c.api.users_endpoint()));
    let roles_url = StoredValue::new(config.with_untracked(|c| c.api.roles_endpoint()));
    let users = RwSignal::new(BTreeMap::<String, User>::new());
    let roles = RwSignal::new(BTreeMap::<String, Role>::new());
    let state = RwSignal::new(TableState::new(table_config()));
    let editing = RwSignal::new(None::<Option<User>>);
    let confirmer = use_confirmer();

    Effect::new(move |_| {
        let rows = users.with(|u| roles.with(|r| u.values().map(|user| user_row(user, r)).collect()));
        state.update(|s| s.set_data(rows));
    });

    let load_users = move || {
        load_records(users_url.get_value(), USERS_QUERY, "Failed to fetch users", move |list: Vec<User>| {
            users.set(list.into_iter().map(|u| (u.user_id.clone(), u)).collect());
        });
    };
    let load_roles = move || {
        load_records(roles_url.get_value(), ROLES_QUERY, "Failed to fetch roles", move |list: Vec<Role>| {
            roles.set(list.into_iter().map(|r| (r.role_id.clone(), r)).collect());
        });
    };
    load_roles();
    load_users();
    reload_on_change(DataDomain::Roles, load_roles);

    let on_edit = Callback::new(move |id: String| {
        if let Some(user) = users.with_untracked(|u| u.get(&id).cloned()) {
            editing.set(Some(Some(user)));
        }
    });
    let on_delete = Callback::new(move |id: String| {
        let request = ConfirmRequest::danger(
            &format!("delete-user-{id}"),
            "Delete User",
            &format!("Are you sure you want to delete user \"{id}\"?"),
        );
        confirmer.ask(request, move || {
            let (url, id) = (users_url.get_value(), id.clone());
            submit(
                async move { api::delete_by_id(&url, &id, "Failed to delete user").await },
                "User deleted successfully".to_owned(),
                DataDomain::Users,
                load_users,
            );
        });
    });

    view! {
        <div class="users-view">
            <DataTable
                state=state
                actions=RowActions { on_edit: Some(on_edit), on_delete: Some(on_delete), ..RowActions::default() }
                on_add=Callback::new(move |()| editing.set(Some(None)))
                add_label="Add User"
            />
            {move || editing.get().map(|original| view! {
                <UserEditor
                    original=original
                    users=users
                    roles=roles
                    endpoint=users_url
                    on_close=Callback::new(move |()| editing.set(None))
                    on_saved=Callback::new(move |()| {
                        editing.set(None);
                        load_users();
                    })
                />
            })}
        </div>
    }
}

#[component]
fn UserEditor(
    original: Option<User>,
    users: RwSignal<BTreeMap<String, User>>,
    roles: RwSignal<BTreeMap<String, Role>>,
    endpoint: StoredValue<String>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let is_new = original.is_none();
    let source = original.clone().unwrap_or_default();
    let user_id = RwSignal::new(source.user_id.clone());
    let full_name = RwSignal::new(source.full_name.clone());
    let password = RwSignal::new(String::new());
    let selected = RwSignal::new(source.roles.iter().filter(|(_, on)| **on).map(|(id, _)| id.clone()).collect::<BTreeSet<_>>());
    let original = StoredValue::new(original);

    let save = Callback::new(move |()| {
        let form = UserForm {
            user_id: user_id.get_untracked(),
            full_name: full_name.get_untracked(),
            password: password.get_untracked(),
            roles: selected.get_untracked(),
        };
        let checked = original.with_value(|o| users.with_untracked(|u| validate_user(&form, u, o.as_ref())));
        let user = match checked {
            Ok(user) => user,
            Err(warning) => return toasts.warning(warning),
        };
        let url = endpoint.get_value();
        submit(
            async move { api::save(&url, &user, is_new, "Failed to save user").await },
            "User saved successfully".to_owned(),
            DataDomain::Users,
            move || on_saved.run(()),
        );
    });

    let role_choices = move || {
        let list: Vec<Role> = roles.with(|r| r.values().cloned().collect());
        if list.is_empty() {
            return view! { <p class="empty-value">"No roles available. Create roles first."</p> }.into_any();
        }
        list.into_iter()
            .map(|role| {
                let (check_id, toggle_id) = (role.role_id.clone(), role.role_id.clone());
                view! {
                    <label class="checkbox-item">
                        <input
                            type="checkbox"
                            prop:checked=move || selected.with(|s| s.contains(&check_id))
                            on:change=move |ev| {
                                let on = event_target_checked(&ev);
                                selected.update(|s| {
                                    if on {
                                        s.insert(toggle_id.clone());
                                    } else {
                                        s.remove(&toggle_id);
                                    }
                                });
                            }
                        />
                        {format!("{} ({})", role.role_name, role.role_id)}
                    </label>
                }
            })
            .collect_view()
            .into_any()
    };

    let title = if is_new { "Add User" } else { "Edit User" };
    view! {
        <Modal id="user-modal" title=title.to_owned() size=ModalSize::Medium on_close=on_close>
            <TextField label="User ID" value=user_id disabled=!is_new/>
            <TextField label="Full Name" value=full_name/>
            <Show when=move || is_new>
                <TextField label="Password" value=password input_type="password" placeholder="Enter password"/>
            </Show>
            <div class="form-group">
                <label>"Assigned Roles"</label>
                <div class="checkbox-list">{role_choices}</div>
            </div>
            <FormActions on_cancel=on_close on_save=save/>
        </Modal>
    }
}
