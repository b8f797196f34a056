//! Roles editor with a nested rule editor.
//!
//! Rules are edited as an ordered list and sent keyed by rule id. Element
//! types come from the registry the first time a rule dialog opens; the
//! wildcard is always offered even when the registry is unreachable.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::confirm_dialog::use_confirmer;
use crate::components::data_table::{DataTable, RowActions};
use crate::components::modal::Modal;
use crate::components::toast_stack::use_toasts;
use crate::net::api::{self, ANY_ELEMENT_TYPE};
use crate::net::types::{Role, Rule};
use crate::state::config::ConsoleConfig;
use crate::state::modal::{ConfirmRequest, DataDomain, ModalSize};
use crate::state::table::{Column, Row, TableConfig, TableState};
use crate::views::common::{ENTITY_PAGE_SIZES, FormActions, TextField, load_records, submit};

pub const ROLES_QUERY: &str = "select * from L8Role";

/// Action codes as the backend stores them, with their display names.
pub const ACTION_NAMES: [(&str, &str); 6] =
    [("-999", "ALL"), ("1", "POST"), ("2", "PUT"), ("3", "PATCH"), ("4", "DELETE"), ("5", "GET")];

const REQUIRED: &str = "Please fill in all required fields";
const DUPLICATE_ID: &str = "Role ID already exists";
const RULE_REQUIRED: &str = "Please fill in Rule ID and Element Type";
const DUPLICATE_RULE: &str = "Rule ID already exists in this role";
const EMPTY_MESSAGE: &str = "No roles found. Click \"Add Role\" to create one.";

// =============================================================================
// RULES
// =============================================================================

pub fn action_name(code: &str) -> String {
    ACTION_NAMES.iter().find(|(c, _)| *c == code).map_or_else(|| code.to_owned(), |(_, name)| (*name).to_owned())
}

/// Enabled actions by name: known codes in table order, unknown codes after.
pub fn enabled_actions(rule: &Rule) -> Vec<String> {
    let enabled = |code: &str| rule.actions.get(code).copied().unwrap_or(false);
    let known = ACTION_NAMES.iter().filter(|(code, _)| enabled(code)).map(|(_, name)| (*name).to_owned());
    let unknown = rule
        .actions
        .iter()
        .filter(|(code, on)| **on && !ACTION_NAMES.iter().any(|(c, _)| c == code))
        .map(|(code, _)| code.clone());
    known.chain(unknown).collect()
}

/// `Type: Foo | Actions: POST, GET` line under a rule id.
pub fn rule_summary(rule: &Rule) -> String {
    let actions = enabled_actions(rule);
    let actions = if actions.is_empty() { "None".to_owned() } else { actions.join(", ") };
    format!("Type: {} | Actions: {actions}", rule.elem_type)
}

/// Fields of the rule editor; blank action codes and attribute keys are
/// placeholder rows the user has not filled in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleForm {
    pub rule_id: String,
    pub elem_type: String,
    pub allowed: bool,
    pub actions: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

/// Build a rule from the editor and check it against the role's other rules.
///
/// # Errors
///
/// Returns the warning to show for a blank id or type, or a new rule whose
/// id is already used.
pub fn validate_rule(form: &RuleForm, rules: &[Rule], editing: Option<usize>) -> Result<Rule, &'static str> {
    let (rule_id, elem_type) = (form.rule_id.trim(), form.elem_type.trim());
    if rule_id.is_empty() || elem_type.is_empty() {
        return Err(RULE_REQUIRED);
    }
    if editing.is_none() && rules.iter().any(|r| r.rule_id == rule_id) {
        return Err(DUPLICATE_RULE);
    }
    Ok(Rule {
        rule_id: rule_id.to_owned(),
        elem_type: elem_type.to_owned(),
        allowed: form.allowed,
        actions: form.actions.iter().filter(|c| !c.is_empty()).map(|c| (c.clone(), true)).collect(),
        attributes: form
            .attributes
            .iter()
            .filter(|(k, _)| !k.trim().is_empty())
            .map(|(k, v)| (k.trim().to_owned(), v.clone()))
            .collect(),
    })
}

/// Put `rule` at `editing`, or append it.
pub fn place_rule(rules: &mut Vec<Rule>, editing: Option<usize>, rule: Rule) {
    match editing.and_then(|i| rules.get_mut(i)) {
        Some(slot) => *slot = rule,
        None => rules.push(rule),
    }
}

// =============================================================================
// ROLES
// =============================================================================

pub fn role_row(role: &Role) -> Row {
    match json!({ "roleId": role.role_id, "roleName": role.role_name, "rulesCount": role.rules.len() }) {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub fn columns() -> Vec<Column> {
    vec![Column::new("roleId", "Role ID"), Column::new("roleName", "Role Name"), Column::new("rulesCount", "Rules Count")]
}

pub fn table_config() -> TableConfig {
    TableConfig::new(columns()).rows_per_page(10).page_sizes(&ENTITY_PAGE_SIZES).empty_message(EMPTY_MESSAGE)
}

/// Check the role fields and build the record to send.
///
/// # Errors
///
/// Returns the warning to show.
pub fn validate_role(
    role_id: &str,
    role_name: &str,
    rules: Vec<Rule>,
    existing: &BTreeMap<String, Role>,
    is_new: bool,
) -> Result<Role, &'static str> {
    let (role_id, role_name) = (role_id.trim(), role_name.trim());
    if role_id.is_empty() || role_name.is_empty() {
        return Err(REQUIRED);
    }
    if is_new && existing.contains_key(role_id) {
        return Err(DUPLICATE_ID);
    }
    Ok(Role {
        role_id: role_id.to_owned(),
        role_name: role_name.to_owned(),
        rules: rules.into_iter().map(|r| (r.rule_id.clone(), r)).collect(),
    })
}

// =============================================================================
// VIEW
// =============================================================================

#[component]
pub fn RolesView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = StoredValue::new(config.with_untracked(|c| c.api.roles_endpoint()));
    let registry = StoredValue::new(config.with_untracked(|c| c.api.registry_endpoint()));
    let records = RwSignal::new(BTreeMap::<String, Role>::new());
    let state = RwSignal::new(TableState::new(table_config()));
    let editing = RwSignal::new(None::<Option<Role>>);
    let element_types = RwSignal::new(None::<Vec<String>>);
    let confirmer = use_confirmer();

    let refresh = move || {
        load_records(endpoint.get_value(), ROLES_QUERY, "Failed to fetch roles", move |list: Vec<Role>| {
            let rows = list.iter().map(role_row).collect();
            records.set(list.into_iter().map(|r| (r.role_id.clone(), r)).collect());
            state.update(|s| s.set_data(rows));
        });
    };
    refresh();

    let on_edit = Callback::new(move |id: String| {
        if let Some(role) = records.with_untracked(|r| r.get(&id).cloned()) {
            editing.set(Some(Some(role)));
        }
    });
    let on_delete = Callback::new(move |id: String| {
        let request = ConfirmRequest::danger(
            &format!("delete-role-{id}"),
            "Delete Role",
            &format!("Are you sure you want to delete role \"{id}\"?"),
        );
        confirmer.ask(request, move || {
            let (url, id) = (endpoint.get_value(), id.clone());
            submit(
                async move { api::delete_by_id(&url, &id, "Failed to delete role").await },
                "Role deleted successfully".to_owned(),
                DataDomain::Roles,
                refresh,
            );
        });
    });

    view! {
        <div class="roles-view">
            <DataTable
                state=state
                actions=RowActions { on_edit: Some(on_edit), on_delete: Some(on_delete), ..RowActions::default() }
                on_add=Callback::new(move |()| editing.set(Some(None)))
                add_label="Add Role"
            />
            {move || editing.get().map(|original| view! {
                <RoleEditor
                    original=original
                    records=records
                    endpoint=endpoint
                    registry=registry
                    element_types=element_types
                    on_close=Callback::new(move |()| editing.set(None))
                    on_saved=Callback::new(move |()| {
                        editing.set(None);
                        refresh();
                    })
                />
            })}
        </div>
    }
}

#[component]
fn RoleEditor(
    original: Option<Role>,
    records: RwSignal<BTreeMap<String, Role>>,
    endpoint: StoredValue<String>,
    registry: StoredValue<String>,
    element_types: RwSignal<Option<Vec<String>>>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let is_new = original.is_none();
    let source = original.unwrap_or_default();
    let role_id = RwSignal::new(source.role_id);
    let role_name = RwSignal::new(source.role_name);
    let rules = RwSignal::new(source.rules.into_values().collect::<Vec<_>>());
    // `Some(None)` adds a rule, `Some(Some(i))` edits rule `i`.
    let rule_edit = RwSignal::new(None::<Option<usize>>);

    let save = Callback::new(move |()| {
        let checked = records.with_untracked(|existing| {
            validate_role(&role_id.get_untracked(), &role_name.get_untracked(), rules.get_untracked(), existing, is_new)
        });
        let role = match checked {
            Ok(role) => role,
            Err(warning) => return toasts.warning(warning),
        };
        let url = endpoint.get_value();
        submit(
            async move { api::save(&url, &role, is_new, "Failed to save role").await },
            "Role saved successfully".to_owned(),
            DataDomain::Roles,
            move || on_saved.run(()),
        );
    });

    let rule_list = move || {
        let list = rules.get();
        if list.is_empty() {
            return view! { <p class="empty-value">"No rules defined. Click \"Add Rule\" to create one."</p> }.into_any();
        }
        list.into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let (tag_class, tag_text) = if rule.allowed { ("tag allow", "Allow") } else { ("tag deny", "Deny") };
                view! {
                    <div class="rule-row">
                        <div class="rule-info">
                            <div class="rule-id">{rule.rule_id.clone()}</div>
                            <div class="rule-details">
                                <span class=tag_class>{tag_text}</span>
                                " "
                                {rule_summary(&rule)}
                            </div>
                        </div>
                        <button type="button" class="btn btn-small" on:click=move |_| rule_edit.set(Some(Some(index)))>"Edit"</button>
                        <button type="button" class="btn btn-danger btn-small" on:click=move |_| {
                            rules.update(|r| {
                                if index < r.len() {
                                    r.remove(index);
                                }
                            });
                        }>"Remove"</button>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    let title = if is_new { "Add Role" } else { "Edit Role" };
    view! {
        <Modal id="role-modal" title=title.to_owned() size=ModalSize::Large on_close=on_close>
            <div class="form-row">
                <TextField label="Role ID" value=role_id disabled=!is_new/>
                <TextField label="Role Name" value=role_name/>
            </div>
            <div class="form-group">
                <label>"Rules"</label>
                <button type="button" class="btn btn-small" on:click=move |_| rule_edit.set(Some(None))>"Add Rule"</button>
                <div class="rules-container">{rule_list}</div>
            </div>
            <FormActions on_cancel=on_close on_save=save/>
            {move || rule_edit.get().map(|editing| view! {
                <RuleEditor
                    editing=editing
                    rules=rules
                    registry=registry
                    element_types=element_types
                    on_close=Callback::new(move |()| rule_edit.set(None))
                />
            })}
        </Modal>
    }
}

#[derive(Clone, Copy)]
struct KeyedText {
    id: u64,
    key: RwSignal<String>,
    value: RwSignal<String>,
}

impl KeyedText {
    fn new(id: u64, key: String, value: String) -> Self {
        Self { id, key: RwSignal::new(key), value: RwSignal::new(value) }
    }
}

#[component]
fn RuleEditor(
    editing: Option<usize>,
    rules: RwSignal<Vec<Rule>>,
    registry: StoredValue<String>,
    element_types: RwSignal<Option<Vec<String>>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let source = editing.and_then(|i| rules.with_untracked(|r| r.get(i).cloned()));
    let is_new = source.is_none();
    let source = source.unwrap_or(Rule { elem_type: ANY_ELEMENT_TYPE.to_owned(), allowed: true, ..Rule::default() });

    let rule_id = RwSignal::new(source.rule_id.clone());
    let elem_type = RwSignal::new(source.elem_type.clone());
    let allowed = RwSignal::new(source.allowed);
    let next_id = StoredValue::new(0_u64);
    let fresh_id = move || {
        next_id.update_value(|n| *n += 1);
        next_id.get_value()
    };
    let actions = RwSignal::new(
        source.actions.iter().filter(|(_, on)| **on).map(|(code, _)| KeyedText::new(fresh_id(), code.clone(), String::new())).collect::<Vec<_>>(),
    );
    let attributes = RwSignal::new(
        source.attributes.iter().map(|(k, v)| KeyedText::new(fresh_id(), k.clone(), v.clone())).collect::<Vec<_>>(),
    );

    if element_types.with_untracked(Option::is_none) {
        load_element_types(registry.get_value(), element_types);
    }

    let save = Callback::new(move |()| {
        let form = RuleForm {
            rule_id: rule_id.get_untracked(),
            elem_type: elem_type.get_untracked(),
            allowed: allowed.get_untracked(),
            actions: actions.with_untracked(|a| a.iter().map(|row| row.key.get_untracked()).collect()),
            attributes: attributes
                .with_untracked(|a| a.iter().map(|row| (row.key.get_untracked(), row.value.get_untracked())).collect()),
        };
        let checked = rules.with_untracked(|r| validate_rule(&form, r, editing));
        match checked {
            Ok(rule) => {
                rules.update(|r| place_rule(r, editing, rule));
                on_close.run(());
            }
            Err(warning) => toasts.warning(warning),
        }
    });

    let type_options = move || {
        let types = element_types.get().unwrap_or_else(|| vec![ANY_ELEMENT_TYPE.to_owned()]);
        types
            .into_iter()
            .map(|t| {
                let label = if t == ANY_ELEMENT_TYPE { "* (Wildcard)".to_owned() } else { t.clone() };
                let selected_value = t.clone();
                view! { <option value=t selected=move || elem_type.with(|e| *e == selected_value)>{label}</option> }
            })
            .collect_view()
    };

    let title = if is_new { "Add Rule" } else { "Edit Rule" };
    view! {
        <Modal id="rule-modal" title=title.to_owned() size=ModalSize::Medium on_close=on_close>
            <TextField label="Rule ID" value=rule_id/>
            <div class="form-group">
                <label>"Element Type"</label>
                <select prop:value=move || elem_type.get() on:change=move |ev| elem_type.set(event_target_value(&ev))>
                    {type_options}
                </select>
            </div>
            <div class="form-group">
                <label>"Rule Type"</label>
                <select
                    prop:value=move || if allowed.get() { "true" } else { "false" }
                    on:change=move |ev| allowed.set(event_target_value(&ev) == "true")
                >
                    <option value="true">"Allow"</option>
                    <option value="false">"Deny"</option>
                </select>
            </div>
            <div class="form-group">
                <label>"Actions"</label>
                <button type="button" class="btn btn-small" on:click=move |_| {
                    let row = KeyedText::new(fresh_id(), String::new(), String::new());
                    actions.update(|a| a.push(row));
                }>"Add Action"</button>
                <div class="kv-container">
                    <For each=move || actions.get() key=|row: &KeyedText| row.id let:row>
                        <div class="kv-row">
                            <select prop:value=move || row.key.get() on:change=move |ev| row.key.set(event_target_value(&ev))>
                                <option value="">"Select Action"</option>
                                {ACTION_NAMES.iter().map(|(code, name)| view! { <option value=*code>{*name}</option> }).collect_view()}
                            </select>
                            <button type="button" class="remove-btn" on:click=move |_| actions.update(|a| a.retain(|r| r.id != row.id))>"X"</button>
                        </div>
                    </For>
                </div>
            </div>
            <div class="form-group">
                <label>"Attributes"</label>
                <button type="button" class="btn btn-small" on:click=move |_| {
                    let row = KeyedText::new(fresh_id(), String::new(), String::new());
                    attributes.update(|a| a.push(row));
                }>"Add Attribute"</button>
                <div class="kv-container">
                    <For each=move || attributes.get() key=|row: &KeyedText| row.id let:row>
                        <div class="kv-row">
                            <input type="text" placeholder="Key" prop:value=move || row.key.get() on:input=move |ev| row.key.set(event_target_value(&ev))/>
                            <input type="text" placeholder="Value" prop:value=move || row.value.get() on:input=move |ev| row.value.set(event_target_value(&ev))/>
                            <button type="button" class="remove-btn" on:click=move |_| attributes.update(|a| a.retain(|r| r.id != row.id))>"X"</button>
                        </div>
                    </For>
                </div>
            </div>
            <FormActions on_cancel=on_close on_save=save save_label="Save Rule"/>
        </Modal>
    }
}

fn load_element_types(url: String, element_types: RwSignal<Option<Vec<String>>>) {
    let toasts = use_toasts();
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match api::fetch_element_types(&url).await {
                Ok(types) => element_types.set(Some(types)),
                Err(e) => {
                    log::error!("registry types unavailable: {e}");
                    toasts.error(&e.user_message());
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, element_types, toasts);
    }
}
