//! Credentials editor: named bundles of A/Y/Z-side secrets keyed by item.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::confirm_dialog::use_confirmer;
use crate::components::data_table::{DataTable, RowActions};
use crate::components::modal::Modal;
use crate::components::toast_stack::use_toasts;
use crate::net::api;
use crate::net::types::{CredItem, Credential};
use crate::state::config::ConsoleConfig;
use crate::state::modal::{ConfirmRequest, DataDomain, ModalSize};
use crate::state::table::{Column, Row, TableConfig, TableState};
use crate::views::common::{ENTITY_PAGE_SIZES, FormActions, SecretField, TextField, count_cell, load_records, submit};

pub const CREDS_QUERY: &str = "select * from L8Credentials";
pub const MASK: &str = "********";

const REQUIRED: &str = "Please fill in all required fields";
const DUPLICATE_ID: &str = "Credentials ID already exists";
const KEY_REQUIRED: &str = "Key is required";
const DUPLICATE_KEY: &str = "A credential with this key already exists";
const EMPTY_MESSAGE: &str = "No credentials found. Click \"Add Credentials\" to create one.";

/// What the item table shows in place of a secret.
pub fn mask_value(value: &str) -> &'static str {
    if value.is_empty() { "-" } else { MASK }
}

pub fn credential_row(credential: &Credential) -> Row {
    match json!({ "id": credential.id, "name": credential.name, "count": credential.creds.len() }) {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("count", "Credentials Count").format(|value, _| {
            count_cell(value.as_u64().and_then(|n| usize::try_from(n).ok()).unwrap_or(0), "item")
        }),
    ]
}

pub fn table_config() -> TableConfig {
    TableConfig::new(columns()).rows_per_page(10).page_sizes(&ENTITY_PAGE_SIZES).empty_message(EMPTY_MESSAGE)
}

/// Check the editor fields and build the record to send.
///
/// # Errors
///
/// Returns the warning to show when a required field is blank or a new id
/// is already taken.
pub fn validate_credential(
    id: &str,
    name: &str,
    creds: BTreeMap<String, CredItem>,
    existing: &BTreeMap<String, Credential>,
    is_new: bool,
) -> Result<Credential, &'static str> {
    let (id, name) = (id.trim(), name.trim());
    if id.is_empty() || name.is_empty() {
        return Err(REQUIRED);
    }
    if is_new && existing.contains_key(id) {
        return Err(DUPLICATE_ID);
    }
    Ok(Credential { id: id.to_owned(), name: name.to_owned(), creds })
}

/// Add a new item or replace the one at `original`.
///
/// # Errors
///
/// Returns the warning to show for a blank key or a new key that already
/// exists.
pub fn upsert_item(
    items: &mut BTreeMap<String, CredItem>,
    original: Option<&str>,
    key: &str,
    item: CredItem,
) -> Result<(), &'static str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(KEY_REQUIRED);
    }
    match original {
        None if items.contains_key(key) => return Err(DUPLICATE_KEY),
        Some(old) if old != key => {
            items.remove(old);
        }
        _ => {}
    }
    items.insert(key.to_owned(), item);
    Ok(())
}

fn apply_list(list: Vec<Credential>, records: RwSignal<BTreeMap<String, Credential>>, state: RwSignal<TableState>) {
    let rows = list.iter().map(credential_row).collect();
    records.set(list.into_iter().map(|c| (c.id.clone(), c)).collect());
    state.update(|s| s.set_data(rows));
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Editing {
    credential: Credential,
    is_new: bool,
}

#[component]
pub fn CredentialsView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = StoredValue::new(config.with_untracked(|c| c.api.creds_endpoint()));
    let records = RwSignal::new(BTreeMap::<String, Credential>::new());
    let state = RwSignal::new(TableState::new(table_config()));
    let editing = RwSignal::new(None::<Editing>);
    let confirmer = use_confirmer();

    let refresh = move || {
        load_records(endpoint.get_value(), CREDS_QUERY, "Failed to fetch credentials", move |list: Vec<Credential>| {
            apply_list(list, records, state);
        });
    };
    refresh();

    let on_add = Callback::new(move |()| editing.set(Some(Editing { credential: Credential::default(), is_new: true })));
    let on_edit = Callback::new(move |id: String| {
        if let Some(credential) = records.with_untracked(|r| r.get(&id).cloned()) {
            editing.set(Some(Editing { credential, is_new: false }));
        }
    });
    let on_delete = Callback::new(move |id: String| {
        let request = ConfirmRequest::danger(
            &format!("delete-cred-{id}"),
            "Delete Credentials",
            &format!("Are you sure you want to delete credentials \"{id}\"?"),
        );
        confirmer.ask(request, move || {
            let (url, id) = (endpoint.get_value(), id.clone());
            submit(
                async move { api::delete_by_id(&url, &id, "Failed to delete credentials").await },
                "Credentials deleted successfully".to_owned(),
                DataDomain::Credentials,
                refresh,
            );
        });
    });

    view! {
        <div class="credentials-view">
            <DataTable
                state=state
                actions=RowActions { on_edit: Some(on_edit), on_delete: Some(on_delete), ..RowActions::default() }
                on_add=on_add
                add_label="Add Credentials"
            />
            {move || editing.get().map(|edit| view! {
                <CredentialEditor
                    edit=edit
                    records=records
                    endpoint=endpoint
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

#[derive(Clone, Debug, PartialEq)]
struct ItemEdit {
    original: Option<String>,
    key: String,
    item: CredItem,
}

#[component]
fn CredentialEditor(
    edit: Editing,
    records: RwSignal<BTreeMap<String, Credential>>,
    endpoint: StoredValue<String>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let is_new = edit.is_new;
    let id = RwSignal::new(edit.credential.id);
    let name = RwSignal::new(edit.credential.name);
    let items = RwSignal::new(edit.credential.creds);
    let item_edit = RwSignal::new(None::<ItemEdit>);

    let save = Callback::new(move |()| {
        let existing = records.get_untracked();
        let checked = validate_credential(&id.get_untracked(), &name.get_untracked(), items.get_untracked(), &existing, is_new);
        let credential = match checked {
            Ok(credential) => credential,
            Err(warning) => return toasts.warning(warning),
        };
        let url = endpoint.get_value();
        submit(
            async move { api::save(&url, &credential, is_new, "Failed to save credentials").await },
            "Credentials saved successfully".to_owned(),
            DataDomain::Credentials,
            move || on_saved.run(()),
        );
    });

    let item_rows = move || {
        let list = items.get();
        if list.is_empty() {
            return view! {
                <tr><td colspan="5" class="empty-nested-table">"No credential items. Click \"+ Add Item\" to add one."</td></tr>
            }
            .into_any();
        }
        list.into_iter()
            .map(|(key, item)| {
                let (edit_key, edit_item, remove_key) = (key.clone(), item.clone(), key.clone());
                view! {
                    <tr>
                        <td>{key}</td>
                        <td>{mask_value(&item.aside)}</td>
                        <td>{mask_value(&item.yside)}</td>
                        <td>{mask_value(&item.zside)}</td>
                        <td class="action-btns">
                            <button type="button" class="btn btn-small" on:click=move |_| item_edit.set(Some(ItemEdit {
                                original: Some(edit_key.clone()),
                                key: edit_key.clone(),
                                item: edit_item.clone(),
                            }))>"Edit"</button>
                            <button type="button" class="btn btn-danger btn-small" on:click=move |_| {
                                items.update(|m| {
                                    m.remove(&remove_key);
                                });
                            }>"Delete"</button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    let title = if is_new { "Add Credentials" } else { "Edit Credentials" };
    view! {
        <Modal id="creds-modal" title=title.to_owned() size=ModalSize::Large on_close=on_close>
            <div class="form-row">
                <TextField label="ID" value=id disabled=!is_new/>
                <TextField label="Name" value=name/>
            </div>
            <div class="form-group">
                <label>"Credential Items"</label>
                <div class="nested-table-container">
                    <div class="nested-table-header">
                        <span>"Items"</span>
                        <button type="button" class="btn btn-small" on:click=move |_| item_edit.set(Some(ItemEdit {
                            original: None,
                            key: String::new(),
                            item: CredItem::default(),
                        }))>"+ Add Item"</button>
                    </div>
                    <table class="nested-items-table">
                        <thead>
                            <tr><th>"Key"</th><th>"A-Side"</th><th>"Y-Side"</th><th>"Z-Side"</th><th>"Actions"</th></tr>
                        </thead>
                        <tbody>{item_rows}</tbody>
                    </table>
                </div>
            </div>
            <FormActions on_cancel=on_close on_save=save/>
            {move || item_edit.get().map(|edit| view! {
                <CredItemEditor edit=edit items=items on_close=Callback::new(move |()| item_edit.set(None))/>
            })}
        </Modal>
    }
}

#[component]
fn CredItemEditor(edit: ItemEdit, items: RwSignal<BTreeMap<String, CredItem>>, on_close: Callback<()>) -> impl IntoView {
    let toasts = use_toasts();
    let is_new = edit.original.is_none();
    let original = StoredValue::new(edit.original);
    let key = RwSignal::new(edit.key);
    let aside = RwSignal::new(edit.item.aside);
    let yside = RwSignal::new(edit.item.yside);
    let zside = RwSignal::new(edit.item.zside);

    let save = Callback::new(move |()| {
        let item = CredItem { aside: aside.get_untracked(), yside: yside.get_untracked(), zside: zside.get_untracked() };
        let mut next = items.get_untracked();
        match upsert_item(&mut next, original.get_value().as_deref(), &key.get_untracked(), item) {
            Ok(()) => {
                items.set(next);
                on_close.run(());
            }
            Err(warning) => toasts.warning(warning),
        }
    });

    let title = if is_new { "Add Credential Item" } else { "Edit Credential Item" };
    view! {
        <Modal id="cred-item-modal" title=title.to_owned() size=ModalSize::Medium on_close=on_close>
            <TextField label="Key" value=key disabled=!is_new/>
            <SecretField label="A-Side" value=aside/>
            <SecretField label="Y-Side" value=yside/>
            <SecretField label="Z-Side" value=zside/>
            <FormActions on_cancel=on_close on_save=save save_label="Save Item"/>
        </Modal>
    }
}
