//! Polling targets: server-paged per inventory type, with start/stop per
//! target and for a whole inventory type, and nested host and protocol
//! editors.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table's base clause pins `inventoryType`; switching the type selector
//! swaps the clause and refetches. Each page fetched is also decoded into a
//! local cache so edit and toggle work from the full record rather than the
//! flattened row. Credential ids for the protocol editor come from the
//! credentials endpoint and are reloaded when the credentials view saves.

#[cfg(test)]
#[path = "targets_test.rs"]
mod targets_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::confirm_dialog::use_confirmer;
use crate::components::data_table::{DataTable, RowActions};
use crate::components::modal::Modal;
use crate::components::toast_stack::use_toasts;
use crate::net::api;
use crate::net::query::ListResponse;
use crate::net::types::{Credential, HostConfig, Target, TargetAction, TargetHost};
use crate::state::config::ConsoleConfig;
use crate::state::modal::{ConfirmRequest, DataDomain, ModalSize};
use crate::state::table::{Cell, Column, Row, TableConfig, TableState, value_text};
use crate::views::common::{FormActions, TextField, count_cell, load_records, reload_on_change, submit};
use crate::views::credentials::CREDS_QUERY;

pub const TARGET_MODEL: &str = "L8PTarget";
pub const DEFAULT_INVENTORY_TYPE: i32 = 1;
pub const STATE_DOWN: i32 = 1;
pub const STATE_UP: i32 = 2;

pub const PROTOCOLS: [(i32, &str); 9] = [
    (0, "Invalid"),
    (1, "SSH"),
    (2, "SNMPV2"),
    (3, "SNMPV3"),
    (4, "RESTCONF"),
    (5, "NETCONF"),
    (6, "GRPC"),
    (7, "Kubectl"),
    (8, "GraphQL"),
];

pub const INVENTORY_TYPES: [(i32, &str); 8] = [
    (0, "Invalid"),
    (1, "Network Device"),
    (2, "GPUS"),
    (3, "Hosts"),
    (4, "Virtual Machine"),
    (5, "K8s Cluster"),
    (6, "Storage"),
    (7, "Power"),
];

pub const TARGET_STATES: [(i32, &str); 5] = [(0, "Invalid"), (1, "Down"), (2, "Up"), (3, "Maintenance"), (4, "Offline")];

/// Filter text to state enum.
pub const TARGET_STATE_VALUES: [(&str, i64); 5] =
    [("invalid", 0), ("down", 1), ("up", 2), ("maintenance", 3), ("offline", 4)];

const FALLBACK_PORT: u32 = 22;
const DEFAULT_TIMEOUT: &str = "60";
const TARGET_ID_REQUIRED: &str = "Target ID is required";
const DUPLICATE_TARGET: &str = "Target ID already exists";
const HOST_ID_REQUIRED: &str = "Host ID is required";
const DUPLICATE_HOST: &str = "A host with this ID already exists";
const ADDRESS_REQUIRED: &str = "Address is required";
const DUPLICATE_PROTOCOL: &str = "This protocol is already configured";

// =============================================================================
// ENUMS
// =============================================================================

fn enum_name(table: &[(i32, &'static str)], value: i32) -> Option<&'static str> {
    table.iter().find(|(v, _)| *v == value).map(|(_, name)| *name)
}

pub fn protocol_name(protocol: i32) -> &'static str {
    enum_name(&PROTOCOLS, protocol).unwrap_or("Unknown")
}

/// Inventory type name, or `targets` for an unknown type.
pub fn inventory_type_name(inventory_type: i32) -> &'static str {
    enum_name(&INVENTORY_TYPES, inventory_type).unwrap_or("targets")
}

pub fn state_name(state: i32) -> &'static str {
    enum_name(&TARGET_STATES, state).unwrap_or("Unknown")
}

pub fn default_port(protocol: i32) -> u32 {
    match protocol {
        1 => 22,
        2 | 3 => 161,
        4 | 8 => 443,
        5 => 830,
        6 => 50051,
        7 => 6443,
        _ => FALLBACK_PORT,
    }
}

/// Down goes up; every other state goes down.
pub fn toggled_state(state: i32) -> i32 {
    if state == STATE_UP { STATE_DOWN } else { STATE_UP }
}

pub fn base_where(inventory_type: i32) -> String {
    format!("inventoryType={inventory_type}")
}

pub fn empty_message(inventory_type: i32) -> String {
    format!("No {} found. Click \"Add Target\" to create one.", inventory_type_name(inventory_type))
}

// =============================================================================
// ROWS
// =============================================================================

/// Distinct config addresses across all hosts, in first-seen order.
pub fn target_addresses(target: &Target) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for config in target.hosts.values().flat_map(|h| h.configs.values()) {
        if !config.addr.is_empty() && !seen.contains(&config.addr.as_str()) {
            seen.push(&config.addr);
        }
    }
    seen.join(", ")
}

pub fn target_row(target: &Target) -> Row {
    let addresses = target_addresses(target);
    let row = json!({
        "targetId": target.target_id,
        "addresses": if addresses.is_empty() { "-".to_owned() } else { addresses },
        "linksId": if target.links_id.is_empty() { "-" } else { target.links_id.as_str() },
        "hosts": target.hosts.len(),
        "state": target.state,
    });
    match row {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

fn state_cell(value: &Value) -> Cell {
    let up = value.as_i64() == Some(i64::from(STATE_UP));
    let (class, text) = if up { ("l8-tag-up", "Up") } else { ("l8-tag-down", "Down") };
    Cell::Badge { class: class.to_owned(), text: text.to_owned() }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("targetId", "Target ID").filter_key("targetId").sort_key("targetId"),
        Column::new("addresses", "Addresses").sort_key("hosts.configs.addr"),
        Column::new("linksId", "Links ID").filter_key("linksId"),
        Column::new("hosts", "Hosts")
            .format(|value, _| count_cell(value.as_u64().and_then(|n| usize::try_from(n).ok()).unwrap_or(0), "host")),
        Column::new("state", "State")
            .filter_key("state")
            .enum_values(&TARGET_STATE_VALUES)
            .format(|value, _| state_cell(value)),
    ]
}

pub fn table_config(endpoint: String, inventory_type: i32) -> TableConfig {
    TableConfig::new(columns())
        .rows_per_page(20)
        .page_sizes(&[10, 20, 50, 100])
        .empty_message(&empty_message(inventory_type))
        .server(TARGET_MODEL, Some(endpoint))
        .base_where(&base_where(inventory_type))
}

fn decode_page(page: &ListResponse<Value>) -> BTreeMap<String, Target> {
    page.list
        .iter()
        .filter_map(|record| match serde_json::from_value::<Target>(record.clone()) {
            Ok(target) => Some((target.target_id.clone(), target)),
            Err(e) => {
                log::warn!("undecodable target: {e}");
                None
            }
        })
        .collect()
}

fn record_to_row(record: Value) -> Option<Row> {
    serde_json::from_value::<Target>(record).ok().map(|t| target_row(&t))
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Confirmation, payload, and success text for starting (`STATE_UP`) or
/// stopping (`STATE_DOWN`) every target of an inventory type.
pub fn bulk_action(inventory_type: i32, state: i32) -> (ConfirmRequest, TargetAction, String) {
    let type_name = inventory_type_name(inventory_type);
    let starting = state == STATE_UP;
    let (verb, title, done) =
        if starting { ("Start", "Start All Targets", "started") } else { ("Stop", "Stop All Targets", "stopped") };
    let request = ConfirmRequest::new(
        &format!("bulk-action-{state}"),
        title,
        &format!("Are you sure you want to {} all {type_name}?", verb.to_lowercase()),
    )
    .confirm_text(verb);
    let payload = TargetAction { action_type: inventory_type, action_state: state };
    (request, payload, format!("All {type_name} {done} successfully"))
}

/// Copy of `target` with its state flipped; a missing inventory type falls
/// back to the one being viewed.
pub fn toggle_target(target: &Target, viewing: i32) -> Target {
    let inventory_type = if target.inventory_type == 0 { viewing } else { target.inventory_type };
    Target { state: toggled_state(target.state), inventory_type, ..target.clone() }
}

pub fn delete_query(target_id: &str) -> String {
    format!("select * from {TARGET_MODEL} where targetId={target_id}")
}

// =============================================================================
// EDITORS
// =============================================================================

/// Check the target fields and build the record to send.
///
/// # Errors
///
/// Returns the warning to show for a blank id, or a new id already present
/// on the loaded page.
pub fn validate_target(
    target_id: &str,
    links_id: &str,
    state: i32,
    hosts: &[TargetHost],
    inventory_type: i32,
    loaded: &BTreeMap<String, Target>,
    is_new: bool,
) -> Result<Target, &'static str> {
    let target_id = target_id.trim();
    if target_id.is_empty() {
        return Err(TARGET_ID_REQUIRED);
    }
    if is_new && loaded.contains_key(target_id) {
        return Err(DUPLICATE_TARGET);
    }
    Ok(Target {
        target_id: target_id.to_owned(),
        links_id: links_id.trim().to_owned(),
        hosts: hosts.iter().map(|h| (h.host_id.clone(), h.clone())).collect(),
        state,
        inventory_type,
    })
}

/// Add a host or replace the one at `editing`.
///
/// # Errors
///
/// Returns the warning to show for a blank or already used host id.
pub fn upsert_host(
    hosts: &mut Vec<TargetHost>,
    editing: Option<usize>,
    host_id: &str,
    configs: &[HostConfig],
) -> Result<(), &'static str> {
    let host_id = host_id.trim();
    if host_id.is_empty() {
        return Err(HOST_ID_REQUIRED);
    }
    if hosts.iter().enumerate().any(|(i, h)| h.host_id == host_id && Some(i) != editing) {
        return Err(DUPLICATE_HOST);
    }
    let host = TargetHost {
        host_id: host_id.to_owned(),
        configs: configs.iter().map(|c| (c.protocol.to_string(), c.clone())).collect(),
    };
    match editing.and_then(|i| hosts.get_mut(i)) {
        Some(slot) => *slot = host,
        None => hosts.push(host),
    }
    Ok(())
}

/// Fields of the protocol editor, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigForm {
    pub protocol: i32,
    pub addr: String,
    pub port: String,
    pub cred_id: String,
    pub terminal: String,
    pub timeout: String,
}

impl ConfigForm {
    fn from_config(config: &HostConfig) -> Self {
        Self {
            protocol: config.protocol,
            addr: config.addr.clone(),
            port: if config.port == 0 { default_port(config.protocol) } else { config.port }.to_string(),
            cred_id: config.cred_id.clone(),
            terminal: extra_text(config, "terminal"),
            timeout: extra_text(config, "timeout"),
        }
    }

    fn blank() -> Self {
        Self { protocol: 1, port: default_port(1).to_string(), timeout: DEFAULT_TIMEOUT.to_owned(), ..Self::default() }
    }
}

fn extra_text(config: &HostConfig, key: &str) -> String {
    config.extra.get(key).map(value_text).unwrap_or_default()
}

/// Build a protocol config and check it against the host's others.
///
/// An unparsable or zero port falls back to the protocol default.
///
/// # Errors
///
/// Returns the warning to show for a blank address or a protocol that is
/// already configured on the host.
pub fn validate_config(form: &ConfigForm, configs: &[HostConfig], editing: Option<usize>) -> Result<HostConfig, &'static str> {
    let addr = form.addr.trim();
    if addr.is_empty() {
        return Err(ADDRESS_REQUIRED);
    }
    if editing.is_none() && configs.iter().any(|c| c.protocol == form.protocol) {
        return Err(DUPLICATE_PROTOCOL);
    }
    let port = form.port.trim().parse::<u32>().ok().filter(|p| *p > 0).unwrap_or_else(|| default_port(form.protocol));
    let mut extra = serde_json::Map::new();
    extra.insert("terminal".to_owned(), Value::String(form.terminal.trim().to_owned()));
    extra.insert("timeout".to_owned(), Value::String(form.timeout.trim().to_owned()));
    Ok(HostConfig { addr: addr.to_owned(), port, protocol: form.protocol, cred_id: form.cred_id.trim().to_owned(), extra })
}

/// `id (name)` label for the credential picker.
pub fn credential_label(credential: &Credential) -> String {
    if credential.name.is_empty() { credential.id.clone() } else { format!("{} ({})", credential.id, credential.name) }
}

// =============================================================================
// VIEW
// =============================================================================

#[component]
pub fn TargetsView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = StoredValue::new(config.with_untracked(|c| c.api.targets_endpoint()));
    let creds_url = StoredValue::new(config.with_untracked(|c| c.api.creds_endpoint()));
    let inventory_type = RwSignal::new(DEFAULT_INVENTORY_TYPE);
    let state = RwSignal::new(TableState::new(table_config(endpoint.get_value(), DEFAULT_INVENTORY_TYPE)));
    let reload = RwSignal::new(0_u64);
    let loaded = RwSignal::new(BTreeMap::<String, Target>::new());
    let credentials = RwSignal::new(Vec::<Credential>::new());
    let editing = RwSignal::new(None::<Option<Target>>);
    let toasts = use_toasts();
    let confirmer = use_confirmer();

    let refetch = move || reload.update(|n| *n += 1);
    let load_credentials = move || {
        load_records(creds_url.get_value(), CREDS_QUERY, "Failed to fetch credentials", move |list: Vec<Credential>| {
            credentials.set(list);
        });
    };
    load_credentials();
    reload_on_change(DataDomain::Credentials, load_credentials);

    let on_type_change = move |value: String| {
        let Ok(next) = value.parse::<i32>() else {
            return;
        };
        inventory_type.set(next);
        state.update(|s| {
            s.set_empty_message(&empty_message(next));
            s.set_base_where(Some(base_where(next)));
        });
        refetch();
    };

    let bulk = move |target_state: i32| {
        let (request, payload, success) = bulk_action(inventory_type.get_untracked(), target_state);
        confirmer.ask(request, move || {
            let (url, payload) = (endpoint.get_value(), payload.clone());
            submit(
                async move { api::post(&url, &payload, "Failed to update targets state").await },
                success.clone(),
                DataDomain::Targets,
                refetch,
            );
        });
    };

    let on_toggle = Callback::new(move |id: String| {
        let Some(target) = loaded.with_untracked(|t| t.get(&id).cloned()) else {
            return;
        };
        let next = toggle_target(&target, inventory_type.get_untracked());
        let verb = if next.state == STATE_UP { "started" } else { "stopped" };
        let url = endpoint.get_value();
        submit(
            async move { api::save(&url, &next, false, "Failed to toggle state").await },
            format!("Target {verb} successfully"),
            DataDomain::Targets,
            refetch,
        );
    });
    let on_edit = Callback::new(move |id: String| match loaded.with_untracked(|t| t.get(&id).cloned()) {
        Some(target) => editing.set(Some(Some(target))),
        None => toasts.warning(&format!("Target {id} is no longer loaded")),
    });
    let on_delete = Callback::new(move |id: String| {
        let request = ConfirmRequest::danger(
            &format!("delete-target-{id}"),
            "Delete Target",
            &format!("Are you sure you want to delete target \"{id}\"?"),
        );
        confirmer.ask(request, move || {
            let (url, text) = (endpoint.get_value(), delete_query(&id));
            submit(
                async move { api::delete_by_query(&url, &text, "Failed to delete target").await },
                "Target deleted successfully".to_owned(),
                DataDomain::Targets,
                refetch,
            );
        });
    });

    let actions = RowActions {
        on_edit: Some(on_edit),
        on_delete: Some(on_delete),
        on_toggle: Some(on_toggle),
        is_running: Some(Callback::new(|row: Row| row.get("state").and_then(Value::as_i64) == Some(i64::from(STATE_UP)))),
    };

    let type_options = INVENTORY_TYPES
        .iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, label)| view! { <option value=value.to_string() selected={*value == DEFAULT_INVENTORY_TYPE}>{*label}</option> })
        .collect_view();

    view! {
        <div class="targets-view">
            <div class="targets-toolbar">
                <label class="inventory-type-filter">
                    "Inventory Type "
                    <select on:change=move |ev| on_type_change(event_target_value(&ev))>{type_options}</select>
                </label>
                <button type="button" class="btn btn-success" on:click=move |_| bulk(STATE_UP)>"Start All"</button>
                <button type="button" class="btn btn-danger" on:click=move |_| bulk(STATE_DOWN)>"Stop All"</button>
            </div>
            <DataTable
                state=state
                reload=reload
                transform=Callback::new(record_to_row)
                on_loaded=Callback::new(move |page: ListResponse<Value>| loaded.set(decode_page(&page)))
                actions=actions
                on_add=Callback::new(move |()| editing.set(Some(None)))
                add_label="Add Target"
            />
            {move || editing.get().map(|original| view! {
                <TargetEditor
                    original=original
                    inventory_type=inventory_type.get_untracked()
                    loaded=loaded
                    credentials=credentials
                    endpoint=endpoint
                    on_close=Callback::new(move |()| editing.set(None))
                    on_saved=Callback::new(move |()| {
                        editing.set(None);
                        refetch();
                    })
                />
            })}
        </div>
    }
}

#[component]
fn TargetEditor(
    original: Option<Target>,
    inventory_type: i32,
    loaded: RwSignal<BTreeMap<String, Target>>,
    credentials: RwSignal<Vec<Credential>>,
    endpoint: StoredValue<String>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let is_new = original.is_none();
    let source = original.unwrap_or(Target { state: STATE_DOWN, ..Target::default() });
    let save_type = if source.inventory_type == 0 { inventory_type } else { source.inventory_type };
    let target_id = RwSignal::new(source.target_id.clone());
    let links_id = RwSignal::new(source.links_id.clone());
    let initial_state = source.state;
    let target_state = RwSignal::new(initial_state);
    let hosts = RwSignal::new(source.hosts.into_values().collect::<Vec<_>>());
    // `Some(None)` adds a host, `Some(Some(i))` edits host `i`.
    let host_edit = RwSignal::new(None::<Option<usize>>);

    let save = Callback::new(move |()| {
        let checked = loaded.with_untracked(|l| {
            hosts.with_untracked(|h| {
                validate_target(&target_id.get_untracked(), &links_id.get_untracked(), target_state.get_untracked(), h, save_type, l, is_new)
            })
        });
        let target = match checked {
            Ok(target) => target,
            Err(warning) => return toasts.warning(warning),
        };
        let url = endpoint.get_value();
        submit(
            async move { api::save(&url, &target, is_new, "Failed to save target").await },
            "Target saved successfully".to_owned(),
            DataDomain::Targets,
            move || on_saved.run(()),
        );
    });

    let host_rows = move || {
        let list = hosts.get();
        if list.is_empty() {
            return view! {
                <tr><td colspan="3" class="empty-nested-table">"No hosts configured. Click \"+ Add Host\" to add one."</td></tr>
            }
            .into_any();
        }
        list.into_iter()
            .enumerate()
            .map(|(index, host)| {
                let protocols = host.configs.len();
                let label = if protocols == 1 { "1 protocol".to_owned() } else { format!("{protocols} protocols") };
                view! {
                    <tr>
                        <td>{host.host_id}</td>
                        <td><span class="tag">{label}</span></td>
                        <td class="action-btns">
                            <button type="button" class="btn btn-small" on:click=move |_| host_edit.set(Some(Some(index)))>"Edit"</button>
                            <button type="button" class="btn btn-danger btn-small" on:click=move |_| {
                                hosts.update(|h| {
                                    if index < h.len() {
                                        h.remove(index);
                                    }
                                });
                            }>"Delete"</button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    let state_options = TARGET_STATES
        .iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, label)| view! { <option value=value.to_string() selected={*value == initial_state}>{*label}</option> })
        .collect_view();

    let title = if is_new { "Add Target" } else { "Edit Target" };
    view! {
        <Modal id="target-modal" title=title.to_owned() size=ModalSize::Large on_close=on_close>
            <div class="form-row">
                <TextField label="Target ID" value=target_id disabled=!is_new/>
                <TextField label="Links ID" value=links_id/>
            </div>
            <div class="form-group">
                <label>"State"</label>
                <select
                    prop:value=move || target_state.get().to_string()
                    on:change=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse() {
                            target_state.set(v);
                        }
                    }
                >
                    {state_options}
                </select>
            </div>
            <div class="form-group">
                <label>"Hosts"</label>
                <div class="nested-table-container">
                    <div class="nested-table-header">
                        <span>"Configured Hosts"</span>
                        <button type="button" class="btn btn-small" on:click=move |_| host_edit.set(Some(None))>"+ Add Host"</button>
                    </div>
                    <table class="nested-items-table">
                        <thead><tr><th>"Host ID"</th><th>"Protocols"</th><th>"Actions"</th></tr></thead>
                        <tbody>{host_rows}</tbody>
                    </table>
                </div>
            </div>
            <FormActions on_cancel=on_close on_save=save/>
            {move || host_edit.get().map(|editing| view! {
                <HostEditor
                    editing=editing
                    hosts=hosts
                    credentials=credentials
                    on_close=Callback::new(move |()| host_edit.set(None))
                />
            })}
        </Modal>
    }
}

#[component]
fn HostEditor(
    editing: Option<usize>,
    hosts: RwSignal<Vec<TargetHost>>,
    credentials: RwSignal<Vec<Credential>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let source = editing.and_then(|i| hosts.with_untracked(|h| h.get(i).cloned()));
    let is_new = source.is_none();
    let source = source.unwrap_or_default();
    let host_id = RwSignal::new(source.host_id);
    let configs = RwSignal::new(source.configs.into_values().collect::<Vec<_>>());
    let config_edit = RwSignal::new(None::<Option<usize>>);

    let save = Callback::new(move |()| {
        let mut next = hosts.get_untracked();
        let result = configs.with_untracked(|c| upsert_host(&mut next, editing, &host_id.get_untracked(), c));
        match result {
            Ok(()) => {
                hosts.set(next);
                on_close.run(());
            }
            Err(warning) => toasts.warning(warning),
        }
    });

    let config_rows = move || {
        let list = configs.get();
        if list.is_empty() {
            return view! {
                <tr><td colspan="5" class="empty-nested-table">"No protocols configured. Click \"+ Add Protocol\" to add one."</td></tr>
            }
            .into_any();
        }
        list.into_iter()
            .enumerate()
            .map(|(index, config)| {
                let port = if config.port == 0 { "-".to_owned() } else { config.port.to_string() };
                let cred = if config.cred_id.is_empty() { "-".to_owned() } else { config.cred_id.clone() };
                view! {
                    <tr>
                        <td>{protocol_name(config.protocol)}</td>
                        <td>{config.addr.clone()}</td>
                        <td>{port}</td>
                        <td>{cred}</td>
                        <td class="action-btns">
                            <button type="button" class="btn btn-small" on:click=move |_| config_edit.set(Some(Some(index)))>"Edit"</button>
                            <button type="button" class="btn btn-danger btn-small" on:click=move |_| {
                                configs.update(|c| {
                                    if index < c.len() {
                                        c.remove(index);
                                    }
                                });
                            }>"Delete"</button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    let title = if is_new { "Add Host" } else { "Edit Host" };
    view! {
        <Modal id="host-modal" title=title.to_owned() size=ModalSize::Large on_close=on_close>
            <TextField label="Host ID" value=host_id disabled=!is_new placeholder="e.g., router1, switch-core"/>
            <div class="form-group">
                <label>"Protocol Configurations"</label>
                <div class="nested-table-container">
                    <div class="nested-table-header">
                        <span>"Protocols"</span>
                        <button type="button" class="btn btn-small" on:click=move |_| config_edit.set(Some(None))>"+ Add Protocol"</button>
                    </div>
                    <table class="nested-items-table">
                        <thead>
                            <tr><th>"Protocol"</th><th>"Address"</th><th>"Port"</th><th>"Credential"</th><th>"Actions"</th></tr>
                        </thead>
                        <tbody>{config_rows}</tbody>
                    </table>
                </div>
            </div>
            <FormActions on_cancel=on_close on_save=save save_label="Save Host"/>
            {move || config_edit.get().map(|editing| view! {
                <ConfigEditor
                    editing=editing
                    configs=configs
                    credentials=credentials
                    on_close=Callback::new(move |()| config_edit.set(None))
                />
            })}
        </Modal>
    }
}

#[component]
fn ConfigEditor(
    editing: Option<usize>,
    configs: RwSignal<Vec<HostConfig>>,
    credentials: RwSignal<Vec<Credential>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let form = editing
        .and_then(|i| configs.with_untracked(|c| c.get(i).map(ConfigForm::from_config)))
        .unwrap_or_else(ConfigForm::blank);
    let is_new = editing.is_none();
    let protocol = RwSignal::new(form.protocol);
    let addr = RwSignal::new(form.addr);
    let port = RwSignal::new(form.port);
    let cred_id = RwSignal::new(form.cred_id);
    let terminal = RwSignal::new(form.terminal);
    let timeout = RwSignal::new(form.timeout);

    let save = Callback::new(move |()| {
        let form = ConfigForm {
            protocol: protocol.get_untracked(),
            addr: addr.get_untracked(),
            port: port.get_untracked(),
            cred_id: cred_id.get_untracked(),
            terminal: terminal.get_untracked(),
            timeout: timeout.get_untracked(),
        };
        let checked = configs.with_untracked(|c| validate_config(&form, c, editing));
        match checked {
            Ok(config) => {
                configs.update(|c| match editing.and_then(|i| c.get_mut(i)) {
                    Some(slot) => *slot = config,
                    None => c.push(config),
                });
                on_close.run(());
            }
            Err(warning) => toasts.warning(warning),
        }
    });

    let protocol_options = PROTOCOLS
        .iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, label)| view! { <option value=value.to_string() selected={*value == form.protocol}>{*label}</option> })
        .collect_view();
    let credential_options = move || {
        credentials
            .get()
            .into_iter()
            .map(|c| {
                let id = c.id.clone();
                view! { <option value=c.id.clone() selected=move || cred_id.with(|v| *v == id)>{credential_label(&c)}</option> }
            })
            .collect_view()
    };

    let title = if is_new { "Add Protocol" } else { "Edit Protocol" };
    view! {
        <Modal id="config-modal" title=title.to_owned() size=ModalSize::Medium on_close=on_close>
            <div class="form-group">
                <label>"Protocol"</label>
                <select
                    prop:value=move || protocol.get().to_string()
                    on:change=move |ev| {
                        if let Ok(p) = event_target_value(&ev).parse::<i32>() {
                            protocol.set(p);
                            port.set(default_port(p).to_string());
                        }
                    }
                >
                    {protocol_options}
                </select>
            </div>
            <div class="form-row">
                <TextField label="Address" value=addr placeholder="e.g., 192.168.1.1"/>
                <TextField label="Port" value=port input_type="number"/>
            </div>
            <div class="form-group">
                <label>"Credential ID"</label>
                <select prop:value=move || cred_id.get() on:change=move |ev| cred_id.set(event_target_value(&ev))>
                    <option value="">"-- Select Credential --"</option>
                    {credential_options}
                </select>
            </div>
            <div class="form-row">
                <TextField label="Terminal" value=terminal placeholder="e.g., vt100"/>
                <TextField label="Timeout (seconds)" value=timeout placeholder="e.g., 60"/>
            </div>
            <FormActions on_cancel=on_close on_save=save save_label="Save Protocol"/>
        </Modal>
    }
}
