//! Network device inventory: server-paged table plus a device detail dialog.
//!
//! Device status and type arrive either as protobuf enum numbers or as
//! `DEVICE_STATUS_*` / `DEVICE_TYPE_*` names; both map to the same display
//! text, and the filter row maps display text back to enum numbers.

#[cfg(test)]
#[path = "network_devices_test.rs"]
mod network_devices_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::data_table::DataTable;
use crate::components::detail::{DetailRow, DetailSection};
use crate::components::modal::Modal;
use crate::components::tab_strip::{Tab, TabStrip};
use crate::net::query::ListResponse;
use crate::net::types::NetworkDevice;
use crate::state::config::ConsoleConfig;
use crate::state::modal::ModalSize;
use crate::state::table::{Column, Row, TableConfig, TableState, lookup, status_class, value_text};
use crate::util::format::format_uptime;

pub const DEVICE_MODEL: &str = "NetworkDevice";
const HERO_SUBTITLE_SELECTOR: &str = ".network-hero .hero-subtitle";

/// Display name to enum number, in filter match order.
pub const DEVICE_STATUS_VALUES: [(&str, i64); 7] = [
    ("online", 1),
    ("offline", 2),
    ("warning", 3),
    ("critical", 4),
    ("maintenance", 5),
    ("partial", 6),
    ("unknown", 0),
];

pub const DEVICE_TYPE_VALUES: [(&str, i64); 6] =
    [("router", 1), ("switch", 2), ("firewall", 3), ("server", 4), ("access point", 5), ("unknown", 0)];

// =============================================================================
// ROW MAPPING
// =============================================================================

/// Lowercase status text for a numeric or named device status.
pub fn device_status_name(status: &Value) -> &'static str {
    match enum_code(status, "DEVICE_STATUS_") {
        EnumCode::Number(1) => "online",
        EnumCode::Number(2) => "offline",
        EnumCode::Number(3) => "warning",
        EnumCode::Number(4) => "critical",
        EnumCode::Number(5) => "maintenance",
        EnumCode::Number(6) => "partial",
        EnumCode::Name(name) => match name.as_str() {
            "ONLINE" => "online",
            "OFFLINE" => "offline",
            "WARNING" => "warning",
            "CRITICAL" => "critical",
            "MAINTENANCE" => "maintenance",
            "PARTIAL" => "partial",
            _ => "unknown",
        },
        EnumCode::Number(_) | EnumCode::Missing => "unknown",
    }
}

/// Title-case type text for a numeric or named device type.
pub fn device_type_name(device_type: &Value) -> &'static str {
    match enum_code(device_type, "DEVICE_TYPE_") {
        EnumCode::Number(1) => "Router",
        EnumCode::Number(2) => "Switch",
        EnumCode::Number(3) => "Firewall",
        EnumCode::Number(4 | 6) => "Server",
        EnumCode::Number(5) => "Access Point",
        EnumCode::Name(name) => match name.as_str() {
            "ROUTER" => "Router",
            "SWITCH" => "Switch",
            "FIREWALL" => "Firewall",
            "SERVER" => "Server",
            "ACCESS_POINT" => "Access Point",
            _ => "Unknown",
        },
        EnumCode::Number(_) | EnumCode::Missing => "Unknown",
    }
}

enum EnumCode {
    Number(i64),
    Name(String),
    Missing,
}

fn enum_code(value: &Value, prefix: &str) -> EnumCode {
    match value {
        Value::Number(n) => n.as_i64().map_or(EnumCode::Missing, EnumCode::Number),
        Value::String(s) => match s.parse::<i64>() {
            Ok(n) => EnumCode::Number(n),
            Err(_) => EnumCode::Name(s.strip_prefix(prefix).unwrap_or(s).to_owned()),
        },
        _ => EnumCode::Missing,
    }
}

/// Number of ports reported by the first physical inventory entry.
pub fn interface_count(device: &NetworkDevice) -> usize {
    device
        .physicals
        .get("physical-0")
        .and_then(|p| p.get("ports"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn or_else(primary: &str, fallback: &str) -> String {
    if primary.is_empty() { fallback.to_owned() } else { primary.to_owned() }
}

/// Flatten a device record into the row shown by the table and the dialog.
pub fn device_row(device: &NetworkDevice) -> Row {
    let eq = &device.equipmentinfo;
    let row = json!({
        "id": device.id,
        "name": or_else(&eq.sys_name, &device.id),
        "sysName": eq.sys_name,
        "ipAddress": or_else(&eq.ip_address, &device.id),
        "deviceType": device_type_name(&eq.device_type),
        "location": eq.location,
        "status": device_status_name(&eq.device_status),
        "uptime": format_uptime(eq.uptime),
        "model": or_else(&eq.model, &eq.hardware),
        "vendor": eq.vendor,
        "series": eq.series,
        "family": eq.family,
        "software": eq.software,
        "serialNumber": eq.serial_number,
        "firmware": eq.version,
        "hardware": eq.hardware,
        "sysOid": eq.sys_oid,
        "interfaces": interface_count(device),
        "physicals": device.physicals,
    });
    match row {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

/// Row for a raw backend record; undecodable records keep their id only.
pub fn record_to_row(record: Value) -> Row {
    match serde_json::from_value::<NetworkDevice>(record.clone()) {
        Ok(device) => device_row(&device),
        Err(e) => {
            log::warn!("undecodable network device: {e}");
            let mut row = Row::new();
            row.insert("id".to_owned(), record.get("id").cloned().unwrap_or(Value::Null));
            row
        }
    }
}

/// `Real-time monitoring • N Active Devices • P% Uptime`.
#[allow(clippy::cast_precision_loss)]
pub fn hero_subtitle(counts: &BTreeMap<String, u64>) -> String {
    let total = counts.get("Total").copied().unwrap_or(0);
    let online = counts.get("Online").copied().unwrap_or(0);
    let uptime = if total > 0 { format!("{:.2}", online as f64 / total as f64 * 100.0) } else { "0".to_owned() };
    format!("Real-time monitoring • {online} Active Devices • {uptime}% Uptime")
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Device Name").filter_key("equipmentinfo.sysName").sort_key("equipmentinfo.sysName"),
        Column::new("ipAddress", "IP Address").filter_key("equipmentinfo.ipAddress").sort_key("equipmentinfo.ipAddress"),
        Column::new("deviceType", "Type")
            .filter_key("equipmentinfo.deviceType")
            .sort_key("equipmentinfo.deviceType")
            .enum_values(&DEVICE_TYPE_VALUES),
        Column::new("location", "Location").filter_key("equipmentinfo.location").sort_key("equipmentinfo.location"),
        Column::new("status", "Status")
            .filter_key("equipmentinfo.deviceStatus")
            .sort_key("equipmentinfo.deviceStatus")
            .enum_values(&DEVICE_STATUS_VALUES),
        Column::new("uptime", "Uptime").filter_key("equipmentinfo.uptime").sort_key("equipmentinfo.uptime"),
    ]
}

pub fn table_config(endpoint: String) -> TableConfig {
    TableConfig::new(columns()).status_column("status").server(DEVICE_MODEL, Some(endpoint))
}

// =============================================================================
// VIEW
// =============================================================================

#[component]
pub fn NetworkDevicesView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = config.with_untracked(|c| c.api.devices_endpoint());
    let state = RwSignal::new(TableState::new(table_config(endpoint)));
    let selected = RwSignal::new(None::<Row>);

    let on_loaded = Callback::new(move |page: ListResponse<Value>| {
        if let Some(counts) = page.counts() {
            set_hero_subtitle(&hero_subtitle(counts));
        }
    });

    view! {
        <div class="network-devices-view">
            <DataTable
                state=state
                transform=Callback::new(|record: Value| Some(record_to_row(record)))
                on_loaded=on_loaded
                on_row_click=Callback::new(move |row: Row| selected.set(Some(row)))
            />
            {move || selected.get().map(|row| view! {
                <DeviceDetail row=row on_close=Callback::new(move |()| selected.set(None))/>
            })}
        </div>
    }
}

fn set_hero_subtitle(text: &str) {
    #[cfg(feature = "hydrate")]
    {
        let subtitle = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(HERO_SUBTITLE_SELECTOR).ok().flatten());
        if let Some(el) = subtitle {
            el.set_text_content(Some(text));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (text, HERO_SUBTITLE_SELECTOR);
    }
}

const IDENTITY_FIELDS: [(&str, &str); 4] =
    [("Device Name", "name"), ("System Name", "sysName"), ("IP Address", "ipAddress"), ("Device Type", "deviceType")];
const CONNECTIVITY_FIELDS: [(&str, &str); 3] = [("Location", "location"), ("Uptime", "uptime"), ("Interfaces", "interfaces")];
const HARDWARE_FIELDS: [(&str, &str); 5] =
    [("Vendor", "vendor"), ("Model", "model"), ("Series", "series"), ("Family", "family"), ("Serial Number", "serialNumber")];
const SOFTWARE_FIELDS: [(&str, &str); 4] =
    [("Software", "software"), ("Firmware Version", "firmware"), ("Hardware", "hardware"), ("System OID", "sysOid")];

/// Label and display text for each `(label, key)`; missing keys are blank.
pub fn detail_fields(row: &Row, fields: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    fields
        .iter()
        .map(|(label, key)| (*label, lookup(row, key).map(value_text).unwrap_or_default()))
        .collect()
}

fn field_rows(fields: Vec<(&'static str, String)>) -> impl IntoView {
    fields.into_iter().map(|(label, value)| view! { <DetailRow label=label value=value/> }).collect_view()
}

#[component]
fn DeviceDetail(row: Row, on_close: Callback<()>) -> impl IntoView {
    let tab = RwSignal::new("overview".to_owned());
    let name = lookup(&row, "name").map(value_text).unwrap_or_default();
    let title = format!("Device Details - {name}");
    let status = lookup(&row, "status").map(value_text).unwrap_or_default();
    let status_badge = format!("status-badge {}", status_class(&status));
    let identity = detail_fields(&row, &IDENTITY_FIELDS);
    let connectivity = detail_fields(&row, &CONNECTIVITY_FIELDS);
    let hardware = detail_fields(&row, &HARDWARE_FIELDS);
    let software = detail_fields(&row, &SOFTWARE_FIELDS);
    let physicals = lookup(&row, "physicals")
        .and_then(Value::as_object)
        .map(|map| map.iter().map(|(k, v)| (k.clone(), serde_json::to_string_pretty(v).unwrap_or_default())).collect::<Vec<_>>())
        .unwrap_or_default();

    let overview = view! {
        <DetailSection title="Device Information">
            {field_rows(identity)}
            <DetailRow label="Status" value=status value_class=status_badge/>
        </DetailSection>
        <DetailSection title="Location & Connectivity">
            {field_rows(connectivity)}
        </DetailSection>
    };
    let equipment = view! {
        <DetailSection title="Hardware">
            {field_rows(hardware)}
        </DetailSection>
        <DetailSection title="Software">
            {field_rows(software)}
        </DetailSection>
    };
    let physical = if physicals.is_empty() {
        view! { <p class="detail-empty">"No physical inventory reported."</p> }.into_any()
    } else {
        physicals
            .into_iter()
            .map(|(key, body)| view! {
                <DetailSection title=key>
                    <pre class="detail-json">{body}</pre>
                </DetailSection>
            })
            .collect_view()
            .into_any()
    };

    view! {
        <Modal id="device-detail" title=title size=ModalSize::Large on_close=on_close>
            <TabStrip
                tabs=vec![
                    Tab::new("overview", "Overview"),
                    Tab::new("equipment", "Equipment"),
                    Tab::new("physical", "Physical Inventory"),
                ]
                active=tab
            />
            <div class="probler-popup-tab-pane" class:active=move || tab.with(|t| t == "overview")>{overview}</div>
            <div class="probler-popup-tab-pane" class:active=move || tab.with(|t| t == "equipment")>{equipment}</div>
            <div class="probler-popup-tab-pane" class:active=move || tab.with(|t| t == "physical")>{physical}</div>
        </Modal>
    }
}
