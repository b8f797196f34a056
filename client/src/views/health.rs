//! Service health: server-paged `L8Health` table with a detail dialog.
//!
//! Records without stats are dropped from the table. Each row keeps the raw
//! record under `raw` so the dialog can show the unformatted counters.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::data_table::DataTable;
use crate::components::detail::{DetailRow, DetailSection};
use crate::components::modal::Modal;
use crate::components::tab_strip::{Tab, TabStrip};
use crate::net::types::HealthRecord;
use crate::state::config::ConsoleConfig;
use crate::state::modal::ModalSize;
use crate::state::table::{Column, Row, TableConfig, TableState, lookup, value_text};
use crate::util::format::{format_bytes, format_cpu, format_elapsed, format_local_time, format_thousands, now_ms};

pub const HEALTH_MODEL: &str = "L8Health";
const UNKNOWN_SERVICE: &str = "Unknown";

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("service", "Service").filter_key("alias").sort_key("alias"),
        Column::new("rx", "RX").filter_key("stats.rxMsgCount").sort_key("stats.rxMsgCount"),
        Column::new("rxData", "RX Data").filter_key("stats.rxDataCont").sort_key("stats.rxDataCont"),
        Column::new("tx", "TX").filter_key("stats.txMsgCount").sort_key("stats.txMsgCount"),
        Column::new("txData", "TX Data").filter_key("stats.txDataCount").sort_key("stats.txDataCount"),
        Column::new("memory", "Memory").filter_key("stats.memoryUsage").sort_key("stats.memoryUsage"),
        Column::new("cpuPercent", "CPU %").filter_key("stats.cpuUsage").sort_key("stats.cpuUsage"),
        Column::new("upTime", "Up Time").filter_key("startTime").sort_key("startTime"),
        Column::new("lastPulse", "Last Pulse").filter_key("stats.lastMsgTime").sort_key("stats.lastMsgTime"),
    ]
}

pub fn table_config(endpoint: String) -> TableConfig {
    TableConfig::new(columns()).server(HEALTH_MODEL, Some(endpoint))
}

/// Table row for a health record at wall clock `now_ms`; `None` without stats.
pub fn health_row(record: &HealthRecord, now_ms: i64) -> Option<Row> {
    let stats = record.stats.as_ref()?;
    let service = if record.alias.is_empty() { UNKNOWN_SERVICE } else { record.alias.as_str() };
    let row = json!({
        "service": service,
        "rx": stats.rx_msg_count,
        "rxData": format_bytes(stats.rx_data_cont),
        "tx": stats.tx_msg_count,
        "txData": format_bytes(stats.tx_data_count),
        "memory": format_bytes(stats.memory_usage),
        "cpuPercent": format_cpu(stats.cpu_usage),
        "upTime": format_elapsed(record.start_time, now_ms),
        "lastPulse": format_elapsed(stats.last_msg_time, now_ms),
        "raw": record,
    });
    match row {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn record_to_row(record: Value) -> Option<Row> {
    match serde_json::from_value::<HealthRecord>(record) {
        Ok(record) => health_row(&record, now_ms()),
        Err(e) => {
            log::warn!("undecodable health record: {e}");
            None
        }
    }
}

/// `(service, "Areas: a, b")` for each registered service; areas flagged
/// false are left out.
pub fn service_areas(record: &HealthRecord) -> Vec<(String, String)> {
    let Some(services) = &record.services else {
        return Vec::new();
    };
    services
        .service_to_areas
        .iter()
        .map(|(name, areas)| {
            let list: Vec<&str> = areas.areas.iter().filter(|(_, on)| **on).map(|(a, _)| a.as_str()).collect();
            let text = if list.is_empty() { "None".to_owned() } else { list.join(", ") };
            (name.clone(), format!("Areas: {text}"))
        })
        .collect()
}

#[component]
pub fn HealthView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = config.with_untracked(|c| c.api.health_endpoint());
    let state = RwSignal::new(TableState::new(table_config(endpoint)));
    let selected = RwSignal::new(None::<Row>);

    view! {
        <div class="health-view">
            <DataTable
                state=state
                transform=Callback::new(record_to_row)
                on_row_click=Callback::new(move |row: Row| selected.set(Some(row)))
            />
            {move || selected.get().map(|row| view! {
                <HealthDetail row=row on_close=Callback::new(move |()| selected.set(None))/>
            })}
        </div>
    }
}

#[component]
fn HealthDetail(row: Row, on_close: Callback<()>) -> impl IntoView {
    let tab = RwSignal::new("overview".to_owned());
    let text = |key: &str| lookup(&row, key).map(value_text).unwrap_or_default();
    let record: HealthRecord =
        row.get("raw").and_then(|raw| serde_json::from_value(raw.clone()).ok()).unwrap_or_default();
    let stats = record.stats.clone().unwrap_or_default();
    let service = text("service");
    let title = format!("Service Health - {service}");
    let up_time = text("upTime");
    let (memory, memory_formatted) = (text("memory"), text("memory"));
    let (cpu, cpu_percent) = (text("cpuPercent"), text("cpuPercent"));
    let (last_pulse, since_last_msg) = (text("lastPulse"), text("lastPulse"));
    let (rx_data, tx_data) = (text("rxData"), text("txData"));
    let alias = if record.alias.is_empty() { "N/A".to_owned() } else { record.alias.clone() };
    let data = record.data.clone().filter(|d| !d.is_empty()).unwrap_or_else(|| "N/A".to_owned());

    let services = service_areas(&record);
    let services_view = if services.is_empty() {
        view! { <div class="detail-row"><span class="detail-label">"No services available"</span></div> }.into_any()
    } else {
        services.into_iter().map(|(name, areas)| view! { <DetailRow label=name value=areas/> }).collect_view().into_any()
    };

    let pane = move |key: &'static str| move || tab.with(|t| t == key);

    view! {
        <Modal id="health-detail" title=title size=ModalSize::Large on_close=on_close>
            <TabStrip
                tabs=vec![
                    Tab::new("overview", "Overview"),
                    Tab::new("network", "Network"),
                    Tab::new("resources", "Resources"),
                    Tab::new("services", "Services"),
                ]
                active=tab
            />
            <div class="probler-popup-tab-pane" class:active=pane("overview")>
                <DetailSection title="Service Information">
                    <DetailRow label="Service Name" value=service/>
                    <DetailRow label="Alias" value=alias/>
                    <DetailRow label="Start Time" value=format_local_time(record.start_time)/>
                    <DetailRow label="Up Time" value=up_time/>
                </DetailSection>
                <DetailSection title="Quick Stats">
                    <DetailRow label="Memory Usage" value=memory/>
                    <DetailRow label="CPU Usage" value=cpu/>
                    <DetailRow label="Last Pulse" value=last_pulse/>
                </DetailSection>
            </div>
            <div class="probler-popup-tab-pane" class:active=pane("network")>
                <DetailSection title="Receive Statistics">
                    <DetailRow label="RX Messages" value=format_thousands(stats.rx_msg_count)/>
                    <DetailRow label="RX Data" value=rx_data/>
                    <DetailRow label="RX Data (bytes)" value=format_thousands(stats.rx_data_cont)/>
                </DetailSection>
                <DetailSection title="Transmit Statistics">
                    <DetailRow label="TX Messages" value=format_thousands(stats.tx_msg_count)/>
                    <DetailRow label="TX Data" value=tx_data/>
                    <DetailRow label="TX Data (bytes)" value=format_thousands(stats.tx_data_count)/>
                </DetailSection>
                <DetailSection title="Message Timing">
                    <DetailRow label="Last Message" value=format_local_time(stats.last_msg_time)/>
                    <DetailRow label="Time Since Last Msg" value=since_last_msg/>
                </DetailSection>
            </div>
            <div class="probler-popup-tab-pane" class:active=pane("resources")>
                <DetailSection title="Memory Usage">
                    <DetailRow label="Formatted" value=memory_formatted/>
                    <DetailRow label="Raw (bytes)" value=format_thousands(stats.memory_usage)/>
                </DetailSection>
                <DetailSection title="CPU Usage">
                    <DetailRow label="Percentage" value=cpu_percent/>
                    <DetailRow label="Raw Value" value=stats.cpu_usage.to_string()/>
                </DetailSection>
                <DetailSection title="Additional Details">
                    <DetailRow label="Data Object" value=data/>
                </DetailSection>
            </div>
            <div class="probler-popup-tab-pane" class:active=pane("services")>
                <DetailSection title="Registered Services">{services_view}</DetailSection>
            </div>
        </Modal>
    }
}
