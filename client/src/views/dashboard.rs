//! Dashboard: network device metric card and the active alarms table.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::data_table::DataTable;
use crate::net::query::ListResponse;
use crate::state::config::ConsoleConfig;
use crate::state::table::{Column, Row, TableConfig, TableState};
use crate::util::format::format_thousands;

/// One-row probe whose metadata carries the device counts.
pub const DEVICE_COUNT_QUERY: &str = "select * from NetworkDevice where Id=* limit 1 page 0";

/// Device totals shown on the metric card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceSummary {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
}

impl DeviceSummary {
    pub fn from_counts(counts: &BTreeMap<String, u64>) -> Self {
        let total = counts.get("Total").copied().unwrap_or(0);
        let online = counts.get("Online").copied().unwrap_or(0);
        Self { total, online, offline: total.saturating_sub(online) }
    }
}

/// What the device card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceCard {
    Loading,
    Ready(DeviceSummary),
    Unavailable,
}

impl DeviceCard {
    /// Card state for a finished count probe.
    pub fn from_response<E>(response: Result<ListResponse<Value>, E>) -> Self {
        match response {
            Ok(page) => page.counts().map_or(Self::Unavailable, |c| Self::Ready(DeviceSummary::from_counts(c))),
            Err(_) => Self::Unavailable,
        }
    }

    pub fn value_text(self) -> String {
        match self {
            Self::Ready(summary) => format_thousands(summary.total),
            Self::Loading | Self::Unavailable => "--".to_owned(),
        }
    }
}

const ALARMS: [(&str, &str, &str, &str, &str, &str); 12] = [
    ("2025-10-01 14:32:15", "CRITICAL", "DC1-CORE-SW-01", "Network", "High CPU utilization (98%)", "Dallas DC1 - Rack A12"),
    ("2025-10-01 14:28:42", "CRITICAL", "DC2-GPU-NODE-47", "GPU", "Temperature threshold exceeded (92°C)", "Austin DC2 - Rack B08"),
    ("2025-10-01 14:25:18", "WARNING", "DC1-ESX-HOST-22", "Host", "Memory usage high (87%)", "Dallas DC1 - Rack C15"),
    ("2025-10-01 14:21:05", "CRITICAL", "DC3-STORAGE-ARRAY-3", "Storage", "RAID degraded - Drive failure detected", "Houston DC3 - Rack D04"),
    ("2025-10-01 14:18:33", "WARNING", "DC2-FW-01", "Network", "Bandwidth utilization (85%)", "Austin DC2 - Rack A01"),
    ("2025-10-01 14:15:27", "CRITICAL", "DC1-K8S-MASTER-02", "Kubernetes", "Node unreachable - Connection timeout", "Dallas DC1 - Rack E09"),
    ("2025-10-01 14:12:44", "WARNING", "DC3-UPS-MAIN", "Power", "Battery capacity low (45%)", "Houston DC3 - Power Room"),
    ("2025-10-01 14:09:15", "WARNING", "DC2-HVAC-UNIT-3", "Cooling", "Temperature rising (28°C)", "Austin DC2 - HVAC Zone 3"),
    ("2025-10-01 14:05:52", "CRITICAL", "DC1-GPU-NODE-128", "GPU", "GPU process crashed - Restarting", "Dallas DC1 - Rack B22"),
    ("2025-10-01 14:02:31", "WARNING", "DC3-SPINE-SW-02", "Network", "Link flapping detected on port 48", "Houston DC3 - Rack A05"),
    ("2025-10-01 13:58:16", "CRITICAL", "DC2-SAN-SWITCH-01", "Storage", "Fiber channel error rate high", "Austin DC2 - Rack D12"),
    ("2025-10-01 13:51:08", "CRITICAL", "DC3-CORE-RTR-01", "Network", "BGP session down with peer", "Houston DC3 - Rack A02"),
];

/// Sample alarm feed; the backend has no alarm service yet.
pub fn alarm_rows() -> Vec<Row> {
    ALARMS
        .iter()
        .filter_map(|(timestamp, severity, device, kind, message, location)| {
            match json!({
                "timestamp": timestamp,
                "severity": severity,
                "device": device,
                "type": kind,
                "message": message,
                "location": location,
            }) {
                Value::Object(map) => Some(map),
                _ => None,
            }
        })
        .collect()
}

pub fn alarm_table_config() -> TableConfig {
    TableConfig::new(vec![
        Column::new("timestamp", "Timestamp"),
        Column::new("severity", "Severity"),
        Column::new("device", "Device"),
        Column::new("type", "Type"),
        Column::new("message", "Message"),
        Column::new("location", "Location"),
    ])
    .status_column("severity")
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let card = RwSignal::new(DeviceCard::Loading);
    let alarms = RwSignal::new(TableState::new(alarm_table_config()));
    alarms.update(|s| s.set_data(alarm_rows()));

    #[cfg(feature = "hydrate")]
    {
        let endpoint = config.with_untracked(|c| c.api.devices_endpoint());
        leptos::task::spawn_local(async move {
            let response = crate::net::api::fetch_list::<Value>(&endpoint, DEVICE_COUNT_QUERY, "Failed to load device stats").await;
            if let Err(e) = &response {
                log::error!("device stats unavailable: {e}");
            }
            card.set(DeviceCard::from_response(response));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
    }

    let details = move || match card.get() {
        DeviceCard::Ready(summary) => view! {
            <span class="metric-status">
                <span class="status-indicator status-operational"></span>
                <span>{format!("{} Online", format_thousands(summary.online))}</span>
            </span>
            <span class="metric-status">
                <span class="status-indicator status-offline"></span>
                <span>{format!("{} Offline", format_thousands(summary.offline))}</span>
            </span>
        }
        .into_any(),
        DeviceCard::Unavailable => view! { <span class="metric-status unavailable">"Data unavailable"</span> }.into_any(),
        DeviceCard::Loading => view! { <span class="metric-status">"Loading…"</span> }.into_any(),
    };

    view! {
        <div class="dashboard-view">
            <div class="metric-cards">
                <div class="metric-card">
                    <div class="metric-card-title">"Network Devices"</div>
                    <div class="metric-card-value">{move || card.get().value_text()}</div>
                    <div class="metric-card-details">{details}</div>
                </div>
            </div>
            <div class="dashboard-section">
                <h3 class="dashboard-section-title">"Active Alarms"</h3>
                <DataTable state=alarms/>
            </div>
        </div>
    }
}
