use super::*;

use crate::state::table::TableState;

fn device(json: Value) -> NetworkDevice {
    serde_json::from_value(json).unwrap()
}

// =============================================================================
// ENUM MAPPING
// =============================================================================

#[test]
fn status_accepts_numbers_and_names() {
    assert_eq!(device_status_name(&json!(1)), "online");
    assert_eq!(device_status_name(&json!("DEVICE_STATUS_CRITICAL")), "critical");
    assert_eq!(device_status_name(&json!("5")), "maintenance");
    assert_eq!(device_status_name(&json!(42)), "unknown");
    assert_eq!(device_status_name(&Value::Null), "unknown");
}

#[test]
fn type_six_is_a_server() {
    assert_eq!(device_type_name(&json!(6)), "Server");
    assert_eq!(device_type_name(&json!("DEVICE_TYPE_ACCESS_POINT")), "Access Point");
    assert_eq!(device_type_name(&json!(0)), "Unknown");
}

// =============================================================================
// ROWS
// =============================================================================

#[test]
fn row_falls_back_to_id_for_name_and_address() {
    let row = device_row(&device(json!({ "id": "10.0.0.1", "equipmentinfo": { "deviceStatus": 2, "uptime": "0" } })));
    assert_eq!(row["name"], "10.0.0.1");
    assert_eq!(row["ipAddress"], "10.0.0.1");
    assert_eq!(row["status"], "offline");
    assert_eq!(row["uptime"], "0m");
}

#[test]
fn row_formats_uptime_and_counts_ports() {
    let row = device_row(&device(json!({
        "id": "d1",
        "equipmentinfo": { "sysName": "core-1", "uptime": 8_640_000, "hardware": "ASR" },
        "physicals": { "physical-0": { "ports": [{}, {}, {}] } }
    })));
    assert_eq!(row["name"], "core-1");
    assert_eq!(row["uptime"], "1d 0h 0m");
    assert_eq!(row["model"], "ASR");
    assert_eq!(row["interfaces"], 3);
}

#[test]
fn undecodable_record_keeps_its_id() {
    let row = record_to_row(json!({ "id": "x", "equipmentinfo": "broken" }));
    assert_eq!(row.get("id"), Some(&json!("x")));
    assert!(!row.contains_key("name"));
}

// =============================================================================
// HERO & QUERY
// =============================================================================

#[test]
fn hero_subtitle_reports_uptime_share() {
    let counts = BTreeMap::from([("Total".to_owned(), 8), ("Online".to_owned(), 6)]);
    assert_eq!(hero_subtitle(&counts), "Real-time monitoring • 6 Active Devices • 75.00% Uptime");
    assert_eq!(hero_subtitle(&BTreeMap::new()), "Real-time monitoring • 0 Active Devices • 0% Uptime");
}

#[test]
fn status_filter_maps_to_enum_number() {
    let mut state = TableState::new(table_config("/probler/0/NCache".to_owned()));
    state.set_filter("status", "off");
    let query = state.query().unwrap();
    assert_eq!(query.text, "select * from NetworkDevice where equipmentinfo.deviceStatus=2 limit 15 page 0");
    assert!(query.invalid_filters.is_empty());
}

#[test]
fn unknown_type_filter_is_reported() {
    let mut state = TableState::new(table_config("/probler/0/NCache".to_owned()));
    state.set_filter("deviceType", "mainframe");
    state.set_filter("name", "core");
    let query = state.query().unwrap();
    assert_eq!(query.text, "select * from NetworkDevice where equipmentinfo.sysName=core* limit 15 page 0");
    assert_eq!(query.invalid_filters, vec!["deviceType".to_owned()]);
}

#[test]
fn detail_fields_are_owned_and_blank_when_missing() {
    let row = device_row(&device(json!({ "id": "d1", "equipmentinfo": { "sysName": "edge-7" } })));
    let fields = detail_fields(&row, &[("Device Name", "name"), ("Serial", "serialNumber")]);
    drop(row);
    assert_eq!(fields, vec![("Device Name", "edge-7".to_owned()), ("Serial", String::new())]);
}
