use super::*;

use crate::net::fetch::ApiError;

fn page(json: Value) -> ListResponse<Value> {
    serde_json::from_value(json).unwrap()
}

#[test]
fn summary_derives_offline_from_total() {
    let counts = BTreeMap::from([("Total".to_owned(), 1_250), ("Online".to_owned(), 1_200)]);
    assert_eq!(DeviceSummary::from_counts(&counts), DeviceSummary { total: 1_250, online: 1_200, offline: 50 });
}

#[test]
fn summary_never_underflows() {
    let counts = BTreeMap::from([("Online".to_owned(), 3)]);
    assert_eq!(DeviceSummary::from_counts(&counts).offline, 0);
}

#[test]
fn card_reads_counts_from_metadata() {
    let card = DeviceCard::from_response::<ApiError>(Ok(page(json!({
        "list": [],
        "metadata": { "keyCount": { "counts": { "Total": 4200, "Online": 4100 } } }
    }))));
    assert_eq!(card.value_text(), "4,200");
}

#[test]
fn card_is_unavailable_on_error_or_missing_counts() {
    let failed = DeviceCard::from_response::<ApiError>(Err(ApiError::Network("offline".to_owned())));
    assert_eq!(failed, DeviceCard::Unavailable);
    assert_eq!(failed.value_text(), "--");
    assert_eq!(DeviceCard::from_response::<ApiError>(Ok(page(json!({ "list": [] })))), DeviceCard::Unavailable);
}

#[test]
fn alarms_render_severity_as_status() {
    let mut state = TableState::new(alarm_table_config());
    state.set_data(alarm_rows());
    assert_eq!(state.total_items(), ALARMS.len());
    let config = state.config();
    let severity = config.columns.iter().find(|c| c.key == "severity").unwrap();
    let first = state.row_at(0).unwrap();
    assert_eq!(
        severity.render(first, config.status_column.as_deref() == Some("severity")),
        crate::state::table::Cell::Badge { class: "status-critical".to_owned(), text: "CRITICAL".to_owned() }
    );
}

#[test]
fn alarm_filter_is_case_insensitive() {
    let mut state = TableState::new(alarm_table_config());
    state.set_data(alarm_rows());
    state.set_filter("type", "gpu");
    assert_eq!(state.total_items(), 2);
}
