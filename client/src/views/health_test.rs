use super::*;

fn record(json: Value) -> HealthRecord {
    serde_json::from_value(json).unwrap()
}

#[test]
fn records_without_stats_are_skipped() {
    assert!(health_row(&record(json!({ "alias": "orm" })), 0).is_none());
}

#[test]
fn row_formats_counters_and_durations() {
    let now = 10_000_000;
    let row = health_row(
        &record(json!({
            "alias": "orm",
            "startTime": (now - 3_661_000).to_string(),
            "stats": {
                "rxMsgCount": "12",
                "rxDataCont": 2048,
                "txDataCount": 0,
                "memoryUsage": 1_572_864,
                "cpuUsage": 3.14159,
                "lastMsgTime": now - 5_000
            }
        })),
        now,
    )
    .unwrap();
    assert_eq!(row["service"], "orm");
    assert_eq!(row["rx"], 12);
    assert_eq!(row["rxData"], "2.00 KB");
    assert_eq!(row["txData"], "0 B");
    assert_eq!(row["memory"], "1.50 MB");
    assert_eq!(row["cpuPercent"], "3.14%");
    assert_eq!(row["upTime"], "01:01:01");
    assert_eq!(row["lastPulse"], "00:00:05");
}

#[test]
fn missing_alias_reads_unknown() {
    let row = health_row(&record(json!({ "stats": {} })), 0).unwrap();
    assert_eq!(row["service"], "Unknown");
    assert_eq!(row["upTime"], "00:00:00");
}

#[test]
fn raw_record_survives_in_row() {
    let original = record(json!({ "alias": "vnet", "stats": { "memoryUsage": 7 }, "data": "blob" }));
    let row = health_row(&original, 0).unwrap();
    let back: HealthRecord = serde_json::from_value(row["raw"].clone()).unwrap();
    assert_eq!(back, original);
}

#[test]
fn service_areas_list_enabled_areas_only() {
    let r = record(json!({
        "services": { "serviceToAreas": {
            "Health": { "areas": { "0": true, "1": false, "2": true } },
            "Idle": { "areas": { "0": false } }
        } }
    }));
    assert_eq!(
        service_areas(&r),
        vec![("Health".to_owned(), "Areas: 0, 2".to_owned()), ("Idle".to_owned(), "Areas: None".to_owned())]
    );
    assert!(service_areas(&HealthRecord::default()).is_empty());
}

#[test]
fn sorting_uses_backend_field() {
    let mut state = TableState::new(table_config("/probler/0/Health".to_owned()));
    state.sort_by("memory");
    state.sort_by("memory");
    assert_eq!(state.query().unwrap().text, "select * from L8Health limit 15 page 0 sort-by stats.memoryUsage descending");
}
