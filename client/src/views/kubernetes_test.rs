use serde_json::json;

use super::*;

fn cluster() -> K8sCluster {
    let mut c = K8sCluster { name: "edge".to_owned(), ..K8sCluster::default() };
    c.pods.insert("web-1".to_owned(), json!({ "namespace": "default", "name": "web-1", "status": 1, "ready": "1/1" }));
    c.pods.insert("bad".to_owned(), json!("not an object"));
    c.nodes.insert("n1".to_owned(), json!({ "name": "n1", "roles": "control-plane" }));
    c
}

#[test]
fn pod_status_names() {
    assert_eq!(pod_status_text(&json!(1)), "Running");
    assert_eq!(pod_status_text(&json!(6)), "CrashLoopBackOff");
    assert_eq!(pod_status_text(&json!(42)), "Unknown");
    assert_eq!(pod_status_text(&json!("Evicted")), "Evicted");
    assert_eq!(pod_status_text(&Value::Null), "Unknown");
}

#[test]
fn pod_status_classes() {
    assert_eq!(pod_status_class("Running"), "status-operational");
    assert_eq!(pod_status_class("Completed"), "status-operational");
    assert_eq!(pod_status_class("ContainerCreating"), "status-warning");
    assert_eq!(pod_status_class("ImagePullBackOff"), "status-critical");
    assert_eq!(pod_status_class("Invalid_Pod_Status"), "status-critical");
    assert_eq!(pod_status_class("Evicted"), "status-warning");
}

#[test]
fn ready_badge_reflects_counts() {
    assert_eq!(ready_counts(&json!({ "count": 2, "outof": 3 })), (2, 3));
    assert_eq!(ready_counts(&json!("1/4")), (1, 4));
    assert_eq!(ready_counts(&json!(null)), (0, 0));

    assert_eq!(ready_cell(&json!("3/3")), Cell::Badge { class: "status-operational".to_owned(), text: "3/3".to_owned() });
    assert_eq!(ready_cell(&json!("1/3")), Cell::Badge { class: "status-warning".to_owned(), text: "1/3".to_owned() });
    assert_eq!(ready_cell(&json!("0/3")), Cell::Badge { class: "status-critical".to_owned(), text: "0/3".to_owned() });
}

#[test]
fn restarts_with_and_without_age() {
    assert_eq!(restarts_text(&json!({ "count": 4, "ago": "(2m ago)" })), "4 (2m ago)");
    assert_eq!(restarts_text(&json!({ "count": 0 })), "0");
    assert_eq!(restarts_text(&json!(7)), "7");
}

#[test]
fn resource_keys_round_trip() {
    for r in Resource::ALL {
        assert_eq!(Resource::from_key(r.key()), r);
    }
    assert_eq!(Resource::from_key("ingresses"), Resource::Nodes);
}

#[test]
fn rows_skip_non_objects() {
    let rows = resource_rows(&cluster(), Resource::Pods);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], json!("web-1"));
    assert!(resource_rows(&cluster(), Resource::Services).is_empty());
}

#[test]
fn pod_columns_render_badges() {
    let row = resource_rows(&cluster(), Resource::Pods).remove(0);
    let cells: Vec<Cell> = Resource::Pods.columns().iter().map(|c| c.render(&row, false)).collect();
    assert_eq!(cells[2], Cell::Badge { class: "status-operational".to_owned(), text: "1/1".to_owned() });
    assert_eq!(cells[3], Cell::Badge { class: "status-operational".to_owned(), text: "Running".to_owned() });
}

#[test]
fn stats_count_every_kind() {
    let stats = cluster_stats(&cluster());
    assert_eq!(stats.len(), 8);
    assert_eq!(stats[0], ("Nodes", 1));
    assert_eq!(stats[1], ("Pods", 2));
    assert_eq!(stats[7], ("Network Policies", 0));
}

#[test]
fn empty_cache_shows_fallback_cluster() {
    let list = clusters_or_fallback(Vec::new());
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, FALLBACK_CLUSTER);
    assert_eq!(clusters_or_fallback(vec![cluster()])[0].name, "edge");
}

#[test]
fn detail_fields_flatten_nested_values() {
    let row = json!({ "name": "n1", "labels": { "zone": "a" }, "note": "" });
    let fields = detail_fields(row.as_object().unwrap());
    assert!(fields.contains(&("labels".to_owned(), r#"{"zone":"a"}"#.to_owned())));
    assert!(fields.contains(&("note".to_owned(), "-".to_owned())));
    assert!(fields.contains(&("name".to_owned(), "n1".to_owned())));
}
