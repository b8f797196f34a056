use super::*;

#[test]
fn query_url_encodes_json_body() {
    let url = query_url("/probler/0/NCache", "select * from NetworkDevice where Id=* limit 1 page 0");
    assert_eq!(
        url,
        "/probler/0/NCache?body=%7B%22text%22%3A%22select%20%2A%20from%20NetworkDevice%20where%20Id%3D%2A%20limit%201%20page%200%22%7D"
    );
}

#[test]
fn query_body_round_trips_through_encoding() {
    let url = query_url("/x", "select * from L8User");
    let encoded = url.split_once("?body=").map(|(_, b)| b).expect("has body");
    let decoded = urlencoding::decode(encoded).expect("valid utf-8");
    let body: QueryBody = serde_json::from_str(&decoded).expect("valid json");
    assert_eq!(body.text, "select * from L8User");
}

#[test]
fn select_all_formats_model() {
    assert_eq!(select_all("L8Credentials"), "select * from L8Credentials");
}

#[test]
fn list_response_reads_total_and_counts() {
    let raw = r#"{
        "list": [{"id": "a"}, {"id": "b"}],
        "metadata": { "keyCount": { "counts": { "Total": 42, "Online": 40 } } }
    }"#;
    let resp: ListResponse<serde_json::Value> = serde_json::from_str(raw).expect("valid");
    assert_eq!(resp.list.len(), 2);
    assert_eq!(resp.total(), 42);
    assert_eq!(resp.count("Online"), Some(40));
    assert_eq!(resp.count("Offline"), None);
}

#[test]
fn list_response_tolerates_missing_fields() {
    let resp: ListResponse<serde_json::Value> = serde_json::from_str("{}").expect("valid");
    assert!(resp.list.is_empty());
    assert_eq!(resp.total(), 0);
    assert!(resp.counts().is_none());
}
