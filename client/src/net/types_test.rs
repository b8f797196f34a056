use super::*;

#[test]
fn auth_response_reads_tfa_flags() {
    let resp: AuthResponse = serde_json::from_str(r#"{"token":"t1","needTfa":true}"#).expect("valid");
    assert_eq!(resp.token, "t1");
    assert!(resp.need_tfa);
    assert!(!resp.setup_tfa);
}

#[test]
fn tfa_verify_request_uses_camel_case() {
    let req = TfaVerifyRequest { user_id: "alice".to_owned(), code: "123456".to_owned(), bearer: "t".to_owned() };
    assert_eq!(
        serde_json::to_value(&req).expect("serializes"),
        serde_json::json!({ "userId": "alice", "code": "123456", "bearer": "t" })
    );
}

#[test]
fn user_without_password_omits_field() {
    let user = User { user_id: "u1".to_owned(), full_name: "User One".to_owned(), ..User::default() };
    let value = serde_json::to_value(&user).expect("serializes");
    assert!(value.get("password").is_none());
    assert_eq!(value["userId"], "u1");
    assert_eq!(value["fullName"], "User One");
}

#[test]
fn role_rules_decode_as_map() {
    let raw = r#"{
        "roleId": "admin",
        "roleName": "Administrators",
        "rules": { "r1": { "ruleId": "r1", "elemType": "*", "allowed": true, "actions": { "1": true } } }
    }"#;
    let role: Role = serde_json::from_str(raw).expect("valid");
    assert_eq!(role.rules["r1"].elem_type, "*");
    assert_eq!(role.rules["r1"].actions.get("1"), Some(&true));
}

#[test]
fn equipment_uptime_accepts_string_and_number() {
    let from_string: EquipmentInfo = serde_json::from_str(r#"{"uptime":"12345"}"#).expect("valid");
    let from_number: EquipmentInfo = serde_json::from_str(r#"{"uptime":12345}"#).expect("valid");
    let from_null: EquipmentInfo = serde_json::from_str(r#"{"uptime":null}"#).expect("valid");
    assert_eq!(from_string.uptime, 12_345);
    assert_eq!(from_number.uptime, 12_345);
    assert_eq!(from_null.uptime, 0);
}

#[test]
fn equipment_uptime_rejects_garbage() {
    assert!(serde_json::from_str::<EquipmentInfo>(r#"{"uptime":"soon"}"#).is_err());
    assert!(serde_json::from_str::<EquipmentInfo>(r#"{"uptime":[1]}"#).is_err());
}

#[test]
fn health_record_decodes_string_counters() {
    let raw = r#"{
        "alias": "orm",
        "startTime": "1700000000000",
        "stats": { "rxMsgCount": "10", "txDataCount": 2048, "cpuUsage": 1.5, "lastMsgTime": "1700000001000" }
    }"#;
    let record: HealthRecord = serde_json::from_str(raw).expect("valid");
    let stats = record.stats.expect("stats present");
    assert_eq!(record.start_time, 1_700_000_000_000);
    assert_eq!(stats.rx_msg_count, 10);
    assert_eq!(stats.tx_data_count, 2048);
    assert_eq!(stats.last_msg_time, 1_700_000_001_000);
}

#[test]
fn target_host_config_keeps_unknown_fields() {
    let raw = r#"{
        "targetId": "t1",
        "state": 2,
        "hosts": { "h1": { "hostId": "h1", "configs": { "1": { "addr": "10.0.0.1", "port": 22, "protocol": 1, "timeout": 30 } } } }
    }"#;
    let target: Target = serde_json::from_str(raw).expect("valid");
    let config = &target.hosts["h1"].configs["1"];
    assert_eq!(config.addr, "10.0.0.1");
    assert_eq!(config.extra.get("timeout"), Some(&serde_json::json!(30)));

    let back = serde_json::to_value(&target).expect("serializes");
    assert_eq!(back["hosts"]["h1"]["configs"]["1"]["timeout"], 30);
}

#[test]
fn cluster_resources_default_to_empty() {
    let cluster: K8sCluster = serde_json::from_str(r#"{"name":"lab","pods":{"p1":{"name":"p1"}}}"#).expect("valid");
    assert_eq!(cluster.pods.len(), 1);
    assert!(cluster.nodes.is_empty());
}
