use super::*;
use crate::state::modal::ConfirmKind;

fn config(protocol: i32, addr: &str) -> HostConfig {
    HostConfig { addr: addr.to_owned(), port: default_port(protocol), protocol, ..HostConfig::default() }
}

fn host(id: &str, configs: &[HostConfig]) -> TargetHost {
    TargetHost { host_id: id.to_owned(), configs: configs.iter().map(|c| (c.protocol.to_string(), c.clone())).collect() }
}

fn target(id: &str, state: i32, hosts: &[TargetHost]) -> Target {
    Target {
        target_id: id.to_owned(),
        links_id: String::new(),
        hosts: hosts.iter().map(|h| (h.host_id.clone(), h.clone())).collect(),
        state,
        inventory_type: 1,
    }
}

fn form(protocol: i32, addr: &str, port: &str) -> ConfigForm {
    ConfigForm { protocol, addr: addr.to_owned(), port: port.to_owned(), ..ConfigForm::default() }
}

#[test]
fn enum_names_and_fallbacks() {
    assert_eq!(protocol_name(3), "SNMPV3");
    assert_eq!(protocol_name(99), "Unknown");
    assert_eq!(inventory_type_name(5), "K8s Cluster");
    assert_eq!(inventory_type_name(42), "targets");
    assert_eq!(state_name(3), "Maintenance");
}

#[test]
fn default_ports_per_protocol() {
    assert_eq!(default_port(1), 22);
    assert_eq!(default_port(3), 161);
    assert_eq!(default_port(5), 830);
    assert_eq!(default_port(7), 6443);
    assert_eq!(default_port(8), 443);
    assert_eq!(default_port(0), 22);
}

#[test]
fn toggle_flips_up_and_down() {
    assert_eq!(toggled_state(STATE_UP), STATE_DOWN);
    assert_eq!(toggled_state(STATE_DOWN), STATE_UP);
    assert_eq!(toggled_state(3), STATE_UP);

    let mut t = target("t1", STATE_UP, &[]);
    t.inventory_type = 0;
    let next = toggle_target(&t, 5);
    assert_eq!((next.state, next.inventory_type), (STATE_DOWN, 5));
}

#[test]
fn addresses_are_distinct_and_dash_when_missing() {
    let t = target(
        "t1",
        STATE_UP,
        &[host("a", &[config(1, "10.0.0.1"), config(2, "10.0.0.1")]), host("b", &[config(1, "10.0.0.2")])],
    );
    assert_eq!(target_addresses(&t), "10.0.0.1, 10.0.0.2");
    assert_eq!(target_row(&target("t2", STATE_DOWN, &[]))["addresses"], json!("-"));
}

#[test]
fn row_renders_host_count_and_state_tag() {
    let row = target_row(&target("t1", STATE_UP, &[host("a", &[])]));
    let cells: Vec<Cell> = columns().iter().map(|c| c.render(&row, false)).collect();
    assert_eq!(cells[3], Cell::Tags(vec!["1 host".to_owned()]));
    assert_eq!(cells[4], Cell::Badge { class: "l8-tag-up".to_owned(), text: "Up".to_owned() });
}

#[test]
fn table_is_scoped_to_inventory_type() {
    let state = TableState::new(table_config("/probler/91/Targets".to_owned(), 1));
    let query = state.query().map(|q| q.text);
    assert_eq!(query.as_deref(), Some("select * from L8PTarget where inventoryType=1 limit 20 page 0"));
    assert_eq!(state.config().empty_message, "No Network Device found. Click \"Add Target\" to create one.");
}

#[test]
fn bulk_start_and_stop() {
    let (request, payload, success) = bulk_action(3, STATE_UP);
    assert_eq!(request.id, "bulk-action-2");
    assert_eq!(request.title, "Start All Targets");
    assert_eq!(request.message, "Are you sure you want to start all Hosts?");
    assert_eq!(request.kind, ConfirmKind::Warning);
    assert_eq!(payload, TargetAction { action_type: 3, action_state: STATE_UP });
    assert_eq!(success, "All Hosts started successfully");

    let (request, _, success) = bulk_action(1, STATE_DOWN);
    assert_eq!(request.id, "bulk-action-1");
    assert_eq!(success, "All Network Device stopped successfully");
}

#[test]
fn delete_selects_by_target_id() {
    assert_eq!(delete_query("core-1"), "select * from L8PTarget where targetId=core-1");
}

#[test]
fn target_validation() {
    let mut loaded = BTreeMap::new();
    loaded.insert("t1".to_owned(), target("t1", STATE_UP, &[]));
    assert_eq!(validate_target(" ", "", 1, &[], 1, &loaded, true), Err(TARGET_ID_REQUIRED));
    assert_eq!(validate_target("t1", "", 1, &[], 1, &loaded, true), Err(DUPLICATE_TARGET));

    let saved = validate_target("t1", " l1 ", 2, &[host("h", &[])], 1, &loaded, false).unwrap();
    assert_eq!(saved.links_id, "l1");
    assert!(saved.hosts.contains_key("h"));
}

#[test]
fn host_ids_must_be_unique() {
    let mut hosts = vec![host("a", &[])];
    assert_eq!(upsert_host(&mut hosts, None, "", &[]), Err(HOST_ID_REQUIRED));
    assert_eq!(upsert_host(&mut hosts, None, "a", &[]), Err(DUPLICATE_HOST));
    assert_eq!(upsert_host(&mut hosts, Some(0), "a", &[config(1, "x")]), Ok(()));
    assert_eq!(hosts[0].configs.len(), 1);
    assert_eq!(upsert_host(&mut hosts, None, "b", &[]), Ok(()));
    assert_eq!(hosts.len(), 2);
}

#[test]
fn config_validation_and_port_default() {
    let existing = vec![config(1, "10.0.0.1")];
    assert_eq!(validate_config(&form(2, " ", "161"), &existing, None), Err(ADDRESS_REQUIRED));
    assert_eq!(validate_config(&form(1, "10.0.0.2", "22"), &existing, None), Err(DUPLICATE_PROTOCOL));
    assert!(validate_config(&form(1, "10.0.0.2", "2222"), &existing, Some(0)).is_ok());

    let built = validate_config(&form(5, "10.0.0.3", "abc"), &existing, None).unwrap();
    assert_eq!(built.port, 830);
    assert_eq!(built.extra.get("timeout"), Some(&json!("")));
}

#[test]
fn credential_labels() {
    let c = Credential { id: "lab".to_owned(), name: "Lab".to_owned(), ..Credential::default() };
    assert_eq!(credential_label(&c), "lab (Lab)");
    assert_eq!(credential_label(&Credential { id: "x".to_owned(), ..Credential::default() }), "x");
}
