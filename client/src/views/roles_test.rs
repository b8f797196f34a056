use super::*;

fn rule(id: &str, actions: &[&str]) -> Rule {
    Rule {
        rule_id: id.to_owned(),
        elem_type: "NetworkDevice".to_owned(),
        allowed: true,
        actions: actions.iter().map(|a| ((*a).to_owned(), true)).collect(),
        attributes: BTreeMap::new(),
    }
}

fn form(id: &str, elem_type: &str) -> RuleForm {
    RuleForm { rule_id: id.to_owned(), elem_type: elem_type.to_owned(), allowed: true, ..RuleForm::default() }
}

#[test]
fn action_names_cover_known_codes() {
    assert_eq!(action_name("-999"), "ALL");
    assert_eq!(action_name("5"), "GET");
    assert_eq!(action_name("42"), "42");
}

#[test]
fn summary_lists_enabled_actions_in_table_order() {
    let mut r = rule("r1", &["5", "-999", "1"]);
    r.actions.insert("2".to_owned(), false);
    assert_eq!(rule_summary(&r), "Type: NetworkDevice | Actions: ALL, POST, GET");
    assert_eq!(rule_summary(&rule("r2", &[])), "Type: NetworkDevice | Actions: None");
}

#[test]
fn rule_needs_id_and_type() {
    assert_eq!(validate_rule(&form("", "*"), &[], None), Err(RULE_REQUIRED));
    assert_eq!(validate_rule(&form("r1", " "), &[], None), Err(RULE_REQUIRED));
}

#[test]
fn new_rule_id_must_be_unique_but_edits_may_keep_it() {
    let rules = vec![rule("r1", &[])];
    assert_eq!(validate_rule(&form("r1", "*"), &rules, None), Err(DUPLICATE_RULE));
    assert!(validate_rule(&form("r1", "*"), &rules, Some(0)).is_ok());
}

#[test]
fn placeholder_actions_and_attributes_are_dropped() {
    let mut f = form("r1", "*");
    f.actions = vec![String::new(), "1".to_owned()];
    f.attributes = vec![(" ".to_owned(), "x".to_owned()), ("zone".to_owned(), "east".to_owned())];
    let built = validate_rule(&f, &[], None).unwrap();
    assert_eq!(built.actions.keys().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(built.attributes.get("zone").map(String::as_str), Some("east"));
    assert_eq!(built.attributes.len(), 1);
}

#[test]
fn place_rule_replaces_or_appends() {
    let mut rules = vec![rule("r1", &[])];
    place_rule(&mut rules, Some(0), rule("r1", &["5"]));
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].actions.len(), 1);
    place_rule(&mut rules, None, rule("r2", &[]));
    assert_eq!(rules.len(), 2);
}

#[test]
fn role_validation_and_rule_keys() {
    let mut existing = BTreeMap::new();
    existing.insert("admin".to_owned(), Role::default());
    assert_eq!(validate_role("", "Admin", Vec::new(), &existing, true), Err(REQUIRED));
    assert_eq!(validate_role("admin", "Admin", Vec::new(), &existing, true), Err(DUPLICATE_ID));

    let role = validate_role("admin", "Admin", vec![rule("r1", &[]), rule("r2", &[])], &existing, false).unwrap();
    assert_eq!(role.rules.keys().collect::<Vec<_>>(), vec!["r1", "r2"]);
    assert_eq!(role_row(&role)["rulesCount"], json!(2));
}
