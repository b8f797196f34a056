use super::*;
use crate::state::table::Cell;

fn item(a: &str) -> CredItem {
    CredItem { aside: a.to_owned(), ..CredItem::default() }
}

#[test]
fn mask_hides_secrets_and_marks_blanks() {
    assert_eq!(mask_value("hunter2"), MASK);
    assert_eq!(mask_value(""), "-");
}

#[test]
fn row_counts_items() {
    let mut creds = BTreeMap::new();
    creds.insert("ssh".to_owned(), item("admin"));
    creds.insert("snmp".to_owned(), item("public"));
    let row = credential_row(&Credential { id: "lab".to_owned(), name: "Lab".to_owned(), creds });
    assert_eq!(row["count"], json!(2));
    let count = columns().into_iter().find(|c| c.key == "count").map(|c| c.render(&row, false));
    assert_eq!(count, Some(Cell::Tags(vec!["2 items".to_owned()])));
}

#[test]
fn validation_requires_id_and_name() {
    let existing = BTreeMap::new();
    assert_eq!(validate_credential(" ", "Lab", BTreeMap::new(), &existing, true), Err(REQUIRED));
    assert_eq!(validate_credential("lab", "", BTreeMap::new(), &existing, true), Err(REQUIRED));
}

#[test]
fn validation_rejects_taken_id_only_when_adding() {
    let mut existing = BTreeMap::new();
    existing.insert("lab".to_owned(), Credential { id: "lab".to_owned(), ..Credential::default() });
    assert_eq!(validate_credential("lab", "Lab", BTreeMap::new(), &existing, true), Err(DUPLICATE_ID));
    let saved = validate_credential(" lab ", " Lab ", BTreeMap::new(), &existing, false);
    assert_eq!(saved.map(|c| (c.id, c.name)), Ok(("lab".to_owned(), "Lab".to_owned())));
}

#[test]
fn upsert_rejects_blank_and_duplicate_keys() {
    let mut items = BTreeMap::new();
    assert_eq!(upsert_item(&mut items, None, "  ", item("x")), Err(KEY_REQUIRED));
    assert_eq!(upsert_item(&mut items, None, "ssh", item("x")), Ok(()));
    assert_eq!(upsert_item(&mut items, None, "ssh", item("y")), Err(DUPLICATE_KEY));
    assert_eq!(items["ssh"].aside, "x");
}

#[test]
fn upsert_replaces_existing_item() {
    let mut items = BTreeMap::new();
    items.insert("ssh".to_owned(), item("old"));
    assert_eq!(upsert_item(&mut items, Some("ssh"), "ssh", item("new")), Ok(()));
    assert_eq!(items.len(), 1);
    assert_eq!(items["ssh"].aside, "new");
}
