use super::*;
use crate::state::table::Cell;

fn role(id: &str, name: &str) -> (String, Role) {
    (id.to_owned(), Role { role_id: id.to_owned(), role_name: name.to_owned(), ..Role::default() })
}

fn user(id: &str, roles: &[(&str, bool)]) -> User {
    User {
        user_id: id.to_owned(),
        full_name: "Ada Lovelace".to_owned(),
        password: Some(Password { hash: "secret".to_owned() }),
        roles: roles.iter().map(|(r, on)| ((*r).to_owned(), *on)).collect(),
    }
}

fn form(id: &str, name: &str, password: &str) -> UserForm {
    UserForm { user_id: id.to_owned(), full_name: name.to_owned(), password: password.to_owned(), ..UserForm::default() }
}

#[test]
fn role_names_resolve_known_roles_and_skip_disabled() {
    let roles: BTreeMap<_, _> = [role("admin", "Administrator")].into_iter().collect();
    let u = user("ada", &[("admin", true), ("ghost", true), ("ops", false)]);
    assert_eq!(role_names(&u, &roles), vec!["Administrator".to_owned(), "ghost".to_owned()]);
}

#[test]
fn roles_column_falls_back_to_dash() {
    let row = user_row(&user("ada", &[]), &BTreeMap::new());
    let cell = columns().into_iter().find(|c| c.key == "roles").map(|c| c.render(&row, false));
    assert_eq!(cell, Some(Cell::text("-")));
}

#[test]
fn new_user_needs_fields_unique_id_and_password() {
    let mut existing = BTreeMap::new();
    existing.insert("ada".to_owned(), user("ada", &[]));
    assert_eq!(validate_user(&form("", "Bob", "pw"), &existing, None), Err(REQUIRED));
    assert_eq!(validate_user(&form("ada", "Ada", "pw"), &existing, None), Err(DUPLICATE_ID));
    assert_eq!(validate_user(&form("bob", "Bob", ""), &existing, None), Err(PASSWORD_REQUIRED));

    let mut f = form(" bob ", "Bob", "pw");
    f.roles.insert("admin".to_owned());
    let created = validate_user(&f, &existing, None);
    assert_eq!(created.as_ref().map(|u| u.user_id.as_str()), Ok("bob"));
    assert_eq!(created.as_ref().ok().and_then(|u| u.password.clone()), Some(Password { hash: "pw".to_owned() }));
    assert_eq!(created.map(|u| u.roles.get("admin").copied()), Ok(Some(true)));
}

#[test]
fn edit_keeps_password_and_replaces_roles() {
    let original = user("ada", &[("admin", true)]);
    let mut existing = BTreeMap::new();
    existing.insert("ada".to_owned(), original.clone());
    let mut f = form("ada", "Ada King", "");
    f.roles.insert("ops".to_owned());

    let edited = validate_user(&f, &existing, Some(&original)).unwrap();
    assert_eq!(edited.full_name, "Ada King");
    assert_eq!(edited.password, original.password);
    assert_eq!(edited.roles.keys().collect::<Vec<_>>(), vec!["ops"]);
}
