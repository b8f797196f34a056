use super::*;

// =============================================================
// ModalStack
// =============================================================

#[test]
fn stack_tracks_top_dialog() {
    let mut stack = ModalStack::default();
    stack.open("role");
    stack.open("rule");
    assert_eq!(stack.top(), Some("rule"));
    assert!(stack.is_stacked("role"));
    assert!(!stack.is_stacked("rule"));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn close_top_unwinds_in_order() {
    let mut stack = ModalStack::default();
    stack.open("role");
    stack.open("rule");
    assert_eq!(stack.close_top().as_deref(), Some("rule"));
    assert_eq!(stack.close_top().as_deref(), Some("role"));
    assert_eq!(stack.close_top(), None);
}

#[test]
fn reopening_moves_to_top_without_duplicates() {
    let mut stack = ModalStack::default();
    stack.open("a");
    stack.open("b");
    stack.open("a");
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.top(), Some("a"));
}

#[test]
fn close_by_id() {
    let mut stack = ModalStack::default();
    stack.open("a");
    stack.open("b");
    assert!(stack.close("a"));
    assert!(!stack.close("a"));
    assert_eq!(stack.top(), Some("b"));
    assert!(!stack.is_open("a"));
}

#[test]
fn only_escape_closes() {
    assert!(key_closes_modal("Escape"));
    assert!(!key_closes_modal("Enter"));
    assert!(!key_closes_modal("Esc"));
}

// =============================================================
// ConfirmRequest
// =============================================================

#[test]
fn confirm_defaults() {
    let req = ConfirmRequest::new("x", "Confirm", "Sure?");
    assert_eq!(req.confirm_text, "Confirm");
    assert_eq!(req.cancel_text, "Cancel");
    assert_eq!(req.kind, ConfirmKind::Warning);
    assert_eq!(req.modal_id(), "confirm:x");
}

#[test]
fn danger_confirm_uses_delete_button() {
    let req = ConfirmRequest::danger("del-u1", "Delete User", "Delete u1?").detail("This cannot be undone.");
    assert_eq!(req.confirm_text, "Delete");
    assert_eq!(req.kind.button_class(), "confirm-btn-danger");
    assert_eq!(req.detail.as_deref(), Some("This cannot be undone."));
}

// =============================================================
// EventBus
// =============================================================

#[test]
fn bus_sequences_repeated_events() {
    let mut bus = EventBus::default();
    bus.publish(ConsoleEvent::DataChanged(DataDomain::Roles));
    bus.publish(ConsoleEvent::DataChanged(DataDomain::Roles));
    assert_eq!(bus.seq, 2);
    assert_eq!(bus.change_seq(DataDomain::Roles), 2);
    assert!(bus.changed_since(DataDomain::Roles, 1));
    assert!(!bus.changed_since(DataDomain::Users, 0));
}

#[test]
fn data_change_survives_a_following_modal_close() {
    let mut bus = EventBus::default();
    let seen = bus.change_seq(DataDomain::Roles);
    bus.publish(ConsoleEvent::DataChanged(DataDomain::Roles));
    bus.publish(ConsoleEvent::ModalClosed("role-editor".to_owned()));

    assert!(bus.changed_since(DataDomain::Roles, seen));
    assert!(!bus.changed_since(DataDomain::Users, 0));
    assert!(!bus.changed_since(DataDomain::Roles, bus.change_seq(DataDomain::Roles)));
}

#[test]
fn bus_reports_confirmation_for_matching_id() {
    let mut bus = EventBus::default();
    bus.publish(ConsoleEvent::ConfirmResolved { id: "del-1".to_owned(), confirmed: true });
    assert_eq!(bus.confirmation("del-1"), Some(true));
    assert_eq!(bus.confirmation("del-2"), None);
    bus.publish(ConsoleEvent::ModalClosed("x".to_owned()));
    assert_eq!(bus.confirmation("del-1"), None);
}
