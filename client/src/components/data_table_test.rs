use super::*;

#[test]
fn reply_for_the_latest_request_is_applied() {
    assert!(reply_is_current(Some(3), 3));
}

#[test]
fn reply_overtaken_by_a_newer_request_is_dropped() {
    let reload = RwSignal::new(0_u64);
    let first = reload.get_untracked();
    reload.update(|n| *n += 1);
    let second = reload.get_untracked();

    assert!(!reply_is_current(reload.try_get_untracked(), first));
    assert!(reply_is_current(reload.try_get_untracked(), second));
}

#[test]
fn disposed_table_accepts_no_reply() {
    assert!(!reply_is_current(None, 0));
}
