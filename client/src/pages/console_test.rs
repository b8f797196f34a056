use super::*;

#[test]
fn zero_minutes_disables_the_idle_timer() {
    assert_eq!(session_timeout_ms(0), None);
    assert_eq!(session_timeout_ms(1), Some(60_000));
    assert_eq!(session_timeout_ms(30), Some(1_800_000));
}

#[test]
fn huge_timeouts_saturate() {
    assert_eq!(session_timeout_ms(u32::MAX), Some(u32::MAX));
}

#[test]
fn signed_out_state_redirects() {
    let state = signed_out();
    assert!(!state.is_authenticated());
    assert!(state.needs_login());
}
