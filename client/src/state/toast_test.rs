use super::*;

#[test]
fn kinds_have_titles_and_icons() {
    assert_eq!((ToastKind::Error.title(), ToastKind::Error.icon()), ("Error", "!"));
    assert_eq!((ToastKind::Success.title(), ToastKind::Success.icon()), ("Success", "✓"));
    assert_eq!((ToastKind::Warning.title(), ToastKind::Warning.icon()), ("Warning", "⚠"));
    assert_eq!(ToastKind::default(), ToastKind::Error);
}

#[test]
fn shorthand_uses_default_duration() {
    let mut queue = ToastQueue::default();
    queue.success("Saved");
    assert_eq!(queue.toasts()[0].duration_ms, 5000);
    assert_eq!(queue.toasts()[0].auto_dismiss_ms(), Some(5000));
}

#[test]
fn zero_duration_is_sticky() {
    let mut queue = ToastQueue::default();
    queue.push(ToastKind::Warning, "Session expired", 0);
    assert_eq!(queue.toasts()[0].auto_dismiss_ms(), None);
}

#[test]
fn ids_are_unique_and_dismiss_removes_one() {
    let mut queue = ToastQueue::default();
    let a = queue.error("a");
    let b = queue.error("b");
    assert_ne!(a, b);
    assert!(queue.dismiss(a));
    assert!(!queue.dismiss(a));
    assert_eq!(queue.toasts().len(), 1);
    assert_eq!(queue.toasts()[0].message, "b");
}
