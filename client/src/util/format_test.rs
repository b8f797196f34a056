use super::*;

// =============================================================
// format_uptime
// =============================================================

#[test]
fn format_uptime_zero_is_zero_minutes() {
    assert_eq!(format_uptime(0), "0m");
}

#[test]
fn format_uptime_splits_days_hours_minutes() {
    // 1 day, 2 hours, 3 minutes, 4 seconds in centiseconds.
    let seconds = 86_400 + 2 * 3_600 + 3 * 60 + 4;
    assert_eq!(format_uptime(seconds * 100), "1d 2h 3m");
}

#[test]
fn format_uptime_under_a_minute_shows_zero_fields() {
    assert_eq!(format_uptime(5_900), "0d 0h 0m");
}

// =============================================================
// format_bytes
// =============================================================

#[test]
fn format_bytes_zero() {
    assert_eq!(format_bytes(0), "0 B");
}

#[test]
fn format_bytes_below_one_kib_is_plain() {
    assert_eq!(format_bytes(512), "512 B");
    assert_eq!(format_bytes(1023), "1023 B");
}

#[test]
fn format_bytes_scales_with_two_decimals() {
    assert_eq!(format_bytes(1024), "1.00 KB");
    assert_eq!(format_bytes(1536), "1.50 KB");
    assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
}

#[test]
fn format_bytes_caps_at_terabytes() {
    let pib = 1024_u64.pow(5);
    assert_eq!(format_bytes(pib), "1024.00 TB");
}

// =============================================================
// format_cpu
// =============================================================

#[test]
fn format_cpu_zero_and_non_finite() {
    assert_eq!(format_cpu(0.0), "0.00%");
    assert_eq!(format_cpu(f64::NAN), "0.00%");
}

#[test]
fn format_cpu_two_decimals() {
    assert_eq!(format_cpu(12.346), "12.35%");
    assert_eq!(format_cpu(3.0), "3.00%");
}

// =============================================================
// format_elapsed
// =============================================================

#[test]
fn format_elapsed_zero_start() {
    assert_eq!(format_elapsed(0, 1_000_000), "00:00:00");
}

#[test]
fn format_elapsed_future_start() {
    assert_eq!(format_elapsed(2_000, 1_000), "00:00:00");
}

#[test]
fn format_elapsed_pads_fields() {
    let start = 1_700_000_000_000;
    let now = start + (3_600 + 2 * 60 + 5) * 1000 + 999;
    assert_eq!(format_elapsed(start, now), "01:02:05");
}

#[test]
fn format_elapsed_hours_do_not_wrap() {
    let start = 1_000;
    let now = start + 125 * 3_600 * 1000;
    assert_eq!(format_elapsed(start, now), "125:00:00");
}

// =============================================================
// format_thousands
// =============================================================

#[test]
fn format_thousands_groups_digits() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1,000");
    assert_eq!(format_thousands(1_234_567), "1,234,567");
}

#[test]
fn format_local_time_unset_is_not_available() {
    assert_eq!(format_local_time(0), "N/A");
    assert_eq!(format_local_time(-5), "N/A");
}
