//! Display formatting for backend counters, durations, and sizes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backend records carry raw numbers (centiseconds, byte counts, epoch
//! milliseconds). Views convert them here so table cells and detail dialogs
//! render identical text.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a device uptime given in centiseconds as `"<d>d <h>h <m>m"`.
///
/// Zero uptime renders as `"0m"`.
pub fn format_uptime(centiseconds: u64) -> String {
    if centiseconds == 0 {
        return "0m".to_owned();
    }
    let seconds = centiseconds / 100;
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// Format a byte count with a binary unit suffix.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(BYTE_UNITS.len() - 1);
    if exponent == 0 {
        return format!("{bytes} B");
    }
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);
    format!("{scaled:.2} {}", BYTE_UNITS[exponent])
}

/// Format a CPU usage value as a percentage with two decimals.
pub fn format_cpu(cpu: f64) -> String {
    if !cpu.is_finite() || cpu.abs() < f64::EPSILON {
        return "0.00%".to_owned();
    }
    format!("{cpu:.2}%")
}

/// Format the time elapsed between `start_ms` and `now_ms` as `HH:MM:SS`.
///
/// A zero start or a start in the future renders as `00:00:00`.
pub fn format_elapsed(start_ms: i64, now_ms: i64) -> String {
    if start_ms == 0 {
        return "00:00:00".to_owned();
    }
    let elapsed = (now_ms - start_ms).div_euclid(1000);
    if elapsed < 0 {
        return "00:00:00".to_owned();
    }
    let hours = elapsed / 3_600;
    let minutes = (elapsed % 3_600) / 60;
    let seconds = elapsed % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Group digits in threes with commas.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Current wall clock in epoch milliseconds. Zero outside the browser.
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

/// Epoch milliseconds as browser-local date and time; `N/A` when unset.
pub fn format_local_time(epoch_ms: i64) -> String {
    if epoch_ms <= 0 {
        return "N/A".to_owned();
    }
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_precision_loss)]
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(epoch_ms as f64));
        date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED).as_string().unwrap_or_else(|| epoch_ms.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        epoch_ms.to_string()
    }
}
