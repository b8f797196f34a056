//! Toast notifications.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Display time when the caller does not pick one.
pub const DEFAULT_TOAST_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Error,
    Success,
    Warning,
}

impl ToastKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Success => "Success",
            Self::Warning => "Warning",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "!",
            Self::Success => "✓",
            Self::Warning => "⚠",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "toast toast-error",
            Self::Success => "toast toast-success",
            Self::Warning => "toast toast-warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    /// `0` keeps the toast until dismissed.
    pub duration_ms: u32,
}

impl Toast {
    pub fn auto_dismiss_ms(&self) -> Option<u32> {
        (self.duration_ms > 0).then_some(self.duration_ms)
    }
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: &str, duration_ms: u32) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast { id: self.next_id, kind, message: message.to_owned(), duration_ms });
        self.next_id
    }

    pub fn error(&mut self, message: &str) -> u64 {
        self.push(ToastKind::Error, message, DEFAULT_TOAST_MS)
    }

    pub fn success(&mut self, message: &str) -> u64 {
        self.push(ToastKind::Success, message, DEFAULT_TOAST_MS)
    }

    pub fn warning(&mut self, message: &str) -> u64 {
        self.push(ToastKind::Warning, message, DEFAULT_TOAST_MS)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
