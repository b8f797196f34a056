//! Dialog stack, confirmation requests, and the console event contract.
//!
//! DESIGN
//! ======
//! Dialogs nest (a rule editor opens above the role editor), so open dialogs
//! form a stack and only the top one reacts to Escape or a backdrop click.
//! Views talk to each other through typed [`ConsoleEvent`]s published on a
//! shared [`EventBus`] signal instead of string-tagged messages.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

/// Ids of open dialogs, bottom to top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalStack {
    entries: Vec<String>,
}

impl ModalStack {
    /// Open `id` on top. Reopening an open dialog moves it to the top.
    pub fn open(&mut self, id: &str) {
        self.entries.retain(|e| e != id);
        self.entries.push(id.to_owned());
    }

    /// Close `id` wherever it is in the stack.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e != id);
        before != self.entries.len()
    }

    /// Close the top dialog (Escape / backdrop click).
    pub fn close_top(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e == id)
    }

    /// Open but covered by another dialog.
    pub fn is_stacked(&self, id: &str) -> bool {
        self.is_open(id) && self.top() != Some(id)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

/// What a key press means for the top dialog.
pub fn key_closes_modal(key: &str) -> bool {
    key == "Escape"
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModalSize {
    pub fn class(self) -> &'static str {
        match self {
            Self::Small => "probler-popup-small",
            Self::Medium => "probler-popup-medium",
            Self::Large => "probler-popup-large",
        }
    }
}

// =============================================================================
// CONFIRMATION
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfirmKind {
    Danger,
    #[default]
    Warning,
    Info,
}

impl ConfirmKind {
    pub fn button_class(self) -> &'static str {
        match self {
            Self::Danger => "confirm-btn-danger",
            Self::Warning => "confirm-btn-warning",
            Self::Info => "confirm-btn-info",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Danger => "confirm-icon-danger",
            Self::Warning => "confirm-icon-warning",
            Self::Info => "confirm-icon-info",
        }
    }
}

/// A yes/no question shown in the shared confirm dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub id: String,
    pub title: String,
    pub message: String,
    pub detail: Option<String>,
    pub confirm_text: String,
    pub cancel_text: String,
    pub kind: ConfirmKind,
}

impl ConfirmRequest {
    pub fn new(id: &str, title: &str, message: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            message: message.to_owned(),
            detail: None,
            confirm_text: "Confirm".to_owned(),
            cancel_text: "Cancel".to_owned(),
            kind: ConfirmKind::Warning,
        }
    }

    /// Destructive confirmation with a "Delete" button.
    pub fn danger(id: &str, title: &str, message: &str) -> Self {
        Self { confirm_text: "Delete".to_owned(), kind: ConfirmKind::Danger, ..Self::new(id, title, message) }
    }

    #[must_use]
    pub fn detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_owned());
        self
    }

    #[must_use]
    pub fn confirm_text(mut self, text: &str) -> Self {
        self.confirm_text = text.to_owned();
        self
    }

    /// Dialog id used on the modal stack.
    pub fn modal_id(&self) -> String {
        format!("confirm:{}", self.id)
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Record families views can announce changes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataDomain {
    Credentials,
    Users,
    Roles,
    Targets,
    Devices,
    Health,
    Clusters,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleEvent {
    ModalOpened(String),
    ModalClosed(String),
    ConfirmResolved { id: String, confirmed: bool },
    DataChanged(DataDomain),
}

/// Last published event with a sequence number so repeated identical events
/// still notify subscribers. Data changes also stamp their domain, so a change
/// followed by an unrelated event in the same tick is not lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventBus {
    pub seq: u64,
    pub last: Option<ConsoleEvent>,
    changes: Vec<(DataDomain, u64)>,
}

impl EventBus {
    pub fn publish(&mut self, event: ConsoleEvent) {
        self.seq += 1;
        if let ConsoleEvent::DataChanged(domain) = event {
            match self.changes.iter_mut().find(|(d, _)| *d == domain) {
                Some(entry) => entry.1 = self.seq,
                None => self.changes.push((domain, self.seq)),
            }
        }
        self.last = Some(event);
    }

    /// The confirmation answer for `id`, if that is the latest event.
    pub fn confirmation(&self, id: &str) -> Option<bool> {
        match &self.last {
            Some(ConsoleEvent::ConfirmResolved { id: resolved, confirmed }) if resolved == id => Some(*confirmed),
            _ => None,
        }
    }

    /// Sequence number of the latest change to `domain`; 0 when none yet.
    pub fn change_seq(&self, domain: DataDomain) -> u64 {
        self.changes.iter().find(|(d, _)| *d == domain).map_or(0, |(_, seq)| *seq)
    }

    /// Whether `domain` changed after a subscriber last saw sequence `seen`.
    pub fn changed_since(&self, domain: DataDomain, seen: u64) -> bool {
        self.change_seq(domain) > seen
    }
}
