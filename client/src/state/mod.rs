//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `config`, `table`, `section`,
//! `modal`, `toast`) so components depend on small focused models. Each is
//! plain data; components wrap them in `RwSignal`s provided as context.

pub mod config;
pub mod modal;
pub mod section;
pub mod session;
pub mod table;
pub mod toast;
