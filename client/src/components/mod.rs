//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and dialog surfaces while reading and
//! writing shared state from Leptos context providers.

pub mod confirm_dialog;
pub mod data_table;
pub mod detail;
pub mod modal;
pub mod nav;
pub mod section_host;
pub mod tab_strip;
pub mod toast_stack;
