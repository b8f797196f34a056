//! Interactive views mounted below section fragments.
//!
//! Each view builds its endpoints from the shared `ConsoleConfig` context and
//! owns its table state for as long as the section is shown.

pub mod common;
pub mod credentials;
pub mod dashboard;
pub mod health;
pub mod kubernetes;
pub mod network_devices;
pub mod roles;
pub mod security;
pub mod targets;
pub mod users;
