//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `fetch` attaches the bearer token and applies the 401 policy, `query`
//! builds L8 query URLs and decodes list envelopes, `api` holds the login
//! and CRUD calls, and `types` defines the backend record schema.

pub mod api;
pub mod fetch;
pub mod query;
pub mod types;
