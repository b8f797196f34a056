//! Backend query URLs and the shared list envelope.
//!
//! The backend exposes resources at `/{prefix}/{area}/{Resource}` and takes a
//! pseudo-SQL query in the `body` query parameter, JSON-encoded as
//! `{"text": "..."}` and then url-encoded.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// JSON payload carried in the `body` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBody {
    pub text: String,
}

impl QueryBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "text": self.text }).to_string()
    }
}

/// `select * from <model>`.
pub fn select_all(model: &str) -> String {
    format!("select * from {model}")
}

/// Build `<endpoint>?body=<url-encoded {"text": text}>`.
pub fn query_url(endpoint: &str, text: &str) -> String {
    let body = QueryBody::new(text).to_json();
    format!("{endpoint}?body={}", urlencoding::encode(&body))
}

/// Per-key record counts returned alongside a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct KeyCount {
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    #[serde(default)]
    pub key_count: Option<KeyCount>,
}

/// `{ list: [...], metadata: { keyCount: { counts: {...} } } }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub metadata: Option<ListMetadata>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self { list: Vec::new(), metadata: None }
    }
}

impl<T> ListResponse<T> {
    /// The named count from the metadata, if reported.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.key_count.as_ref())
            .and_then(|k| k.counts.get(key).copied())
    }

    /// `counts.Total`, or zero when the backend did not report it.
    pub fn total(&self) -> u64 {
        self.count("Total").unwrap_or(0)
    }

    pub fn counts(&self) -> Option<&BTreeMap<String, u64>> {
        self.metadata.as_ref().and_then(|m| m.key_count.as_ref()).map(|k| &k.counts)
    }
}
