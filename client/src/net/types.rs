//! Backend record DTOs.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's protobuf JSON (camelCase). Every field
//! defaults so partially populated records still decode, and 64-bit counters
//! accept either JSON numbers or decimal strings because protobuf JSON emits
//! int64 values as strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    pub user: String,
    pub pass: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    pub token: String,
    pub need_tfa: bool,
    pub setup_tfa: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TfaVerifyRequest {
    pub user_id: String,
    pub code: String,
    pub bearer: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TfaVerifyResponse {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TfaSetupRequest {
    pub user_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TfaSetupResponse {
    /// Base64 PNG of the provisioning QR code.
    pub qr: Option<String>,
    pub secret: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub user: String,
    pub pass: String,
    pub captcha: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CaptchaResponse {
    /// Base64 PNG of the captcha challenge.
    pub captcha: Option<String>,
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// `L8Credentials`: a named bundle of credential items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub id: String,
    pub name: String,
    pub creds: BTreeMap<String, CredItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredItem {
    pub aside: String,
    pub yside: String,
    pub zside: String,
}

// =============================================================================
// USERS & ROLES
// =============================================================================

/// `L8User`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
    pub roles: BTreeMap<String, bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Password {
    pub hash: String,
}

/// `L8Role`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub role_id: String,
    pub role_name: String,
    pub rules: BTreeMap<String, Rule>,
}

/// Permission rule: which actions are allowed or denied on an element type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rule {
    pub rule_id: String,
    pub elem_type: String,
    pub allowed: bool,
    /// Action code (`-999` all, `1` POST .. `5` GET) to enabled flag.
    pub actions: BTreeMap<String, bool>,
    pub attributes: BTreeMap<String, String>,
}

// =============================================================================
// TARGETS
// =============================================================================

/// `L8PTarget`: a polling target grouping one or more hosts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Target {
    pub target_id: String,
    pub links_id: String,
    pub hosts: BTreeMap<String, TargetHost>,
    pub state: i32,
    pub inventory_type: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetHost {
    pub host_id: String,
    pub configs: BTreeMap<String, HostConfig>,
}

/// Connection settings for one protocol on a host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    pub addr: String,
    pub port: u32,
    pub protocol: i32,
    pub cred_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Bulk start/stop request for every target of an inventory type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAction {
    pub action_type: i32,
    pub action_state: i32,
}

// =============================================================================
// NETWORK DEVICES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDevice {
    pub id: String,
    pub equipmentinfo: EquipmentInfo,
    pub physicals: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentInfo {
    pub sys_name: String,
    pub ip_address: String,
    /// Numeric enum or `DEVICE_TYPE_*` name.
    pub device_type: Value,
    /// Numeric enum or `DEVICE_STATUS_*` name.
    pub device_status: Value,
    pub location: String,
    /// Centiseconds since boot.
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub uptime: u64,
    pub vendor: String,
    pub model: String,
    pub series: String,
    pub family: String,
    pub software: String,
    pub serial_number: String,
    pub version: String,
    pub hardware: String,
    pub sys_oid: String,
}

// =============================================================================
// HEALTH
// =============================================================================

/// `L8Health`: liveness and traffic counters for one service process.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthRecord {
    pub alias: String,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub start_time: i64,
    pub stats: Option<HealthStats>,
    pub services: Option<HealthServices>,
    pub data: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthStats {
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub rx_msg_count: u64,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub rx_data_cont: u64,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub tx_msg_count: u64,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub tx_data_count: u64,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub memory_usage: u64,
    pub cpu_usage: f64,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub last_msg_time: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthServices {
    pub service_to_areas: BTreeMap<String, ServiceAreas>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAreas {
    pub areas: BTreeMap<String, bool>,
}

// =============================================================================
// KUBERNETES
// =============================================================================

/// Cached cluster snapshot; each resource kind is keyed by resource name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct K8sCluster {
    pub name: String,
    pub nodes: BTreeMap<String, Value>,
    pub pods: BTreeMap<String, Value>,
    pub deployments: BTreeMap<String, Value>,
    pub statefulsets: BTreeMap<String, Value>,
    pub daemonsets: BTreeMap<String, Value>,
    pub services: BTreeMap<String, Value>,
    pub namespaces: BTreeMap<String, Value>,
    pub networkpolicies: BTreeMap<String, Value>,
}

// =============================================================================
// LENIENT NUMBERS
// =============================================================================

fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| D::Error::custom(format!("expected unsigned integer, got {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("invalid integer string {s:?}: {e}"))),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| D::Error::custom(format!("invalid integer string {s:?}: {e}"))),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}
