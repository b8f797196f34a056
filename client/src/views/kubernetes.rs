//! Kubernetes clusters from the cluster cache: one tab per cluster, one
//! table per resource kind, and a detail dialog for any row.

#[cfg(test)]
#[path = "kubernetes_test.rs"]
mod kubernetes_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::Value;

use crate::components::data_table::DataTable;
use crate::components::detail::{DetailRow, DetailSection};
use crate::components::modal::Modal;
use crate::components::tab_strip::{Tab, TabStrip};
use crate::net::types::K8sCluster;
use crate::state::config::ConsoleConfig;
use crate::state::modal::ModalSize;
use crate::state::table::{Cell, Column, Row, TableConfig, TableState, value_text};
use crate::views::common::load_records;

pub const CLUSTERS_QUERY: &str = "select * from K8sCluster";
/// Shown, empty, when the cache has no clusters yet.
pub const FALLBACK_CLUSTER: &str = "production";

const STATUS_OPERATIONAL: &str = "status-operational";
const STATUS_WARNING: &str = "status-warning";
const STATUS_CRITICAL: &str = "status-critical";

/// Pod phase names indexed by their wire value.
pub const POD_STATUSES: [&str; 12] = [
    "Invalid_Pod_Status",
    "Running",
    "Pending",
    "Succeeded",
    "Failed",
    "Unknown",
    "CrashLoopBackOff",
    "Terminating",
    "ContainerCreating",
    "ImagePullBackOff",
    "Error",
    "Completed",
];

/// Pod status as text: strings pass through, numbers map onto
/// [`POD_STATUSES`], anything else is `Unknown`.
pub fn pod_status_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| POD_STATUSES.get(i))
            .unwrap_or(&"Unknown")
            .to_string(),
        _ => "Unknown".to_owned(),
    }
}

pub fn pod_status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "running" | "succeeded" | "completed" => STATUS_OPERATIONAL,
        "failed" | "error" | "crashloopbackoff" | "imagepullbackoff" | "unknown" | "invalid_pod_status" => {
            STATUS_CRITICAL
        }
        _ => STATUS_WARNING,
    }
}

/// `(ready, total)` from either `{count, outof}` or a `"1/2"` string.
pub fn ready_counts(value: &Value) -> (u64, u64) {
    match value {
        Value::Object(map) => {
            let field = |k: &str| map.get(k).and_then(Value::as_u64).unwrap_or(0);
            (field("count"), field("outof"))
        }
        Value::String(s) => {
            let mut parts = s.split('/').map(|p| p.trim().parse::<u64>().unwrap_or(0));
            (parts.next().unwrap_or(0), parts.next().unwrap_or(0))
        }
        _ => (0, 0),
    }
}

pub fn ready_cell(value: &Value) -> Cell {
    let (count, outof) = ready_counts(value);
    let class = if count == outof {
        STATUS_OPERATIONAL
    } else if count > 0 {
        STATUS_WARNING
    } else {
        STATUS_CRITICAL
    };
    Cell::Badge { class: class.to_owned(), text: format!("{count}/{outof}") }
}

/// Restart count, with the "ago" suffix when the record carries one.
pub fn restarts_text(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let count = map.get("count").and_then(Value::as_u64).unwrap_or(0);
            let ago = map.get("ago").map(value_text).unwrap_or_default();
            format!("{count} {ago}").trim_end().to_owned()
        }
        other => value_text(other),
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Nodes,
    Pods,
    Deployments,
    StatefulSets,
    DaemonSets,
    Services,
    Namespaces,
    NetworkPolicies,
}

impl Resource {
    pub const ALL: [Self; 8] = [
        Self::Nodes,
        Self::Pods,
        Self::Deployments,
        Self::StatefulSets,
        Self::DaemonSets,
        Self::Services,
        Self::Namespaces,
        Self::NetworkPolicies,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Pods => "pods",
            Self::Deployments => "deployments",
            Self::StatefulSets => "statefulsets",
            Self::DaemonSets => "daemonsets",
            Self::Services => "services",
            Self::Namespaces => "namespaces",
            Self::NetworkPolicies => "networkpolicies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nodes => "Nodes",
            Self::Pods => "Pods",
            Self::Deployments => "Deployments",
            Self::StatefulSets => "StatefulSets",
            Self::DaemonSets => "DaemonSets",
            Self::Services => "Services",
            Self::Namespaces => "Namespaces",
            Self::NetworkPolicies => "Network Policies",
        }
    }

    /// Singular name used in detail dialog titles.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Nodes => "Node",
            Self::Pods => "Pod",
            Self::Deployments => "Deployment",
            Self::StatefulSets => "StatefulSet",
            Self::DaemonSets => "DaemonSet",
            Self::Services => "Service",
            Self::Namespaces => "Namespace",
            Self::NetworkPolicies => "Network Policy",
        }
    }

    /// Unknown keys fall back to nodes.
    pub fn from_key(key: &str) -> Self {
        Self::ALL.into_iter().find(|r| r.key() == key).unwrap_or(Self::Nodes)
    }

    pub fn records(self, cluster: &K8sCluster) -> &BTreeMap<String, Value> {
        match self {
            Self::Nodes => &cluster.nodes,
            Self::Pods => &cluster.pods,
            Self::Deployments => &cluster.deployments,
            Self::StatefulSets => &cluster.statefulsets,
            Self::DaemonSets => &cluster.daemonsets,
            Self::Services => &cluster.services,
            Self::Namespaces => &cluster.namespaces,
            Self::NetworkPolicies => &cluster.networkpolicies,
        }
    }

    pub fn columns(self) -> Vec<Column> {
        let ns = || Column::new("namespace", "NAMESPACE");
        let name = || Column::new("name", "NAME");
        let age = || Column::new("age", "AGE");
        let plain = Column::new;
        match self {
            Self::Nodes => vec![
                name(),
                plain("roles", "ROLES"),
                age(),
                plain("version", "VERSION"),
                plain("internalIp", "INTERNAL-IP"),
                plain("externalIp", "EXTERNAL-IP"),
                plain("osImage", "OS-IMAGE"),
                plain("kernelVersion", "KERNEL-VERSION"),
                plain("containerRuntime", "CONTAINER-RUNTIME"),
            ],
            Self::Pods => vec![
                ns(),
                name(),
                plain("ready", "READY").format(|value, _| ready_cell(value)),
                plain("status", "STATUS").format(|value, _| {
                    let text = pod_status_text(value);
                    Cell::Badge { class: pod_status_class(&text).to_owned(), text }
                }),
                plain("restarts", "RESTARTS").format(|value, _| Cell::text(restarts_text(value))),
                age(),
                plain("ip", "IP"),
                plain("node", "NODE"),
                plain("nominatedNode", "NOMINATED NODE"),
                plain("readinessGates", "READINESS GATES"),
            ],
            Self::Deployments => vec![
                ns(),
                name(),
                plain("ready", "READY"),
                plain("upToDate", "UP-TO-DATE"),
                plain("available", "AVAILABLE"),
                age(),
                plain("containers", "CONTAINERS"),
                plain("images", "IMAGES"),
                plain("selector", "SELECTOR"),
            ],
            Self::StatefulSets => vec![
                ns(),
                name(),
                plain("ready", "READY"),
                age(),
                plain("containers", "CONTAINERS"),
                plain("images", "IMAGES"),
            ],
            Self::DaemonSets => vec![
                ns(),
                name(),
                plain("desired", "DESIRED"),
                plain("current", "CURRENT"),
                plain("ready", "READY"),
                plain("upToDate", "UP-TO-DATE"),
                plain("available", "AVAILABLE"),
                plain("nodeSelector", "NODE SELECTOR"),
                age(),
                plain("containers", "CONTAINERS"),
                plain("images", "IMAGES"),
                plain("selector", "SELECTOR"),
            ],
            Self::Services => vec![
                ns(),
                name(),
                plain("type", "TYPE"),
                plain("clusterIp", "CLUSTER-IP"),
                plain("externalIp", "EXTERNAL-IP"),
                plain("ports", "PORT(S)"),
                age(),
                plain("selector", "SELECTOR"),
            ],
            Self::Namespaces => vec![name(), plain("status", "STATUS"), age()],
            Self::NetworkPolicies => vec![ns(), name(), plain("podSelector", "POD-SELECTOR"), age()],
        }
    }

    pub fn table_config(self) -> TableConfig {
        TableConfig::new(self.columns()).empty_message(&format!("No {} found.", self.label().to_lowercase()))
    }
}

/// Table rows for one resource kind; entries that are not objects are skipped.
pub fn resource_rows(cluster: &K8sCluster, resource: Resource) -> Vec<Row> {
    resource
        .records(cluster)
        .values()
        .filter_map(|value| value.as_object().cloned())
        .collect()
}

/// `(label, count)` per resource kind for the cluster header.
pub fn cluster_stats(cluster: &K8sCluster) -> Vec<(&'static str, usize)> {
    Resource::ALL.into_iter().map(|r| (r.label(), r.records(cluster).len())).collect()
}

/// Clusters to show: the fetched list, or one empty fallback cluster.
pub fn clusters_or_fallback(list: Vec<K8sCluster>) -> Vec<K8sCluster> {
    if list.is_empty() {
        vec![K8sCluster { name: FALLBACK_CLUSTER.to_owned(), ..K8sCluster::default() }]
    } else {
        list
    }
}

/// Label/value pairs for the detail dialog; nested values are shown as JSON.
pub fn detail_fields(row: &Row) -> Vec<(String, String)> {
    row.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Object(_) | Value::Array(_) => value.to_string(),
                other => value_text(other),
            };
            (key.clone(), if text.is_empty() { "-".to_owned() } else { text })
        })
        .collect()
}

// =============================================================================
// VIEW
// =============================================================================

#[component]
pub fn KubernetesView() -> impl IntoView {
    let config = expect_context::<RwSignal<ConsoleConfig>>();
    let endpoint = config.with_untracked(|c| c.api.clusters_endpoint());
    let clusters = RwSignal::new(Vec::<K8sCluster>::new());
    let active = RwSignal::new(String::new());

    load_records(endpoint, CLUSTERS_QUERY, "Failed to fetch clusters", move |list: Vec<K8sCluster>| {
        let list = clusters_or_fallback(list);
        if let Some(first) = list.first() {
            active.set(first.name.clone());
        }
        clusters.set(list);
    });

    let tabs = move || {
        clusters
            .get()
            .into_iter()
            .map(|cluster| {
                let (key, name) = (cluster.name.clone(), cluster.name);
                let is_active = key.clone();
                view! {
                    <button
                        class="cluster-tab"
                        class:active=move || active.with(|a| *a == is_active)
                        on:click=move |_| active.set(key.clone())
                    >
                        <span class="cluster-status status-operational"></span>
                        <span class="cluster-name">{name}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let panel = move || {
        let name = active.get();
        clusters
            .with(|list| list.iter().find(|c| c.name == name).cloned())
            .map(|cluster| view! { <ClusterPanel cluster=cluster/> })
    };

    view! {
        <div class="kubernetes-view">
            <div class="k8s-cluster-tabs">{tabs}</div>
            <div class="k8s-main-content">{panel}</div>
        </div>
    }
}

#[component]
fn ClusterPanel(cluster: K8sCluster) -> impl IntoView {
    let resource = RwSignal::new(Resource::Nodes.key().to_owned());
    let selected = RwSignal::new(None::<(Resource, Row)>);
    let name = cluster.name.clone();
    let cluster = StoredValue::new(cluster);

    let stats = cluster.with_value(cluster_stats).into_iter().map(|(label, count)| {
        view! { <span class="stat-item"><strong>{format!("{label}:")}</strong>{format!(" {count}")}</span> }
    });
    let stats = stats.collect_view();

    let table = move || {
        let kind = Resource::from_key(&resource.get());
        let mut state = TableState::new(kind.table_config());
        state.set_data(cluster.with_value(|c| resource_rows(c, kind)));
        let state = RwSignal::new(state);
        view! {
            <DataTable state=state on_row_click=Callback::new(move |row: Row| selected.set(Some((kind, row))))/>
        }
    };

    view! {
        <div class="cluster-content active">
            <div class="cluster-header">
                <h3>{format!("{name} Cluster")}</h3>
                <div class="cluster-stats">{stats}</div>
            </div>
            <TabStrip tabs=Resource::ALL.into_iter().map(|r| Tab::new(r.key(), r.label())).collect() active=resource/>
            <div class="resource-content active">{table}</div>
            {move || selected.get().map(|(kind, row)| view! {
                <ResourceDetail kind=kind row=row on_close=Callback::new(move |()| selected.set(None))/>
            })}
        </div>
    }
}

#[component]
fn ResourceDetail(kind: Resource, row: Row, on_close: Callback<()>) -> impl IntoView {
    let name = row.get("name").map(value_text).unwrap_or_default();
    let rows = detail_fields(&row)
        .into_iter()
        .map(|(label, value)| view! { <DetailRow label=label value=value/> })
        .collect_view();

    view! {
        <Modal id="k8s-detail" title=format!("{} - {name}", kind.singular()) size=ModalSize::Large on_close=on_close>
            <DetailSection title=format!("{} Details", kind.singular())>{rows}</DetailSection>
        </Modal>
    }
}
