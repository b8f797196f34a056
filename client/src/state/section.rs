//! Section routing: name → fragment URL → initializers.
//!
//! DESIGN
//! ======
//! The console swaps named sections into one content region. Each section is
//! a static HTML fragment served under `/sections/`, optionally followed by
//! interactive views mounted below it. Resolution is a fixed table; anything
//! not in it renders the error block instead of failing.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

/// Section shown right after login.
pub const DEFAULT_SECTION: &str = "dashboard";
const FRAGMENT_DIR: &str = "/sections";

pub const NOT_FOUND_MESSAGE: &str = "Section not found.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load section content.";

/// Navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionInfo {
    pub name: &'static str,
    pub label: &'static str,
}

/// Every routable section, in navigation order.
pub const SECTIONS: [SectionInfo; 14] = [
    SectionInfo { name: "dashboard", label: "Dashboard" },
    SectionInfo { name: "inventory", label: "Inventory" },
    SectionInfo { name: "network", label: "Network Devices" },
    SectionInfo { name: "gpus", label: "GPUs" },
    SectionInfo { name: "hosts", label: "Hosts" },
    SectionInfo { name: "kubernetes", label: "Kubernetes" },
    SectionInfo { name: "infrastructure", label: "Infrastructure" },
    SectionInfo { name: "topologies", label: "Topologies" },
    SectionInfo { name: "events", label: "Events" },
    SectionInfo { name: "automation", label: "Automation" },
    SectionInfo { name: "applications", label: "Applications" },
    SectionInfo { name: "analytics", label: "Analytics" },
    SectionInfo { name: "security", label: "Security" },
    SectionInfo { name: "system", label: "System" },
];

/// Behavior attached to a section after its fragment is in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionInit {
    Dashboard,
    NetworkDevices,
    Kubernetes,
    Health,
    /// Users / roles / credentials / targets tab switcher.
    SecurityTabs,
    Parallax,
}

/// Fragment path for a known section, relative to the site root.
pub fn fragment_path(name: &str) -> Option<String> {
    SECTIONS.iter().find(|s| s.name == name).map(|s| format!("{FRAGMENT_DIR}/{}.html", s.name))
}

/// Fragment URL with a `?t=<millis>` cache-buster.
pub fn fragment_url(name: &str, now_ms: i64) -> Option<String> {
    fragment_path(name).map(|path| format!("{path}?t={now_ms}"))
}

/// Initializers registered for `name`, in run order.
pub fn initializers(name: &str) -> &'static [SectionInit] {
    match name {
        "dashboard" => &[SectionInit::Dashboard],
        "network" => &[SectionInit::NetworkDevices, SectionInit::Parallax],
        "kubernetes" => &[SectionInit::Kubernetes],
        "system" => &[SectionInit::Health, SectionInit::Parallax],
        "security" => &[SectionInit::SecurityTabs, SectionInit::Parallax],
        "inventory" => &[SectionInit::Parallax],
        _ => &[],
    }
}

/// Inline error markup shown in place of a fragment.
pub fn error_block(message: &str) -> String {
    format!(
        "<div class=\"section-container\"><h2 class=\"section-title\">Error</h2>\
         <div class=\"section-content\">{message}</div></div>"
    )
}

/// What the content region currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionContent {
    /// Fetch in flight; the region is faded out.
    Loading { name: String },
    Loaded { name: String, html: String },
    NotFound { name: String },
    Failed { name: String },
}

impl SectionContent {
    pub fn name(&self) -> &str {
        match self {
            Self::Loading { name } | Self::Loaded { name, .. } | Self::NotFound { name } | Self::Failed { name } => name,
        }
    }

    /// Markup for the content region.
    pub fn html(&self) -> String {
        match self {
            Self::Loading { .. } => String::new(),
            Self::Loaded { html, .. } => html.clone(),
            Self::NotFound { .. } => error_block(NOT_FOUND_MESSAGE),
            Self::Failed { .. } => error_block(LOAD_FAILED_MESSAGE),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Loading { .. })
    }

    /// Initializers to mount; only a loaded fragment gets any.
    pub fn initializers(&self) -> &'static [SectionInit] {
        match self {
            Self::Loaded { name, .. } => initializers(name),
            _ => &[],
        }
    }
}

/// First step of a section switch: `NotFound` for unknown names, `Loading`
/// plus the URL to fetch otherwise.
pub fn begin_load(name: &str, now_ms: i64) -> (SectionContent, Option<String>) {
    match fragment_url(name, now_ms) {
        Some(url) => (SectionContent::Loading { name: name.to_owned() }, Some(url)),
        None => {
            log::warn!("unknown section {name}");
            (SectionContent::NotFound { name: name.to_owned() }, None)
        }
    }
}

/// Final step of a section switch once the fetch settled.
pub fn finish_load(name: &str, result: Result<String, String>) -> SectionContent {
    match result {
        Ok(html) => SectionContent::Loaded { name: name.to_owned(), html },
        Err(e) => {
            log::error!("section {name} failed to load: {e}");
            SectionContent::Failed { name: name.to_owned() }
        }
    }
}

/// Fetch the raw fragment markup.
///
/// # Errors
///
/// Returns a description of the transport failure or non-OK status.
#[allow(clippy::unused_async)]
pub async fn fetch_fragment(url: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("status {}", resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err("not available on server".to_owned())
    }
}
