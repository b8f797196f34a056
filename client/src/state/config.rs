//! Console configuration loaded from `login.json`.
//!
//! DESIGN
//! ======
//! The shell fetches `login.json` once and provides the parsed value through
//! context, so every domain view builds its endpoints from the same explicit
//! configuration. Missing or empty fields fall back to the stock Probler
//! paths; an unreadable file falls back entirely.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// Path of the configuration document served next to the shell.
pub const CONFIG_URL: &str = "/login.json";

const DEFAULT_PREFIX: &str = "/probler";
const DEFAULT_CREDS_PATH: &str = "/75/Creds";
const DEFAULT_USERS_PATH: &str = "/73/users";
const DEFAULT_ROLES_PATH: &str = "/74/roles";
const DEFAULT_TARGETS_PATH: &str = "/91/Targets";
const DEFAULT_DEVICES_PATH: &str = "/0/NCache";
const DEFAULT_HEALTH_PATH: &str = "/0/Health";
const DEFAULT_REGISTRY_PATH: &str = "/registry";
const DEFAULT_CLUSTERS_PATH: &str = "/1/KCache";

/// API path prefixes for every backend resource the console queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub prefix: String,
    pub creds_path: String,
    pub users_path: String,
    pub roles_path: String,
    pub targets_path: String,
    pub devices_path: String,
    pub health_path: String,
    pub registry_path: String,
    pub clusters_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            creds_path: DEFAULT_CREDS_PATH.to_owned(),
            users_path: DEFAULT_USERS_PATH.to_owned(),
            roles_path: DEFAULT_ROLES_PATH.to_owned(),
            targets_path: DEFAULT_TARGETS_PATH.to_owned(),
            devices_path: DEFAULT_DEVICES_PATH.to_owned(),
            health_path: DEFAULT_HEALTH_PATH.to_owned(),
            registry_path: DEFAULT_REGISTRY_PATH.to_owned(),
            clusters_path: DEFAULT_CLUSTERS_PATH.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Replace empty fields with their defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        let pairs = [
            (&mut self.prefix, defaults.prefix),
            (&mut self.creds_path, defaults.creds_path),
            (&mut self.users_path, defaults.users_path),
            (&mut self.roles_path, defaults.roles_path),
            (&mut self.targets_path, defaults.targets_path),
            (&mut self.devices_path, defaults.devices_path),
            (&mut self.health_path, defaults.health_path),
            (&mut self.registry_path, defaults.registry_path),
            (&mut self.clusters_path, defaults.clusters_path),
        ];
        for (field, fallback) in pairs {
            if field.trim().is_empty() {
                *field = fallback;
            }
        }
        self
    }

    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.prefix.trim_end_matches('/'))
    }

    pub fn creds_endpoint(&self) -> String {
        self.join(&self.creds_path)
    }

    pub fn users_endpoint(&self) -> String {
        self.join(&self.users_path)
    }

    pub fn roles_endpoint(&self) -> String {
        self.join(&self.roles_path)
    }

    pub fn targets_endpoint(&self) -> String {
        self.join(&self.targets_path)
    }

    pub fn devices_endpoint(&self) -> String {
        self.join(&self.devices_path)
    }

    pub fn health_endpoint(&self) -> String {
        self.join(&self.health_path)
    }

    pub fn clusters_endpoint(&self) -> String {
        self.join(&self.clusters_path)
    }

    /// The type registry is served outside the API prefix.
    pub fn registry_endpoint(&self) -> String {
        self.registry_path.clone()
    }
}

/// Login screen presentation and flow settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginConfig {
    pub app_title: String,
    pub app_description: String,
    pub auth_endpoint: String,
    pub redirect_url: String,
    pub show_remember_me: bool,
    pub show_register: bool,
    /// Minutes until the console logs out; zero disables the timer.
    pub session_timeout: u32,
    pub tfa_enabled: bool,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            app_title: "Security Console".to_owned(),
            app_description: "User & Role Management System".to_owned(),
            auth_endpoint: "/auth".to_owned(),
            redirect_url: "/".to_owned(),
            show_remember_me: true,
            show_register: true,
            session_timeout: 30,
            tfa_enabled: true,
        }
    }
}

/// Whole `login.json` document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub login: LoginConfig,
    pub api: ApiConfig,
}

impl ConsoleConfig {
    /// Parse a `login.json` body.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body is not a JSON object of the
    /// expected shape.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.api = config.api.normalized();
        Ok(config)
    }

    /// Fetch `login.json`, falling back to defaults on any failure.
    pub async fn load() -> Self {
        #[cfg(feature = "hydrate")]
        {
            match fetch_raw().await {
                Ok(raw) => match Self::parse(&raw) {
                    Ok(config) => config,
                    Err(e) => {
                        log::error!("invalid {CONFIG_URL}: {e}");
                        Self::default()
                    }
                },
                Err(e) => {
                    log::error!("error loading configuration: {e}");
                    Self::default()
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch_raw() -> Result<String, String> {
    let resp = gloo_net::http::Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("failed to load configuration: {}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
}
