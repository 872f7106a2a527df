//! Repository settings: local store, remotes, proxy, and the global config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use depdump_util::errors::DumpError;

/// Environment variable overriding the global config file location.
pub const CONFIG_ENV: &str = "DEPDUMP_CONFIG";

/// An HTTP proxy used for every remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
}

impl ProxySettings {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    /// Parse an `http_proxy`-style value: `[scheme://]host:port[/]`.
    ///
    /// The host is everything before the last `:`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim().trim_end_matches('/');
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);
        let (host, port) = without_scheme.rsplit_once(':')?;
        if host.is_empty() {
            return None;
        }
        let port = port.parse().ok()?;
        Some(Self::new(host, port))
    }

    /// Proxy from `http_proxy`, then `HTTP_PROXY`.
    pub fn from_env() -> Option<Self> {
        ["http_proxy", "HTTP_PROXY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::parse(&value))
    }

    /// `http://host:port`, as expected by HTTP clients.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl std::fmt::Display for ProxySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A remote repository with optional credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl RemoteEntry {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            username: None,
            password: None,
        }
    }
}

/// Where POMs are looked up and how remotes are reached.
#[derive(Debug, Clone)]
pub struct RepositorySettings {
    pub local_repo: PathBuf,
    pub remotes: Vec<RemoteEntry>,
    pub proxy: Option<ProxySettings>,
    /// Only the local repository is consulted.
    pub offline: bool,
}

impl RepositorySettings {
    pub fn new(local_repo: &Path) -> Self {
        Self {
            local_repo: local_repo.to_path_buf(),
            remotes: Vec::new(),
            proxy: None,
            offline: false,
        }
    }

    /// Merge repositories, credentials and proxy from the global config.
    ///
    /// A proxy already set on `self` takes precedence over the file.
    pub fn apply_global(&mut self, global: &GlobalConfig) {
        for (name, url) in &global.repositories {
            let mut entry = RemoteEntry::new(name, url);
            if let Some(cred) = global.credentials.get(name) {
                entry.username = cred.username.clone();
                entry.password = cred.password.clone();
            }
            self.remotes.push(entry);
        }
        if self.proxy.is_none() {
            self.proxy = global.proxy.clone();
        }
    }
}

/// Global user configuration loaded from `~/.depdump/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub repositories: BTreeMap<String, String>,

    #[serde(default)]
    pub credentials: BTreeMap<String, CredentialEntry>,

    #[serde(default)]
    pub proxy: Option<ProxySettings>,
}

/// Credential entry for a named repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| DumpError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content).map_err(|e| {
            DumpError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `$DEPDUMP_CONFIG`, else `~/.depdump/config.toml`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the depdump data directory (`~/.depdump/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".depdump")
}
