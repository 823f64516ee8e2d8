//! Server configuration with validation.
//!
//! Loaded from a TOML file, then overridden from the environment, then
//! validated before any listener is bound.
//!
//! ```toml
//! [system]
//! listen = "0.0.0.0:8000"
//! db_path = "data/taxii.db"
//!
//! [services]
//! discovery = "/services/discovery/"
//! collection = "/services/collection/"
//! poll = "/services/poll/"
//! admin = "/admin/"
//!
//! [poll.feeds]
//! et-compromised-ips = "https://rules.emergingthreats.net/blockrules/compromised-ips.txt"
//! ```
//!
//! A service whose path is empty is not mounted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `system.listen`.
pub const ENV_LISTEN: &str = "TAXII_LISTEN";
/// Environment variable overriding `system.db_path`.
pub const ENV_DB_PATH: &str = "TAXII_DB_PATH";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TAXII_LOG_LEVEL";

/// Path always mounted for liveness checks.
pub const HEALTH_PATH: &str = "/health";

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener and catalog location
    pub system: SystemConfig,
    /// Log verbosity
    pub logging: LoggingConfig,
    /// HTTP paths of the protocol services and the admin trigger
    pub services: ServicesConfig,
    /// Values advertised in Collection responses
    pub collection: CollectionConfig,
    /// Values used to build Poll responses
    pub poll: PollConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Boot behaviour
    pub startup: StartupConfig,
}

impl ServerConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply `TAXII_*` overrides, looking each key up through `lookup`.
    ///
    /// Production passes `|key| std::env::var(key).ok()`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(listen) = lookup(ENV_LISTEN) {
            self.system.listen = listen.parse().map_err(|_| ConfigError::InvalidOverride {
                key: ENV_LISTEN,
                value: listen.clone(),
            })?;
        }
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.system.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let routes = self.services.protocol_routes();
        if routes.is_empty() {
            return Err(ConfigError::NoServices);
        }

        // Every mounted path must be usable as a literal axum route and unique
        let mut seen: HashSet<&str> = HashSet::from([HEALTH_PATH]);
        let admin = (!self.services.admin.is_empty()).then_some(("admin", self.services.admin.as_str()));
        for (service, path) in routes.iter().map(|(r, p)| (r.name(), *p)).chain(admin) {
            validate_path(service, path)?;
            if !seen.insert(path) {
                return Err(ConfigError::DuplicatePath(path.to_string()));
            }
        }

        // Validate limits
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }
        if self.collection.volume == 0 {
            return Err(ConfigError::InvalidLimit("collection volume cannot be 0".into()));
        }

        // Validate timeouts
        if self.timeouts.request.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        if self.timeouts.feed.is_zero() {
            return Err(ConfigError::InvalidTimeout("feed timeout cannot be 0".into()));
        }

        for (collection, url) in &self.poll.feeds {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidFeed {
                    collection: collection.clone(),
                    url: url.clone(),
                });
            }
        }

        Ok(())
    }
}

fn validate_path(service: &'static str, path: &str) -> Result<(), ConfigError> {
    let reason = if !path.starts_with('/') {
        Some("must start with '/'")
    } else if path.contains([':', '*', '{', '}']) {
        Some("must not contain route parameters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidPath {
            service,
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Listener and catalog location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Bind address
    pub listen: SocketAddr,
    /// SQLite catalog file
    pub db_path: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000),
            db_path: PathBuf::from("data/taxii.db"),
        }
    }
}

/// Log verbosity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, superseded by `RUST_LOG` when set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// The three protocol services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRoute {
    Discovery,
    Collection,
    Poll,
}

impl ServiceRoute {
    pub fn name(self) -> &'static str {
        match self {
            ServiceRoute::Discovery => "discovery",
            ServiceRoute::Collection => "collection",
            ServiceRoute::Poll => "poll",
        }
    }
}

/// HTTP paths; an empty string leaves the service unmounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub discovery: String,
    pub collection: String,
    pub poll: String,
    /// Admin trigger path (no TAXII header checks)
    pub admin: String,
}

impl ServicesConfig {
    /// Mounted protocol services and their paths.
    pub fn protocol_routes(&self) -> Vec<(ServiceRoute, &str)> {
        [
            (ServiceRoute::Discovery, self.discovery.as_str()),
            (ServiceRoute::Collection, self.collection.as_str()),
            (ServiceRoute::Poll, self.poll.as_str()),
        ]
        .into_iter()
        .filter(|(_, path)| !path.is_empty())
        .collect()
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            discovery: "/services/discovery/".to_string(),
            collection: "/services/collection/".to_string(),
            poll: "/services/poll/".to_string(),
            admin: "/admin/".to_string(),
        }
    }
}

/// Values advertised for every collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Address clients should send Poll requests to
    pub poll_service_address: String,
    /// Advertised volume
    pub volume: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            poll_service_address: "http://localhost:8000/services/poll/".to_string(),
            volume: 1,
        }
    }
}

/// Values used to build Poll responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub result_id: String,
    pub message: String,
    /// Pretty-print generated content payloads
    pub indent: bool,
    /// Collection name → line-oriented remote feed URL
    pub feeds: BTreeMap<String, String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            result_id: "taxii-exchange-poll-1".to_string(),
            message: "Poll results from the TAXII exchange".to_string(),
            indent: true,
            feeds: BTreeMap::new(),
        }
    }
}

/// Request validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size (bytes)
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1 MB
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout
    #[serde(with = "humantime_serde")]
    pub request: Duration,
    /// Remote feed fetch timeout
    #[serde(with = "humantime_serde")]
    pub feed: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            feed: Duration::from_secs(10),
        }
    }
}

/// Boot behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Mark the service registry dirty at boot so the first Discovery loads it
    pub load_services: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            load_services: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema
    #[error("cannot parse configuration: {0}")]
    Parse(String),
    /// Every protocol service path is empty
    #[error("No TAXII services are defined")]
    NoServices,
    /// A path that cannot be mounted
    #[error("invalid {service} path {path:?}: {reason}")]
    InvalidPath {
        service: &'static str,
        path: String,
        reason: &'static str,
    },
    /// Two services share a path
    #[error("path {0:?} is configured more than once")]
    DuplicatePath(String),
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Environment override with an unusable value
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },
    /// Feed URL that is not http(s)
    #[error("invalid feed url {url:?} for collection {collection}")]
    InvalidFeed { collection: String, url: String },
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .ok()
                .and_then(|m| m.checked_mul(60))
                .map(Duration::from_secs)
                .ok_or("invalid minutes")
        } else {
            // Try parsing as plain seconds
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
