//! Configuration loading and root folder resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable TOML file is never fatal: a warning is logged and
//! the remaining tiers are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the shared root folder
pub const ROOT_FOLDER_ENV: &str = "FSND_ROOT_FOLDER";

/// Environment variable overriding the TOML config file location
pub const CONFIG_FILE_ENV: &str = "FSND_CONFIG";

/// Environment variable for the log level shared by all services
pub const LOG_LEVEL_ENV: &str = "FSND_LOG_LEVEL";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`
///
/// ```toml
/// root_folder = "/srv/fsnd"
/// log_level = "debug"
///
/// [fyyur]
/// port = 5000
///
/// [trivia]
/// host = "0.0.0.0"
/// port = 5001
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub log_level: Option<String>,
    /// Per-service tables, keyed by service name
    #[serde(flatten)]
    pub services: BTreeMap<String, ServiceSection>,
}

/// `[<service>]` table of the TOML config
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServiceSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load from a path
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn service(&self, name: &str) -> Option<&ServiceSection> {
        self.services.get(name)
    }
}

/// Values supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub service: String,
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// SQLite database file of this service inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(format!("{}.db", self.service))
    }

    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolves a [`ServiceConfig`] for a named service
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    service: String,
    default_port: u16,
    cli: CliOverrides,
}

impl ConfigResolver {
    pub fn new(service: &str, default_port: u16) -> Self {
        Self {
            service: service.to_string(),
            default_port,
            cli: CliOverrides::default(),
        }
    }

    pub fn with_cli(mut self, cli: CliOverrides) -> Self {
        self.cli = cli;
        self
    }

    /// Environment variable carrying this service's port, e.g. `FSND_TRIVIA_PORT`
    pub fn port_env_var(&self) -> String {
        format!("FSND_{}_PORT", self.service.to_uppercase())
    }

    /// Environment variable carrying this service's host, e.g. `FSND_FYYUR_HOST`
    pub fn host_env_var(&self) -> String {
        format!("FSND_{}_HOST", self.service.to_uppercase())
    }

    /// Resolve using the config file found on this machine (if any)
    pub fn resolve(&self) -> ServiceConfig {
        let toml = match locate_config_file() {
            Some(path) => match TomlConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring config file {}: {}", path.display(), e);
                    TomlConfig::default()
                }
            },
            None => TomlConfig::default(),
        };
        self.resolve_with(&toml)
    }

    /// Resolve against an already loaded TOML config
    pub fn resolve_with(&self, toml: &TomlConfig) -> ServiceConfig {
        let section = toml.service(&self.service);

        let root_folder = self
            .cli
            .root_folder
            .clone()
            .or_else(|| std::env::var(ROOT_FOLDER_ENV).ok().map(PathBuf::from))
            .or_else(|| toml.root_folder.clone())
            .unwrap_or_else(default_root_folder);

        let host = self
            .cli
            .host
            .clone()
            .or_else(|| std::env::var(self.host_env_var()).ok())
            .or_else(|| section.and_then(|s| s.host.clone()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = self
            .cli
            .port
            .or_else(|| self.env_port())
            .or_else(|| section.and_then(|s| s.port))
            .unwrap_or(self.default_port);

        let log_level = self
            .cli
            .log_level
            .clone()
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| section.and_then(|s| s.log_level.clone()))
            .or_else(|| toml.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        ServiceConfig {
            service: self.service.clone(),
            root_folder,
            host,
            port,
            log_level,
        }
    }

    fn env_port(&self) -> Option<u16> {
        let var = self.port_env_var();
        let raw = std::env::var(&var).ok()?;
        match raw.parse() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!("Ignoring {}={:?}: not a valid port", var, raw);
                None
            }
        }
    }
}

/// Find the config file for this platform
///
/// `FSND_CONFIG` wins; otherwise the user config dir is tried before
/// `/etc/fsnd/config.toml`.
fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        warn!("{} points at missing file {}", CONFIG_FILE_ENV, path.display());
        return None;
    }

    let user_config = dirs::config_dir().map(|d| d.join("fsnd").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/fsnd/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fsnd"))
        .unwrap_or_else(|| PathBuf::from("./fsnd_data"))
}
