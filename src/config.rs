use crate::auth::FixedCredentials;
use crate::persistence::{FileStorage, MemoryStorage, PersistenceResult, Storage};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const APP_NAME: &str = "class-planner";

const CONFIG_ENV: &str = "CLASS_PLANNER_CONFIG";
const DATA_PATH_ENV: &str = "CLASS_PLANNER_DATA_PATH";
const BACKEND_ENV: &str = "CLASS_PLANNER_BACKEND";
const HTTP_ADDR_ENV: &str = "CLASS_PLANNER_HTTP_ADDR";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config file at {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "invalid config: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(ConfigError::Invalid(format!(
                "unknown storage backend '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend, database file for sqlite.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub storage: StorageConfig,
    pub http: HttpConfig,
    pub admin: FixedCredentials,
}

impl FromStr for PlannerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl PlannerConfig {
    /// Resolves the config file (explicit path, then `CLASS_PLANNER_CONFIG`,
    /// then the user config dir) and applies environment overrides. A missing
    /// file in the user config dir yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "reading config");
        std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .parse()
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(backend) = std::env::var(BACKEND_ENV) {
            self.storage.backend = backend.parse()?;
        }
        if let Some(path) = std::env::var_os(DATA_PATH_ENV) {
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Ok(addr) = std::env::var(HTTP_ADDR_ENV) {
            self.http.addr = addr.parse().map_err(|err| {
                ConfigError::Invalid(format!("{HTTP_ADDR_ENV}='{addr}': {err}"))
            })?;
        }
        Ok(())
    }

    pub fn credentials(&self) -> FixedCredentials {
        self.admin.clone()
    }

    /// Opens the configured backend. The file backend falls back to the user
    /// data dir when no path is set.
    pub fn open_storage(&self) -> PersistenceResult<Box<dyn Storage>> {
        match self.storage.backend {
            StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
            StorageBackend::File => {
                let dir = self
                    .storage
                    .path
                    .clone()
                    .or_else(default_data_dir)
                    .unwrap_or_else(|| PathBuf::from(APP_NAME));
                tracing::info!(dir = %dir.display(), "using file storage");
                Ok(Box::new(FileStorage::new(dir)?))
            }
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => {
                let file = self.storage.path.clone().unwrap_or_else(|| {
                    default_data_dir()
                        .unwrap_or_else(|| PathBuf::from(APP_NAME))
                        .join("planner.sqlite3")
                });
                if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                tracing::info!(file = %file.display(), "using sqlite storage");
                Ok(Box::new(crate::persistence::SqliteStorage::new(file)?))
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME))
}
