use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// File holding database connection parameters, relative to the config dir
pub const DATABASE_FILE: &str = "database.yml";

/// File holding the shared request key and signing secret
pub const JWT_FILE: &str = "jwt.json";

const DEFAULT_EXPIRY_HOURS: u64 = 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid database settings: {0}")]
    InvalidDatabase(String),

    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Shape of `database.yml`: everything lives under a top-level `database` key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatabaseFile {
    database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Extra connection parameters in query-string form, e.g. `sslmode=disable`
    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared request key callers present to obtain a token
    pub key: String,
    /// HMAC signing secret
    pub secret: String,
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
}

fn default_expiry_hours() -> u64 {
    DEFAULT_EXPIRY_HOURS
}

impl AppConfig {
    /// Load both config files from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let database = DatabaseConfig::load(dir.join(DATABASE_FILE))?;
        let jwt = JwtConfig::load(dir.join(JWT_FILE))?;
        Ok(Self { database, jwt })
    }
}

impl DatabaseConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = read(path)?;
        let file: DatabaseFile = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.database)
    }

    /// Build a Postgres connection URL, percent-encoding the credentials
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| ConfigError::InvalidDatabase(e.to_string()))?;

        url.set_host(Some(&self.host))
            .map_err(|e| ConfigError::InvalidDatabase(format!("host '{}': {}", self.host, e)))?;
        url.set_port(Some(self.port))
            .map_err(|_| ConfigError::InvalidDatabase("port".to_string()))?;
        url.set_username(&self.username)
            .map_err(|_| ConfigError::InvalidDatabase("username".to_string()))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| ConfigError::InvalidDatabase("password".to_string()))?;
        }
        url.set_path(&format!("/{}", self.name));

        match self.config.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => url.set_query(Some(extra.trim_start_matches('?'))),
            _ => url.set_query(None),
        }

        Ok(url.into())
    }
}

impl JwtConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = read(path)?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Global singleton config - set once at startup, read-only afterwards
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Load config from `dir` into the process-wide slot
pub fn init(dir: impl AsRef<Path>) -> Result<&'static AppConfig, ConfigError> {
    let loaded = AppConfig::load(dir)?;
    install(loaded)
}

/// Install an already-built config into the process-wide slot
pub fn install(config: AppConfig) -> Result<&'static AppConfig, ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}
