use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mysql,
    Sqlite,
}

/// Repository manager configuration for database connections.
///
/// **Secret handling**: the MySQL password should be provided via configuration
/// (resolved at config load time) or environment variable:
/// - `PQ_DB_PASSWORD` - database password (required for the mysql backend)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RepositoryManagerConfigRaw {
    pub backend: DatabaseBackend,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub host: String,
    pub port: u16,
    /// Database file for the sqlite backend. `None` keeps the store in memory.
    pub sqlite_path: Option<PathBuf>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl RepositoryManagerConfigRaw {
    pub fn resolve(self) -> Result<RepositoryManagerConfig, ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_connections must be greater than zero".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::InvalidConfig(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }

        let password = match self.backend {
            DatabaseBackend::Mysql => self.password.ok_or_else(|| {
                ConfigError::MissingSecret(
                    "PQ_DB_PASSWORD env var or password config required".to_string(),
                )
            })?,
            DatabaseBackend::Sqlite => self.password.unwrap_or_default(),
        };

        // An in-memory sqlite database exists per connection.
        let max_connections = match (self.backend, &self.sqlite_path) {
            (DatabaseBackend::Sqlite, None) => 1,
            _ => self.max_connections,
        };

        Ok(RepositoryManagerConfig {
            backend: self.backend,
            user: self.user,
            password,
            database: self.database,
            host: self.host,
            port: self.port,
            sqlite_path: self.sqlite_path,
            max_connections,
            min_connections: self.min_connections.min(max_connections),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RepositoryManagerConfig {
    pub backend: DatabaseBackend,
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
    pub sqlite_path: Option<PathBuf>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl RepositoryManagerConfig {
    /// Single-connection in-memory sqlite store.
    pub fn in_memory() -> Self {
        Self {
            backend: DatabaseBackend::Sqlite,
            user: String::new(),
            password: String::new(),
            database: String::new(),
            host: String::new(),
            port: 0,
            sqlite_path: None,
            max_connections: 1,
            min_connections: 1,
        }
    }

    pub fn connection_string(&self) -> String {
        match self.backend {
            DatabaseBackend::Mysql => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.database
            ),
            DatabaseBackend::Sqlite => match &self.sqlite_path {
                Some(path) => format!("sqlite://{}?mode=rwc", path.display()),
                None => "sqlite::memory:".to_string(),
            },
        }
    }
}
