// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration file structures.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::NewMovie;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Top-level configuration for the catalog server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener and logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Accepts `8080` as well as `"8080"`, which is what a quoted
/// `${VAR:-8080}` placeholder turns into.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid port '{text}': {e}"))),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which catalog store backs the API.
///
/// ```yaml
/// database:
///   kind: sqlite
///   path: ./data/catalog.db
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite {
        #[serde(default = "default_database_path")]
        path: String,
    },
    Memory,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig::Sqlite {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "test.db".to_string()
}

impl DatabaseConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            DatabaseConfig::Sqlite { .. } => "sqlite",
            DatabaseConfig::Memory => "memory",
        }
    }
}

impl CatalogServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!(
                "Invalid server port: {} (cannot be 0)",
                self.server.port
            ));
        }

        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }

        let level = self.server.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}' (expected one of: {})",
                self.server.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let DatabaseConfig::Sqlite { path } = &self.database {
            if path.trim().is_empty() {
                return Err(anyhow::anyhow!("SQLite database path cannot be empty"));
            }
        }

        Ok(())
    }
}

/// Movies to insert with the `seed` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeedFile {
    #[serde(default)]
    pub movies: Vec<NewMovie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(
            config.database,
            DatabaseConfig::Sqlite {
                path: "test.db".to_string()
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: CatalogServerConfig = serde_yaml::from_str("{}").expect("Failed to parse");
        assert_eq!(config, CatalogServerConfig::default());
    }

    #[test]
    fn test_memory_database_kind() {
        let config: CatalogServerConfig =
            serde_yaml::from_str("database:\n  kind: memory\n").expect("Failed to parse");
        assert_eq!(config.database, DatabaseConfig::Memory);
        assert_eq!(config.database.kind(), "memory");
    }

    #[test]
    fn test_sqlite_path_defaults() {
        let config: CatalogServerConfig =
            serde_yaml::from_str("database:\n  kind: sqlite\n").expect("Failed to parse");
        assert_eq!(config.database.kind(), "sqlite");
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_unknown_database_kind_rejected() {
        let result = serde_yaml::from_str::<CatalogServerConfig>("database:\n  kind: postgres\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = CatalogServerConfig::default();
        config.server.port = 0;
        let err = config.validate().expect_err("Port 0 should be invalid");
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = CatalogServerConfig::default();
        config.server.host = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = CatalogServerConfig::default();
        config.server.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.server.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_sqlite_path() {
        let config = CatalogServerConfig {
            database: DatabaseConfig::Sqlite {
                path: "  ".to_string(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seed_file_parse() {
        let seed: SeedFile = serde_yaml::from_str(
            "movies:\n  - title: Alien\n    genre: Horror\n  - title: Heat\n    genre: Crime\n",
        )
        .expect("Failed to parse");
        assert_eq!(seed.movies.len(), 2);
        assert_eq!(seed.movies[1].title, "Heat");
    }
}
