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

//! Config file loading with environment variable interpolation.

use super::env_interpolation;
use super::types::{CatalogServerConfig, SeedFile};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Interpolate environment variables in `s`, then deserialize it as YAML.
///
/// ```
/// use movie_catalog::config::loader::from_yaml_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Listener {
///     port: u16,
/// }
///
/// std::env::set_var("DOC_LISTENER_PORT", "9000");
/// let listener: Listener = from_yaml_str("port: ${DOC_LISTENER_PORT}").unwrap();
/// assert_eq!(listener.port, 9000);
/// ```
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Interpolate environment variables in `s`, then deserialize it as JSON.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Parse `path` as YAML, falling back to JSON, after interpolation.
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let interpolated = env_interpolation::interpolate(&content)?;

    match serde_yaml::from_str::<T>(&interpolated) {
        Ok(value) => Ok(value),
        Err(yaml_err) => match serde_json::from_str::<T>(&interpolated) {
            Ok(value) => Ok(value),
            Err(json_err) => Err(ConfigError::ParseError {
                path: path.display().to_string(),
                yaml_err: yaml_err.to_string(),
                json_err: json_err.to_string(),
            }),
        },
    }
}

/// Load and validate the server configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required environment
/// variable is missing, the content is neither YAML nor JSON, or the
/// resulting configuration fails validation.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<CatalogServerConfig, ConfigError> {
    let config: CatalogServerConfig = parse_file(path.as_ref())?;
    config.validate()?;
    Ok(config)
}

/// Load a list of movies to seed the catalog with.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<SeedFile, ConfigError> {
    parse_file(path.as_ref())
}

/// Write the configuration as YAML.
///
/// Environment variable references are not preserved; the resolved values
/// are written.
pub fn save_config_file<P: AsRef<Path>>(
    config: &CatalogServerConfig,
    path: P,
) -> Result<(), ConfigError> {
    let content = serde_yaml::to_string(config)?;
    Ok(fs::write(path, content)?)
}
