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

//! Configuration for the catalog server.
//!
//! Config files are YAML (JSON is accepted as a fallback) and may reference
//! environment variables with POSIX-style syntax before they are parsed:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a default value
//!
//! # Configuration File Example
//!
//! ```yaml
//! server:
//!   host: "${CATALOG_HOST:-0.0.0.0}"
//!   port: ${CATALOG_PORT:-8080}
//!   log_level: "${LOG_LEVEL:-info}"
//!
//! database:
//!   kind: sqlite
//!   path: "${CATALOG_DB:-test.db}"
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{
    from_json_str, from_yaml_str, load_config_file, load_seed_file, save_config_file, ConfigError,
};
pub use types::{CatalogServerConfig, DatabaseConfig, SeedFile, ServerSettings};
