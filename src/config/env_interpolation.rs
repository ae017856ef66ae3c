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

//! Environment variable interpolation for configuration text.
//!
//! Supported forms:
//! - `${VAR_NAME}` - replaced by the variable's value, error if unset
//! - `${VAR_NAME:-default}` - `default` is used when the variable is unset or empty
//!
//! ```
//! use movie_catalog::config::env_interpolation::interpolate;
//!
//! std::env::set_var("DOC_DB_PATH", "/var/lib/catalog.db");
//! let text = interpolate("path: ${DOC_DB_PATH}\nport: ${DOC_UNSET_PORT:-8080}").unwrap();
//! assert_eq!(text, "path: /var/lib/catalog.db\nport: 8080");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an interpolated document.
const MAX_INTERPOLATED_LENGTH: usize = 10_000_000;

lazy_static! {
    /// Group 1: variable name. Group 3: default value, when `:-` is present.
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

fn resolve(caps: &Captures<'_>) -> Result<(String, String), InterpolationError> {
    let name = caps.get(1).map_or("", |m| m.as_str()).to_string();
    let default = caps.get(3).map(|m| m.as_str());

    let value = match env::var(&name) {
        Ok(value) if !value.is_empty() => value,
        Ok(_) | Err(env::VarError::NotPresent) => match default {
            Some(default) => default.to_string(),
            None => return Err(InterpolationError::MissingVariable { name }),
        },
        Err(env::VarError::NotUnicode(_)) => {
            return Err(InterpolationError::MissingVariable {
                name: format!("{name} (contains invalid Unicode)"),
            })
        }
    };
    Ok((name, value))
}

/// Replace every `${...}` reference in `input`.
///
/// Expansion is not recursive: a value containing `${...}` is inserted as is.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;
    let mut names = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let (name, value) = resolve(&caps)?;

        result.push_str(&input[last_end..whole.start()]);
        result.push_str(&value);
        last_end = whole.end();
        names.push(name);

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }
    result.push_str(&input[last_end..]);

    // Names only; values may be secrets
    if !names.is_empty() {
        debug!("Interpolated environment variables: {}", names.join(", "));
    }

    Ok(result)
}
