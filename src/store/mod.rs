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

//! Data access for the movie catalog.
//!
//! Handlers never reach a database directly: they receive an
//! `Arc<dyn CatalogStore>` and call one of the four catalog operations on it.
//!
//! - [`SqliteStore`] - file-backed store, one connection per operation
//! - [`InMemoryStore`] - in-process store with the same observable semantics

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{Movie, Review};

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Maximum number of movies returned by a recommendation request.
pub const RECOMMENDATION_COUNT: usize = 5;

/// Errors raised by a catalog store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// The four catalog operations exposed over HTTP.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List one page of movies in store order.
    ///
    /// `page` and `limit` are passed through unchecked. The offset is
    /// `(page - 1) * limit`; a negative limit means no limit and a negative
    /// offset behaves as zero.
    async fn list_movies(&self, page: i64, limit: i64) -> Result<Vec<Movie>, StoreError>;

    /// Fetch a single movie, or `None` when no movie has this id.
    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, StoreError>;

    /// Persist a review and hand it back unchanged.
    ///
    /// The referenced movie is not required to exist.
    async fn create_review(&self, review: Review) -> Result<Review, StoreError>;

    /// Up to [`RECOMMENDATION_COUNT`] distinct movies picked at random.
    async fn recommendations(&self) -> Result<Vec<Movie>, StoreError>;
}

/// Row offset for a page, saturating instead of overflowing.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Build the store selected by the configuration and make sure its schema exists.
pub async fn create_store(config: &DatabaseConfig) -> Result<Arc<dyn CatalogStore>, StoreError> {
    match config {
        DatabaseConfig::Sqlite { path } => {
            info!("Using SQLite catalog store at: {path}");
            let store = SqliteStore::new(path);
            store.initialize().await?;
            Ok(Arc::new(store))
        }
        DatabaseConfig::Memory => {
            info!("Using in-memory catalog store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
