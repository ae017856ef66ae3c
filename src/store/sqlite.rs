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

//! SQLite-backed catalog store.
//!
//! Every operation opens its own connection, runs on the blocking thread
//! pool, and drops the connection before returning. Writes run in
//! autocommit mode so they are durable as soon as the call returns.

use async_trait::async_trait;
use log::{debug, info};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{page_offset, CatalogStore, StoreError, RECOMMENDATION_COUNT};
use crate::models::{Movie, NewMovie, Review};

const BUSY_TIMEOUT_MS: u64 = 5_000;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    genre TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    movie_id INTEGER,
    rating REAL,
    comment TEXT,
    FOREIGN KEY (movie_id) REFERENCES movies (id));
";

pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create both tables if they are missing. Safe to call on every start.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.with_connection(|conn| conn.execute_batch(SCHEMA)).await?;
        info!("Catalog schema ready at {}", self.path.display());
        Ok(())
    }

    /// Insert a movie and return it with its assigned id.
    pub async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO movies (title, genre) VALUES (?1, ?2)",
                params![movie.title, movie.genre],
            )?;
            Ok(Movie {
                id: conn.last_insert_rowid(),
                title: movie.title,
                genre: movie.genre,
            })
        })
        .await
    }

    /// All stored reviews in insertion order.
    pub async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT movie_id, rating, comment FROM reviews ORDER BY id")?;
            let reviews = stmt
                .query_map([], review_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(reviews)
        })
        .await
    }

    fn connect(path: &Path) -> rusqlite::Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        // Bundled builds enable FK checks by default; reviews may point at
        // movies that do not exist.
        conn.pragma_update(None, "foreign_keys", false)?;
        Ok(conn)
    }

    /// Run `op` against a fresh connection on the blocking pool.
    ///
    /// The connection is dropped when `op` returns, whether it succeeded or not.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || {
            let conn = Self::connect(&path)?;
            op(&conn)
        })
        .await?;
        Ok(result?)
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn list_movies(&self, page: i64, limit: i64) -> Result<Vec<Movie>, StoreError> {
        let offset = page_offset(page, limit);
        debug!("Listing movies with limit {limit} offset {offset}");
        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare("SELECT id, title, genre FROM movies ORDER BY id LIMIT ?1 OFFSET ?2")?;
            let movies = stmt
                .query_map(params![limit, offset], movie_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(movies)
        })
        .await
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT id, title, genre FROM movies WHERE id = ?1",
                params![id],
                movie_from_row,
            )
            .optional()
        })
        .await
    }

    async fn create_review(&self, review: Review) -> Result<Review, StoreError> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO reviews (movie_id, rating, comment) VALUES (?1, ?2, ?3)",
                params![review.movie_id, review.rating, review.comment],
            )?;
            Ok(review)
        })
        .await
    }

    async fn recommendations(&self) -> Result<Vec<Movie>, StoreError> {
        let count = RECOMMENDATION_COUNT as i64;
        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, title, genre FROM movies ORDER BY RANDOM() LIMIT ?1")?;
            let movies = stmt
                .query_map(params![count], movie_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(movies)
        })
        .await
    }
}

fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get("id")?,
        title: row.get("title")?,
        genre: row.get("genre")?,
    })
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        movie_id: row.get("movie_id")?,
        rating: row.get("rating")?,
        comment: row.get("comment")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    async fn seeded_store(count: usize) -> (SqliteStore, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SqliteStore::new(dir.path().join("catalog.db"));
        store.initialize().await.expect("Failed to initialize");
        for i in 1..=count {
            store
                .insert_movie(NewMovie {
                    title: format!("Movie {i}"),
                    genre: if i % 2 == 0 { "Drama" } else { "Comedy" }.to_string(),
                })
                .await
                .expect("Failed to insert movie");
        }
        (store, dir)
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (store, _dir) = seeded_store(3).await;

        store.initialize().await.expect("Second initialize failed");
        let reopened = SqliteStore::new(store.path());
        reopened.initialize().await.expect("Reopen initialize failed");

        let movies = reopened.list_movies(1, 10).await.expect("Failed to list");
        assert_eq!(movies.len(), 3);
    }

    #[tokio::test]
    async fn test_list_movies_default_page() {
        let (store, _dir) = seeded_store(12).await;

        let movies = store.list_movies(1, 10).await.expect("Failed to list");
        assert_eq!(movies.len(), 10);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[9].id, 10);
    }

    #[tokio::test]
    async fn test_list_movies_matches_offset_slice() {
        let (store, _dir) = seeded_store(12).await;
        let all = store.list_movies(1, 100).await.expect("Failed to list");

        for (page, limit) in [(1, 5), (2, 5), (3, 5), (4, 5), (2, 7)] {
            let movies = store.list_movies(page, limit).await.expect("Failed to list");
            let offset = ((page - 1) * limit) as usize;
            let expected: Vec<Movie> = all.iter().skip(offset).take(limit as usize).cloned().collect();
            assert_eq!(movies, expected, "page {page} limit {limit}");
        }
    }

    #[tokio::test]
    async fn test_list_movies_unchecked_bounds() {
        let (store, _dir) = seeded_store(4).await;

        assert!(store.list_movies(1, 0).await.expect("Failed to list").is_empty());
        // Negative offset behaves as zero
        let movies = store.list_movies(0, 2).await.expect("Failed to list");
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
        // Negative limit means no limit
        let movies = store.list_movies(1, -1).await.expect("Failed to list");
        assert_eq!(movies.len(), 4);
    }

    #[tokio::test]
    async fn test_get_movie_found_and_missing() {
        let (store, _dir) = seeded_store(2).await;

        let movie = store.get_movie(2).await.expect("Failed to get");
        assert_eq!(
            movie,
            Some(Movie {
                id: 2,
                title: "Movie 2".to_string(),
                genre: "Drama".to_string(),
            })
        );
        assert_eq!(store.get_movie(99).await.expect("Failed to get"), None);
    }

    #[tokio::test]
    async fn test_create_review_persists_and_echoes() {
        let (store, _dir) = seeded_store(1).await;
        let review = Review {
            movie_id: 1,
            rating: 4.5,
            comment: "Great".to_string(),
        };

        let echoed = store.create_review(review.clone()).await.expect("Failed to create");
        assert_eq!(echoed, review);
        assert_eq!(store.list_reviews().await.expect("Failed to list"), vec![review]);
    }

    #[tokio::test]
    async fn test_create_review_for_unknown_movie() {
        let (store, _dir) = seeded_store(0).await;
        let review = Review {
            movie_id: 404,
            rating: -3.0,
            comment: String::new(),
        };

        store.create_review(review.clone()).await.expect("Failed to create");
        assert_eq!(store.list_reviews().await.expect("Failed to list"), vec![review]);
    }

    #[tokio::test]
    async fn test_connections_do_not_enforce_foreign_keys() {
        let (store, _dir) = seeded_store(2).await;

        let conn = SqliteStore::connect(store.path()).expect("Failed to connect");
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("Failed to read pragma");
        assert_eq!(enabled, 0);

        // Dangling id next to real rows still goes through the FK clause
        let review = Review {
            movie_id: 4242,
            rating: 1.0,
            comment: "x".to_string(),
        };
        let echoed = store.create_review(review.clone()).await.expect("Failed to create");
        assert_eq!(echoed, review);
        assert_eq!(store.list_reviews().await.expect("Failed to list"), vec![review]);
    }

    #[tokio::test]
    async fn test_recommendations_are_distinct_catalog_members() {
        let (store, _dir) = seeded_store(8).await;
        let all: HashSet<i64> = store
            .list_movies(1, 100)
            .await
            .expect("Failed to list")
            .into_iter()
            .map(|m| m.id)
            .collect();

        for _ in 0..10 {
            let picks = store.recommendations().await.expect("Failed to recommend");
            assert_eq!(picks.len(), RECOMMENDATION_COUNT);
            let ids: HashSet<i64> = picks.iter().map(|m| m.id).collect();
            assert_eq!(ids.len(), picks.len());
            assert!(ids.is_subset(&all));
        }
    }

    #[tokio::test]
    async fn test_recommendations_small_catalog() {
        let (store, _dir) = seeded_store(2).await;
        assert_eq!(store.recommendations().await.expect("Failed to recommend").len(), 2);
    }

    #[tokio::test]
    async fn test_open_failure_surfaces_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SqliteStore::new(dir.path().join("missing").join("catalog.db"));

        let result = store.initialize().await;
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }
}
