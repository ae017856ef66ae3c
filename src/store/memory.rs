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

//! In-process catalog store.
//!
//! Mirrors the SQLite store's observable behavior, including its handling of
//! out-of-range pagination values, without touching the filesystem.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::RwLock;

use super::{page_offset, CatalogStore, StoreError, RECOMMENDATION_COUNT};
use crate::models::{Movie, NewMovie, Review};

#[derive(Default)]
pub struct InMemoryStore {
    movies: RwLock<Vec<Movie>>,
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `movies`, kept in id order.
    pub fn with_movies(mut movies: Vec<Movie>) -> Self {
        movies.sort_by_key(|m| m.id);
        Self {
            movies: RwLock::new(movies),
            reviews: RwLock::new(Vec::new()),
        }
    }

    /// Insert a movie with the next free id.
    pub fn insert_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().map_err(|_| StoreError::Poisoned)?;
        let id = movies.last().map_or(1, |m| m.id + 1);
        let movie = Movie {
            id,
            title: movie.title,
            genre: movie.genre,
        };
        movies.push(movie.clone());
        Ok(movie)
    }

    /// Snapshot of every stored review in insertion order.
    pub fn reviews(&self) -> Result<Vec<Review>, StoreError> {
        let reviews = self.reviews.read().map_err(|_| StoreError::Poisoned)?;
        Ok(reviews.clone())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_movies(&self, page: i64, limit: i64) -> Result<Vec<Movie>, StoreError> {
        let offset = page_offset(page, limit);
        // Same conventions as SQLite LIMIT/OFFSET
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = if limit < 0 {
            usize::MAX
        } else {
            usize::try_from(limit).unwrap_or(usize::MAX)
        };

        let movies = self.movies.read().map_err(|_| StoreError::Poisoned)?;
        Ok(movies.iter().skip(skip).take(take).cloned().collect())
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        let movies = self.movies.read().map_err(|_| StoreError::Poisoned)?;
        Ok(movies.iter().find(|m| m.id == id).cloned())
    }

    async fn create_review(&self, review: Review) -> Result<Review, StoreError> {
        let mut reviews = self.reviews.write().map_err(|_| StoreError::Poisoned)?;
        reviews.push(review.clone());
        Ok(review)
    }

    async fn recommendations(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = self.movies.read().map_err(|_| StoreError::Poisoned)?;
        let mut rng = rand::thread_rng();
        Ok(movies
            .choose_multiple(&mut rng, RECOMMENDATION_COUNT)
            .cloned()
            .collect())
    }
}
