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

//! Catalog domain types shared by the store and the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog entry.
///
/// Movies are created out-of-band and are read-only through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movie {
    /// Stable primary key
    pub id: i64,
    /// Movie title
    pub title: String,
    /// Movie genre
    pub genre: String,
}

/// A user-submitted rating and comment for a movie.
///
/// `movie_id` is not checked against the catalog and `rating` has no
/// validated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// ID of the reviewed movie
    pub movie_id: i64,
    /// Numeric rating
    pub rating: f64,
    /// Free-text comment
    pub comment: String,
}

/// A movie that has not been assigned an id yet, used for seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
}
