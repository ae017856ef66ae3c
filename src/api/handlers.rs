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

//! Catalog HTTP handlers.
//!
//! Each handler receives the store through `Extension<Arc<dyn CatalogStore>>`.
//! Extractor rejections are taken as `Result`s and turned into
//! [`ApiError::InvalidRequest`] so every validation failure answers 422.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    response::Json,
};
use log::debug;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::error::{ApiError, ErrorResponse};
use super::responses::HealthResponse;
use crate::models::{Movie, Review};
use crate::store::CatalogStore;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Pagination parameters for the movie listing.
///
/// Values are not range-checked.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// 1-based page number (default 1)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size (default 10)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// List movies one page at a time
#[utoipa::path(
    get,
    path = "/movies",
    params(Pagination),
    responses(
        (status = 200, description = "One page of movies in store order", body = [Movie]),
        (status = 422, description = "Non-integer page or limit", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let Query(Pagination { page, limit }) = pagination?;
    debug!("Listing movies page={page} limit={limit}");

    let movies = store.list_movies(page, limit).await?;
    Ok(Json(movies))
}

/// Get a single movie
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "The requested movie", body = Movie),
        (status = 404, description = "Movie not found", body = ErrorResponse),
        (status = 422, description = "Non-integer movie ID", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Path(id) = id?;

    match store.get_movie(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => {
            debug!("Movie {id} not found");
            Err(ApiError::MovieNotFound(id))
        }
    }
}

/// Submit a review
///
/// The review is stored as given and echoed back. The movie it refers to
/// does not have to exist.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = Review,
    responses(
        (status = 200, description = "The stored review, unchanged", body = Review),
        (status = 422, description = "Malformed or incomplete review", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    review: Result<Json<Review>, JsonRejection>,
) -> Result<Json<Review>, ApiError> {
    let Json(review) = review?;
    debug!("Storing review for movie {}", review.movie_id);

    let review = store.create_review(review).await?;
    Ok(Json(review))
}

/// Get random movie recommendations
#[utoipa::path(
    get,
    path = "/recommendations",
    responses(
        (status = 200, description = "Up to five distinct movies chosen at random", body = [Movie]),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Recommendations"
)]
pub async fn recommendations(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(store.recommendations().await?))
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
