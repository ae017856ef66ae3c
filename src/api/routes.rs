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

//! Route definitions.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::openapi::ApiDoc;
use crate::store::CatalogStore;

/// Build the catalog router with the store injected into every handler.
pub fn build_router(store: Arc<dyn CatalogStore>) -> Router {
    Router::new()
        .route("/movies", get(handlers::list_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .route("/reviews", post(handlers::create_review))
        .route("/recommendations", get(handlers::recommendations))
        .layer(Extension(store))
}

/// Build the full application: catalog routes, health check, OpenAPI
/// document at `/openapi.json` and Swagger UI at `/docs/`.
pub fn build_app(store: Arc<dyn CatalogStore>) -> Router {
    Router::new()
        // Operational endpoint
        .route("/health", get(handlers::health_check))
        .merge(build_router(store))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}
