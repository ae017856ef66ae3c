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

//! OpenAPI documentation for the catalog API.
//!
//! The document is served at `/openapi.json` and the Swagger UI at `/docs/`.

use utoipa::OpenApi;

use super::error::{ErrorDetail, ErrorResponse};
use super::responses::HealthResponse;
use crate::models::{Movie, Review};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_movies,
        super::handlers::get_movie,
        super::handlers::create_review,
        super::handlers::recommendations,
        super::handlers::health_check,
    ),
    components(
        schemas(
            Movie,
            Review,
            HealthResponse,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "Movies", description = "Catalog browsing"),
        (name = "Reviews", description = "Review submission"),
        (name = "Recommendations", description = "Random movie picks"),
        (name = "Health", description = "Health check endpoints"),
    ),
    info(
        title = "Movie Catalog API",
        version = "1.0.0",
        description = "List movies, fetch a single movie, submit reviews and get random recommendations.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDoc;
