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

//! REST API for the movie catalog.
//!
//! ```text
//! GET  /movies?page&limit     - one page of movies
//! GET  /movies/{id}           - a single movie, 404 if absent
//! POST /reviews               - store a review and echo it back
//! GET  /recommendations       - up to five random movies
//! GET  /health                - health check
//! GET  /openapi.json, /docs/  - API documentation
//! ```

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use error::{error_codes, ApiError, ErrorDetail, ErrorResponse};
pub use handlers::Pagination;
pub use openapi::ApiDoc;
pub use responses::HealthResponse;
pub use routes::{build_app, build_router};
