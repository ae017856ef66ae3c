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

//! Catalog fixtures and request helpers.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use movie_catalog::{InMemoryStore, Movie, NewMovie, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const MOVIES: [(&str, &str); 12] = [
    ("The Godfather", "Crime"),
    ("Spirited Away", "Animation"),
    ("Alien", "Horror"),
    ("Heat", "Crime"),
    ("Amelie", "Romance"),
    ("Seven Samurai", "Action"),
    ("Arrival", "Sci-Fi"),
    ("Parasite", "Thriller"),
    ("Paddington 2", "Family"),
    ("Stalker", "Sci-Fi"),
    ("Oldboy", "Thriller"),
    ("Casablanca", "Romance"),
];

/// A SQLite store in a temp dir holding the first `count` fixture movies.
pub async fn seeded_sqlite_store(count: usize) -> (Arc<SqliteStore>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = SqliteStore::new(dir.path().join("catalog.db"));
    store.initialize().await.expect("Failed to initialize store");

    for (title, genre) in MOVIES.iter().take(count) {
        store
            .insert_movie(NewMovie {
                title: title.to_string(),
                genre: genre.to_string(),
            })
            .await
            .expect("Failed to insert movie");
    }

    (Arc::new(store), dir)
}

/// An in-memory store holding all fixture movies with ids 1..=12.
pub fn seeded_memory_store() -> Arc<InMemoryStore> {
    let movies = MOVIES
        .iter()
        .zip(1..)
        .map(|((title, genre), id)| Movie {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
        })
        .collect();
    Arc::new(InMemoryStore::with_movies(movies))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    post_raw(uri, &body.to_string())
}

pub fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Send a request and decode the JSON body (`Null` when the body is empty).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body is not JSON")
    };
    (status, json)
}

/// Movie ids in a JSON array response.
pub fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|m| m["id"].as_i64().expect("Movie without integer id"))
        .collect()
}
