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

use anyhow::Result;
use axum::Router;
use log::{error, info};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api;
use crate::config::CatalogServerConfig;
use crate::store::{create_store, CatalogStore};

pub struct CatalogServer {
    store: Arc<dyn CatalogStore>,
    host: String,
    port: u16,
    log_level: String,
    database_kind: &'static str,
}

impl CatalogServer {
    /// Create the server from a loaded configuration.
    ///
    /// The store is opened and its schema created here, so no request can be
    /// served before the tables exist.
    pub async fn from_config(config: &CatalogServerConfig, port: u16) -> Result<Self> {
        let store = create_store(&config.database)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open catalog store: {e}"))?;

        Ok(Self {
            store,
            host: config.server.host.clone(),
            port,
            log_level: config.server.log_level.clone(),
            database_kind: config.database.kind(),
        })
    }

    /// Create the server around an already prepared store.
    pub fn from_store(store: Arc<dyn CatalogStore>, host: String, port: u16) -> Self {
        Self {
            store,
            host,
            port,
            log_level: "info".to_string(),
            database_kind: "custom",
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn router(&self) -> Router {
        api::build_app(self.store.clone())
    }

    /// Bind the configured address and serve until Ctrl-C.
    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Movie Catalog Server");
        println!("  API Port: {}", self.port);
        println!("  Database: {}", self.database_kind);
        println!("  Log level: {}", self.log_level);

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr).await?;
        info!("API available at http://{addr}/");
        info!("Swagger UI available at http://{addr}/docs/");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        info!("Movie Catalog Server started on {}", listener.local_addr()?);

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!("Web API server error: {e}");
            return Err(e.into());
        }

        info!("Shutting down Movie Catalog Server");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
