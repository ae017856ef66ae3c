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

// Allow println! in main.rs for CLI user-facing output (validate, seed commands)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use movie_catalog::config::load_seed_file;
use movie_catalog::{
    load_config_file, save_config_file, CatalogServer, CatalogServerConfig, DatabaseConfig,
    SqliteStore,
};

#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(about = "Movie catalog service: listings, reviews and recommendations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,

    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },

    /// Create the schema and insert the movies listed in a YAML or JSON file
    Seed {
        /// File with a top-level `movies` list of `{title, genre}` entries
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(cli.config, show_resolved),
        Some(Commands::Seed { file }) => seed_catalog(cli.config, file).await,
        Some(Commands::Run) | None => run_server(cli.config, cli.port).await,
    }
}

/// Install the logger. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }
}

/// Load a `.env` file sitting next to the config file, if there is one.
fn load_env_file(config_path: &Path) -> bool {
    let Some(env_file) = config_path.parent().map(|dir| dir.join(".env")) else {
        return false;
    };
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

/// Run the catalog server
async fn run_server(config_path: PathBuf, port_override: Option<u16>) -> Result<()> {
    let env_file_loaded = load_env_file(&config_path);

    let config = if !config_path.exists() {
        init_logging("info");
        warn!(
            "Config file '{}' not found. Creating default configuration.",
            config_path.display()
        );

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut default_config = CatalogServerConfig::default();
        if let Some(port) = port_override {
            default_config.server.port = port;
            info!("Using command line port {port} in default configuration");
        }
        save_config_file(&default_config, &config_path)?;
        info!(
            "Default configuration created at: {}",
            config_path.display()
        );
        default_config
    } else {
        let config = load_config_file(&config_path)?;
        init_logging(&config.server.log_level);
        config
    };

    info!("Starting Movie Catalog Server");
    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Config file: {}", config_path.display());

    let port = port_override.unwrap_or(config.server.port);
    info!("Port: {port}");
    debug!("Server configuration: {config:?}");

    let server = CatalogServer::from_config(&config, port).await?;
    server.run().await
}

/// Validate a configuration file
fn validate_config(config_path: PathBuf, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    load_env_file(&config_path);
    match load_config_file(&config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid");

            if show_resolved {
                println!();
                println!("Resolved settings:");
                println!("  Host: {}", config.server.host);
                println!("  Port: {}", config.server.port);
                println!("  Log Level: {}", config.server.log_level);
                match &config.database {
                    DatabaseConfig::Sqlite { path } => println!("  Database: sqlite ({path})"),
                    DatabaseConfig::Memory => println!("  Database: memory"),
                }
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}

/// Insert movies from a seed file into the configured SQLite database
async fn seed_catalog(config_path: PathBuf, seed_path: PathBuf) -> Result<()> {
    load_env_file(&config_path);
    let config = load_config_file(&config_path)?;
    init_logging(&config.server.log_level);

    let DatabaseConfig::Sqlite { path } = &config.database else {
        return Err(anyhow::anyhow!(
            "Seeding requires a sqlite database; '{}' is configured",
            config.database.kind()
        ));
    };

    let seed = load_seed_file(&seed_path)?;
    let store = SqliteStore::new(path);
    store.initialize().await?;

    let mut count = 0;
    for movie in seed.movies {
        let movie = store.insert_movie(movie).await?;
        debug!("Inserted movie {} '{}'", movie.id, movie.title);
        count += 1;
    }

    println!("Seeded catalog at {path} with {count} movie(s)");
    Ok(())
}
