//! # Alias Shortener
//!
//! A small URL alias service built with Rust and Actix-web.
//!
//! ## Features
//! - Account signup and sign-in with bearer session tokens
//! - Explicit or generated aliases for long URLs
//! - Public redirects from an alias to its URL
//! - Per-user alias listing and owner-checked deletion
//! - In-memory or SQLite storage
//! - Prometheus metrics

mod auth;
mod cache;
mod config;
mod constants;
mod db;
mod errors;
mod handlers;
mod metrics;
mod models;
mod queries;
mod services;
mod store;
mod test_utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use prometheus::Registry;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    // Open the store backend
    let stores = store::Stores::open(&config).map_err(|e| {
        log::error!("Failed to open storage: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    // Initialize cache
    let app_cache = cache::AppCache::from_config(&config);
    info!(
        "Cache initialized: alias TTL={}s, alias capacity={}, session TTL={}s, session capacity={}",
        config.alias_cache_ttl_secs,
        config.alias_cache_max_capacity,
        config.session_ttl_secs,
        config.session_max_capacity
    );

    let mut shortener = services::Shortener::from_config(&config, stores, app_cache);

    // Initialize metrics
    let registry = if config.metrics_enabled {
        let registry = Registry::new();
        let app_metrics = metrics::AppMetrics::new(&registry).map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Failed to register metrics: {}", e))
        })?;
        shortener = shortener.with_metrics(app_metrics);
        info!("Prometheus metrics enabled at /metrics");
        Some(registry)
    } else {
        None
    };

    info!("Starting alias shortener at http://{}", config.bind_addr());
    info!("Short links are served under {}{}/", config.base_url, constants::REDIRECT_PREFIX);
    info!("API Documentation:");
    info!("   POST   /users/signup        - Register with email and password");
    info!("   POST   /users/signin        - Sign in, get a session token");
    info!("   POST   /users/signout       - End the current session");
    info!("   POST   /urls/shorten        - Create an alias for a URL");
    info!("   GET    /urls                - List your aliases");
    info!("   DELETE /delete/{{alias}}      - Delete one of your aliases");
    info!("   GET    /r/{{alias}}           - Redirect to the aliased URL");

    // Capture bind address before moving config into closure
    let bind_addr = config.bind_addr();

    // Start HTTP server
    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(shortener.clone()))
            .app_data(web::Data::new(config.clone()));

        if let Some(registry) = &registry {
            app = app.app_data(web::Data::new(registry.clone()));
        }

        app.wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
