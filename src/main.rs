//! # Pet Market Web Application
//!
//! Main entry point for the pet-adoption marketplace REST backend.
//! Configures logging, the SQLite pool, middleware and route handling.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod logger;
pub mod models;
pub mod repo;
pub mod rest;
pub mod utils;

use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};
use repo::AppRepo;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    let app_config = &*config::APP_CONFIG;

    // Initialize database connection pool and make sure the schema exists
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(app_config.is_prod()).await?,
    };
    sqlite_repo.init_schema().await?;

    configure_and_run_server(sqlite_repo).await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = &*config::APP_CONFIG;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(sqlite_repo: repo::sqlite::SqlxSqliteRepo) -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;
    let server_addr = (app_config.web_server_host.as_str(), app_config.web_server_port);

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec![
                        "GET", "HEAD", "POST", "OPTIONS", "PUT", "PATCH", "DELETE",
                    ])
                    .allowed_origin(&config::APP_CONFIG.frontend_origin)
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(rest::AppState {
                repo: Box::new(sqlite_repo.clone()),
            })
            .configure(rest::routes::accounts)
            .configure(rest::routes::pets)
            .configure(rest::routes::vet_services)
            .configure(rest::routes::bookings)
            .configure(rest::routes::service_bookings)
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
