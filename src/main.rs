#![recursion_limit = "256"]
//! # WhatsApp Bridge
//!
//! Receives WhatsApp Cloud API webhooks, connects users' WhatsApp Business
//! accounts through Meta oauth and relays their outbound text messages.

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod metric;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;
pub mod webhook;

use anyhow::Context;
use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    config::init_config()?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;

    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(logfire::config::SendToLogfire::IfTokenPresent);
    if let Some(token) = &app_config.logfire_token {
        logfire_config = logfire_config.with_token(token);
    }
    let shutdown_handler = logfire_config.finish()?;

    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(app_config).await?,
    };
    sqlite_repo
        .create_schema()
        .await
        .context("failed to create the db schema")?;

    let meta_service = services::meta::MetaGraphHandler::new(app_config)?;

    logfire::info!(
        "starting server on {host}:{port}",
        host = app_config.web_server_host.clone(),
        port = app_config.web_server_port as i64
    );

    configure_and_run_server(app_config, sqlite_repo, meta_service).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

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

/// Creates the state of a worker from the provided services
fn create_app_state(
    app_config: &config::AppConfig,
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    meta_service: services::meta::MetaGraphHandler,
) -> front::AppState {
    front::AppState {
        app_config: app_config.clone(),
        repo: Box::new(sqlite_repo),
        meta_service: Box::new(meta_service),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    app_config: &'static config::AppConfig,
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    meta_service: services::meta::MetaGraphHandler,
) -> anyhow::Result<()> {
    let server_addr = (
        app_config.web_server_host.clone(),
        app_config.web_server_port,
    );

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS"])
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                app_config,
                sqlite_repo.clone(),
                meta_service.clone(),
            ))
            .configure(webhook::routes::whatsapp)
            .configure(front::routes::auth)
            .configure(front::routes::messages)
            .service(front::server::index)
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor(app_config)?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
