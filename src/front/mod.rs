pub mod auth;
pub mod errors;
pub mod messages;
pub mod oauth;
pub mod routes;
pub mod server;
pub mod templates;
pub mod utils;

use crate::{config, repo, services};

/// State shared by the handlers of a worker, built once per worker at start-up
pub struct AppState {
    pub app_config: config::AppConfig,
    pub repo: repo::ImplAppRepo,
    pub meta_service: services::ImplMetaService,
}
