//! Handlers not linked to a specific url

use ntex::web;

use crate::consts;

/// Answers `404` with an empty body for urls not defined
pub async fn serve_not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound().finish()
}

/// Liveness endpoint
#[web::get("/")]
async fn index() -> impl web::Responder {
    web::HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(consts::LIVENESS_MSG)
}
