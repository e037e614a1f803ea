use derive_more::{Display, Error};
use ntex::{http, web};
use serde_json::json;

/// Errors caused by the caller request
#[derive(Debug, Display, Error)]
pub enum UserError {
    /// Required parameters are missing, the message is sent back as text
    MissingParams(#[error(not(source))] String),
    /// Bad verify token or webhook signature
    Unauthorized,
    UserNotFound,
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        logfire::warn!("{error}", error = format!("{self:?}"));

        match self {
            UserError::MissingParams(msg) => web::HttpResponse::build(self.status_code())
                .content_type("text/plain")
                .body(msg.to_string()),
            UserError::Unauthorized => web::HttpResponse::build(self.status_code()).finish(),
            UserError::UserNotFound => web::HttpResponse::build(self.status_code())
                .json(&json!({"error": "User not found"})),
        }
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::MissingParams(_) => http::StatusCode::BAD_REQUEST,
            UserError::Unauthorized => http::StatusCode::FORBIDDEN,
            UserError::UserNotFound => http::StatusCode::NOT_FOUND,
        }
    }
}

/// Errors on our side or on Meta's. The details are logged, the caller only
/// gets a generic message.
#[derive(Debug, Display, Error)]
pub enum ServerError {
    /// Answered with an empty body, WhatsApp only reads the status
    WebhookError(#[error(not(source))] String),
    /// Answered as text, the caller is a browser
    OauthError(#[error(not(source))] String),
    ExternalServiceError(#[error(not(source))] String),
    MessagesQueryError(#[error(not(source))] String),
    InternalServerError(#[error(not(source))] String),
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::WebhookError(msg) => format!("[WebhookError] {:#?}", msg),
            ServerError::OauthError(msg) => format!("[OauthError] {:#?}", msg),
            ServerError::ExternalServiceError(msg) => format!("[ExternalServiceError] {:#?}", msg),
            ServerError::MessagesQueryError(msg) => format!("[MessagesQueryError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        logfire::error!("{error}", error = self.get_error_message());

        let mut response = web::HttpResponse::build(self.status_code());
        match self {
            ServerError::WebhookError(_) => response.finish(),
            ServerError::OauthError(_) => response.content_type("text/plain").body("OAuth failed"),
            ServerError::ExternalServiceError(_) => {
                response.json(&json!({"error": "Failed to send message"}))
            }
            ServerError::MessagesQueryError(_) => {
                response.json(&json!({"error": "Failed to fetch messages"}))
            }
            ServerError::InternalServerError(_) => {
                response.json(&json!({"error": "Internal server error"}))
            }
        }
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }
}
