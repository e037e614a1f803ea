//! Handlers connecting a user's WhatsApp Business account

use ntex::web;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api, metric,
    front::{AppState, errors, templates, utils},
};

#[derive(Deserialize, Debug)]
struct LoginQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Meta oauth minimum data to handle the login callback request
#[derive(Deserialize, Debug)]
struct CallbackQuery {
    code: Option<String>,
    /// the `userId` sent to [login]
    state: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ConnectRequest {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Starts the oauth flow: redirects to the Meta login dialog
#[web::get("/login")]
async fn login(
    q: web::types::Query<LoginQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let Some(user_id) = utils::non_empty(q.into_inner().user_id) else {
        return Err(errors::UserError::MissingParams("Missing userId".into()).into());
    };

    utils::redirect_to(&app_state.meta_service.get_auth_url(&user_id))
}

/// Endpoint handles the Meta oauth callback: stores the user connection
#[web::get("/callback")]
async fn callback(
    q: web::types::Query<CallbackQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let q = q.into_inner();
    let (Some(code), Some(user_id)) = (utils::non_empty(q.code), utils::non_empty(q.state)) else {
        return Err(errors::UserError::MissingParams("Missing code or state".into()).into());
    };

    api::connection::complete_authorization(
        &user_id,
        &code,
        &app_state.app_config.phone_number_id,
        &app_state.meta_service,
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        metric::incr_connection_statds("failed");
        errors::ServerError::OauthError(format!("at /auth/callback user {user_id}: {e:#}"))
    })?;

    let mut context = tera::Context::new();
    context.insert("user_id", &user_id);

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            templates::WEB_TEMPLATES
                .render(templates::CONNECTED_TEMPLATE, &context)
                .map_err(|e| {
                    errors::ServerError::OauthError(format!(
                        "at /auth/callback the template couldnt be rendered: {e}"
                    ))
                })?,
        ))
}

/// Connects a user with the WhatsApp credentials configured on the server,
/// skipping the oauth flow
#[web::post("/connect")]
async fn connect(
    body: web::types::Json<ConnectRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let Some(user_id) = utils::non_empty(body.into_inner().user_id) else {
        return Err(errors::UserError::MissingParams("Missing userId".into()).into());
    };

    let Some((access_token, waba_id)) = app_state.app_config.direct_connect_credentials() else {
        return Err(errors::ServerError::InternalServerError(
            "at /auth/connect WHATSAPP_ACCESS_TOKEN or WABA_ID are not configured".into(),
        )
        .into());
    };

    api::connection::connect_with_credentials(
        &user_id,
        access_token,
        waba_id,
        &app_state.app_config.phone_number_id,
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!("at /auth/connect user {user_id}: {e}"))
    })?;

    Ok(web::HttpResponse::Ok().json(&json!({"success": true})))
}
