use ntex::web;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, utils},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest {
    user_id: Option<String>,
    to: Option<String>,
    message: Option<String>,
}

/// Messages stored for a WhatsApp phone number id, newest first
#[web::get("/messages/{phone_number_id}")]
async fn get_messages(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (phone_number_id,) = path.into_inner();

    let messages = api::message::list_messages(&phone_number_id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::MessagesQueryError(format!(
                "at /messages/{phone_number_id}: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&messages))
}

#[web::get("/user-status/{user_id}")]
async fn get_user_status(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> web::HttpResponse {
    let (user_id,) = path.into_inner();

    match api::connection::is_user_connected(&user_id, &app_state.repo).await {
        Ok(connected) => web::HttpResponse::Ok().json(&json!({"connected": connected})),
        Err(e) => {
            logfire::error!(
                "at /user-status user {user_id}: {error}",
                user_id = user_id,
                error = e.to_string()
            );
            web::HttpResponse::InternalServerError().json(&json!({"connected": false}))
        }
    }
}

/// Relays a text message with the WhatsApp connection of `userId`
#[web::post("/send")]
async fn send_message(
    body: web::types::Json<SendMessageRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let body = body.into_inner();
    let (Some(user_id), Some(to), Some(message)) = (
        utils::non_empty(body.user_id),
        utils::non_empty(body.to),
        utils::non_empty(body.message),
    ) else {
        return Err(
            errors::UserError::MissingParams("Missing userId, to or message".into()).into(),
        );
    };

    let data = api::message::send_text_message(
        &user_id,
        &to,
        &message,
        &app_state.meta_service,
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::ExternalServiceError(format!("at /send user {user_id}: {e}"))
    })?
    .ok_or(errors::UserError::UserNotFound)?;

    Ok(web::HttpResponse::Ok().json(&json!({"success": true, "data": data})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config, front,
        models::{message::Message, user_connection::UserConnection},
        repo::MockAppRepo,
        services::MockMetaService,
    };
    use mockall::predicate::*;
    use ntex::{http, web::test};

    fn build_state(mock_repo: MockAppRepo, mock_meta: MockMetaService) -> AppState {
        AppState {
            app_config: config::test_config(),
            repo: Box::new(mock_repo),
            meta_service: Box::new(mock_meta),
        }
    }

    #[ntex::test]
    async fn test_get_messages() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_messages_by_phone_number_id()
            .with(eq("123"))
            .returning(|_| {
                Ok(vec![Message {
                    id: 2,
                    phone_number_id: "123".into(),
                    from: "5215512345678".into(),
                    text: "hola".into(),
                    timestamp: "1700000001".into(),
                }])
            });

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, MockMetaService::new()))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::get().uri("/messages/123").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body[0]["from"], "5215512345678");
        assert_eq!(body[0]["text"], "hola");
        assert_eq!(body[0]["phoneNumberId"], "123");
    }

    #[ntex::test]
    async fn test_get_messages_storage_error() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_messages_by_phone_number_id()
            .returning(|_| Err(anyhow::anyhow!("db is gone")));

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, MockMetaService::new()))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::get().uri("/messages/123").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!({"error": "Failed to fetch messages"}));
    }

    #[ntex::test]
    async fn test_user_status() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_connection()
            .with(eq("user-1"))
            .returning(|_| Ok(Some(UserConnection::new("user-1", "token", "123", "waba"))));
        mock_repo
            .expect_get_user_connection()
            .with(eq("user-2"))
            .returning(|_| Ok(None));
        mock_repo
            .expect_get_user_connection()
            .with(eq("user-3"))
            .returning(|_| Err(anyhow::anyhow!("db is gone")));

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, MockMetaService::new()))
                .configure(front::routes::messages),
        )
        .await;

        for (user_id, status, connected) in [
            ("user-1", http::StatusCode::OK, true),
            ("user-2", http::StatusCode::OK, false),
            ("user-3", http::StatusCode::INTERNAL_SERVER_ERROR, false),
        ] {
            let req = test::TestRequest::get()
                .uri(&format!("/user-status/{user_id}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status);

            let body: serde_json::Value =
                serde_json::from_slice(&test::read_body(resp).await).unwrap();
            assert_eq!(body, json!({"connected": connected}));
        }
    }

    #[ntex::test]
    async fn test_send_missing_fields() {
        let mut mock_meta = MockMetaService::new();
        mock_meta.expect_send_text_message().never();
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_user_connection().never();

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, mock_meta))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/send")
            .set_json(&json!({"userId": "user-1", "to": "5215512345678"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_send_unknown_user() {
        let mut mock_meta = MockMetaService::new();
        mock_meta.expect_send_text_message().never();
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_user_connection().returning(|_| Ok(None));

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, mock_meta))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/send")
            .set_json(&json!({"userId": "ghost", "to": "5215512345678", "message": "hola"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!({"error": "User not found"}));
    }

    #[ntex::test]
    async fn test_send_message() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_connection()
            .with(eq("user-1"))
            .returning(|_| Ok(Some(UserConnection::new("user-1", "token", "123", "waba"))));

        let mut mock_meta = MockMetaService::new();
        mock_meta
            .expect_send_text_message()
            .withf(|phone_number_id, access_token, msg| {
                phone_number_id == "123" && access_token == "token" && msg.to == "5215512345678"
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({"messages": [{"id": "wamid.1"}]})));

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, mock_meta))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/send")
            .set_json(&json!({"userId": "user-1", "to": "5215512345678", "message": "hola"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["messages"][0]["id"], "wamid.1");
    }

    #[ntex::test]
    async fn test_send_provider_failure() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_connection()
            .returning(|_| Ok(Some(UserConnection::new("user-1", "token", "123", "waba"))));

        let mut mock_meta = MockMetaService::new();
        mock_meta
            .expect_send_text_message()
            .returning(|_, _, _| Err(anyhow::anyhow!("token expired")));

        let app = test::init_service(
            web::App::new()
                .state(build_state(mock_repo, mock_meta))
                .configure(front::routes::messages),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/send")
            .set_json(&json!({"userId": "user-1", "to": "5215512345678", "message": "hola"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!({"error": "Failed to send message"}));
    }
}
