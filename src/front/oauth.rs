use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, ResponseType, Scope, TokenUrl, basic::BasicClient,
};

use crate::{config, consts};

pub type MetaOauthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Url to the Meta login dialog. The state is not a random csrf token: it
/// carries the caller `user_id` back to the callback.
pub fn get_new_auth_url(client: &MetaOauthClient, user_id: &str) -> oauth2::url::Url {
    let (auth_url, _) = client
        .authorize_url(|| CsrfToken::new(user_id.to_string()))
        .add_scopes(get_meta_oauth_scopes())
        .set_response_type(&ResponseType::new("code".into()))
        .url();

    auth_url
}

pub fn get_meta_oauth_scopes() -> Vec<Scope> {
    consts::META_OAUTH_SCOPES
        .iter()
        .map(|scope| Scope::new(scope.to_string()))
        .collect()
}

pub fn build_meta_oauth_client(app_config: &config::AppConfig) -> anyhow::Result<MetaOauthClient> {
    Ok(
        BasicClient::new(ClientId::new(app_config.meta_app_id.to_string()))
            .set_client_secret(ClientSecret::new(app_config.meta_app_secret.to_string()))
            .set_auth_uri(AuthUrl::new(consts::META_OAUTH_DIALOG_URL.to_string())?)
            .set_token_uri(TokenUrl::new(format!(
                "{}/oauth/access_token",
                app_config.graph_api_url()
            ))?)
            .set_redirect_uri(RedirectUrl::new(app_config.meta_redirect_uri.to_string())?)
            // meta reads the client credentials from the request body
            .set_auth_type(AuthType::RequestBody),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_url_query() {
        let client = build_meta_oauth_client(&config::test_config()).unwrap();
        let url = get_new_auth_url(&client, "user-1");

        let query = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("client_id"), Some("app-id"));
        assert_eq!(get("state"), Some("user-1"));
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(
            get("redirect_uri"),
            Some("http://localhost:5000/auth/callback")
        );
        assert_eq!(
            get("scope"),
            Some("whatsapp_business_management whatsapp_business_messaging business_management")
        );
    }

    #[test]
    fn test_build_meta_oauth_client_invalid_redirect() {
        let mut app_config = config::test_config();
        app_config.meta_redirect_uri = "not a url".into();

        assert!(build_meta_oauth_client(&app_config).is_err());
    }
}
