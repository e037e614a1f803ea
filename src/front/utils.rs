/// [ntext responder](ntex::web::HttpResponse) to redirect to `url`
pub fn redirect_to(url: &str) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    Ok(ntex::web::HttpResponse::Found()
        .header("location", url)
        .finish())
}

/// The value when present and not blank
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("user-1".into())), Some("user-1".into()));
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_redirect_to() {
        let response = redirect_to("https://www.facebook.com/dialog/oauth").unwrap();

        assert_eq!(response.status(), ntex::http::StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("https://www.facebook.com/dialog/oauth")
        );
    }
}
