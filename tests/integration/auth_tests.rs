//! Token exchange tests against a mock token server

#[cfg(test)]
mod tests {
    use gtin_loader::DispatchError;
    use gtin_loader::auth::{
        Authenticator, OAuthPasswordAuthenticator, authenticator_from_config,
    };
    use gtin_loader::config::AuthConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> AuthConfig {
        AuthConfig {
            token_url: Some(format!("{}/oauth/token", server.uri())),
            username: Some("loader@example.com".to_string()),
            password: Some("secret".to_string()),
            audience: Some("https://api.example.com".to_string()),
            client_id: Some("client".to_string()),
            client_secret: Some("client-secret".to_string()),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_password_grant_produces_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({
                "grant_type": "password",
                "username": "loader@example.com",
                "scope": "openid profile email",
                "client_id": "client"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-123",
                "id_token": "id-456",
                "token_type": "Bearer",
                "expires_in": 86400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let headers = authenticator_from_config(&config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap();

        assert_eq!(headers.get("authorization"), Some("Bearer access-123"));
        assert_eq!(headers.get("id_token"), Some("id-456"));
        assert_eq!(headers.get("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_missing_id_token_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "only-access"})),
            )
            .mount(&server)
            .await;

        let headers = OAuthPasswordAuthenticator::from_config(&config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap();

        assert_eq!(headers.get("id_token"), None);
        assert_eq!(headers.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let result = OAuthPasswordAuthenticator::from_config(&config(&server))
            .unwrap()
            .authenticate()
            .await;

        match result {
            Err(DispatchError::Auth(message)) => assert!(message.contains("401")),
            other => panic!("expected auth failure, got {:?}", other.map(|h| h.len())),
        }
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"access_token": "x"})))
            .mount(&server)
            .await;

        let result = OAuthPasswordAuthenticator::from_config(&config(&server))
            .unwrap()
            .authenticate()
            .await;

        assert!(matches!(result, Err(DispatchError::Auth(_))));
    }

    #[tokio::test]
    async fn test_response_without_access_token_is_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "id"})))
            .mount(&server)
            .await;

        let result = OAuthPasswordAuthenticator::from_config(&config(&server))
            .unwrap()
            .authenticate()
            .await;

        assert!(matches!(result, Err(DispatchError::Auth(_))));
    }
}
