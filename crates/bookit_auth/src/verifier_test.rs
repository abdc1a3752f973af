use crate::error::AuthError;
use crate::models::LoginRequest;
use crate::verifier::{IdentityVerifier, RemoteIdentityProvider};
use bookit_config::AuthConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, timeout_secs: u64) -> RemoteIdentityProvider {
    let config = AuthConfig {
        provider_url: format!("{}/", server.uri()),
        anon_key: "anon-key".to_string(),
        admin_email: None,
        timeout_secs,
    };
    RemoteIdentityProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_verify_accepts_known_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer good-token"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7f0c",
            "email": "admin@example.com",
            "aud": "authenticated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = provider_for(&server, 5).verify("good-token").await.unwrap();
    assert_eq!(identity.id, "7f0c");
    assert_eq!(identity.email, "admin@example.com");
}

#[tokio::test]
async fn test_verify_rejects_on_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "invalid JWT"})))
        .mount(&server)
        .await;

    let err = provider_for(&server, 5).verify("stale").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn test_verify_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server, 5).verify("token").await.unwrap_err();
    assert!(matches!(err, AuthError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_verify_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server, 1).verify("token").await.unwrap_err();
    assert!(matches!(err, AuthError::Timeout), "got {err:?}");
}

#[tokio::test]
async fn test_verify_unreachable_provider() {
    let config = AuthConfig {
        provider_url: "http://127.0.0.1:1".to_string(),
        anon_key: "anon-key".to_string(),
        admin_email: None,
        timeout_secs: 1,
    };
    let provider = RemoteIdentityProvider::new(&config).unwrap();

    let err = provider.verify("token").await.unwrap_err();
    assert!(matches!(err, AuthError::Unreachable(_) | AuthError::Timeout));
}

#[tokio::test]
async fn test_sign_in_passes_session_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = LoginRequest {
        email: "admin@example.com".to_string(),
        password: "secret".to_string(),
    };
    let session = provider_for(&server, 5).sign_in(&credentials).await.unwrap();
    assert_eq!(session["access_token"], "jwt");
}

#[tokio::test]
async fn test_sign_in_refusal_keeps_provider_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let credentials = LoginRequest {
        email: "admin@example.com".to_string(),
        password: "wrong".to_string(),
    };
    match provider_for(&server, 5).sign_in(&credentials).await {
        Err(AuthError::LoginRejected(body)) => assert_eq!(body["error"], "invalid_grant"),
        other => panic!("expected LoginRejected, got {other:?}"),
    }
}
