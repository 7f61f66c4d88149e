//! HTTP-level tests for the reqwest-backed ZIA client against a mock server.

mod common;

use common::fixtures;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zia_probe::credentials::ResolvedCredentials;
use zia_probe::provision::{DEFAULT_CATEGORY_NAME, probe_category};
use zia_probe::zia::{ClientOptions, ZiaApi, ZiaClient, response_body};

fn oauth_client(server: &MockServer) -> ZiaClient {
  let credentials = ResolvedCredentials::OAuth2 {
    cloud: "beta".to_string(),
    client_id: "client-123".to_string(),
    client_secret: "secret-456".to_string(),
    vanity_domain: Some("acme".to_string()),
  };
  let options = ClientOptions {
    api_base_override: Some(format!("{}/zia/api/v1", server.uri())),
    token_url_override: Some(format!("{}/oauth2/v1/token", server.uri())),
    ..ClientOptions::default()
  };
  ZiaClient::new(credentials, &options).unwrap()
}

fn legacy_client(server: &MockServer) -> ZiaClient {
  let credentials = ResolvedCredentials::Legacy {
    cloud: "zscalerone".to_string(),
    username: "admin@example.com".to_string(),
    password: "hunter2".to_string(),
    api_key: "abcdefghijkl".to_string(),
  };
  let options = ClientOptions {
    api_base_override: Some(format!("{}/api/v1", server.uri())),
    ..ClientOptions::default()
  };
  ZiaClient::new(credentials, &options).unwrap()
}

async fn mount_token(server: &MockServer) {
  Mock::given(method("POST"))
    .and(path("/oauth2/v1/token"))
    .and(body_string_contains("grant_type=client_credentials"))
    .and(body_string_contains("client_id=client-123"))
    .and(body_string_contains("client_secret=secret-456"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "access_token": "tok-123",
      "token_type": "Bearer",
      "expires_in": 3600
    })))
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_oauth_token_is_fetched_once_and_sent_as_bearer() {
  let server = MockServer::start().await;
  mount_token(&server).await;

  Mock::given(method("GET"))
    .and(path("/zia/api/v1/users"))
    .and(header("authorization", "Bearer tok-123"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::sample_users_response()))
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path("/zia/api/v1/urlCategories"))
    .and(header("authorization", "Bearer tok-123"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::sample_categories_without_probe()))
    .expect(1)
    .mount(&server)
    .await;

  let client = oauth_client(&server);

  let users = client.list_users().await.unwrap();
  assert_eq!(users.len(), 2);
  assert_eq!(users[0].name.as_deref(), Some("Jane Admin"));

  let categories = client.list_url_categories().await.unwrap();
  assert_eq!(categories[0].id, "NEWS_AND_MEDIA");
}

#[tokio::test]
async fn test_oauth_token_rejection_surfaces_body() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/oauth2/v1/token"))
    .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid_client\"}"))
    .mount(&server)
    .await;

  let client = oauth_client(&server);
  let err = client.list_users().await.unwrap_err();

  assert!(format!("{err:#}").contains("OAuth2 token request failed"));
  assert_eq!(response_body(&err), Some("{\"error\":\"invalid_client\"}"));
}

#[tokio::test]
async fn test_legacy_session_cookie_is_reused() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/v1/authenticatedSession"))
    .and(body_partial_json(json!({
      "username": "admin@example.com",
      "password": "hunter2"
    })))
    .respond_with(
      ResponseTemplate::new(200)
        .insert_header("set-cookie", "JSESSIONID=abc123; Path=/")
        .set_body_json(json!({"authType": "ADMIN_LOGIN", "obfuscateApiKey": true})),
    )
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path("/api/v1/urlCategories"))
    .and(header("cookie", "JSESSIONID=abc123"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::sample_categories_with_probe()))
    .expect(2)
    .mount(&server)
    .await;

  let client = legacy_client(&server);

  assert_eq!(client.list_url_categories().await.unwrap().len(), 2);
  assert_eq!(client.list_url_categories().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_url_category_sends_probe_payload() {
  let server = MockServer::start().await;
  mount_token(&server).await;

  Mock::given(method("POST"))
    .and(path("/zia/api/v1/urlCategories"))
    .and(body_partial_json(json!({
      "configuredName": DEFAULT_CATEGORY_NAME,
      "urls": ["example.com", "test.org"],
      "type": "CUSTOM",
      "scope": "ORGANIZATION"
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "id": "CUSTOM_11",
      "configuredName": DEFAULT_CATEGORY_NAME,
      "urls": ["example.com", "test.org"],
      "type": "URL_CATEGORY",
      "customCategory": true
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = oauth_client(&server);
  let created = client
    .add_url_category(&probe_category(DEFAULT_CATEGORY_NAME))
    .await
    .unwrap();

  assert_eq!(created.id, "CUSTOM_11");
  assert!(created.custom_category);
}

#[tokio::test]
async fn test_delete_failure_keeps_status_and_body() {
  let server = MockServer::start().await;
  mount_token(&server).await;

  Mock::given(method("DELETE"))
    .and(path("/zia/api/v1/urlCategories/CUSTOM_07"))
    .respond_with(ResponseTemplate::new(403).set_body_string("Category is referenced by a policy rule"))
    .mount(&server)
    .await;

  let client = oauth_client(&server);
  let err = client.delete_url_category("CUSTOM_07").await.unwrap_err();

  let message = format!("{err:#}");
  assert!(message.contains("Failed to delete URL category CUSTOM_07"));
  assert!(message.contains("403"));
  assert_eq!(response_body(&err), Some("Category is referenced by a policy rule"));
}
