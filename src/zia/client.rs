//! HTTP client implementation for talking to the ZIA admin API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::api::ZiaApi;
use super::auth::{Authenticator, Session, obfuscate_api_key};
use super::endpoints::{self, ONEAPI_AUDIENCE};
use super::error::ApiError;
use super::models::{NewUrlCategory, SessionRequest, TokenResponse, UrlCategory, User};
use crate::credentials::{AuthMode, ResolvedCredentials};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport options that are independent of the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
  /// Request timeout in seconds.
  pub timeout_secs: u64,
  /// Replaces the API base URL derived from the cloud name.
  pub api_base_override: Option<String>,
  /// Replaces the OAuth2 token endpoint derived from the cloud name.
  pub token_url_override: Option<String>,
}

impl Default for ClientOptions {
  fn default() -> Self {
    Self {
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      api_base_override: None,
      token_url_override: None,
    }
  }
}

/// ZIA API client bound to one authentication mode.
///
/// Building the client performs no I/O; the session or token is acquired on
/// the first API call and reused for the rest of the process.
pub struct ZiaClient {
  api_base: String,
  authenticator: Authenticator,
  client: reqwest::Client,
  session: Mutex<Option<Session>>,
}

impl ZiaClient {
  /// Create a new ZIA client.
  ///
  /// # Arguments
  /// * `credentials` - Validated credentials for the active mode.
  /// * `options` - Timeout and endpoint overrides.
  ///
  /// # Errors
  /// Returns an error if the cloud name or an override does not form a valid
  /// URL, or if the underlying `reqwest::Client` cannot be built.
  pub fn new(credentials: ResolvedCredentials, options: &ClientOptions) -> Result<Self> {
    let (authenticator, derived_base) =
      Authenticator::from_credentials(credentials, options.token_url_override.as_deref())?;

    let api_base = match &options.api_base_override {
      Some(url) => endpoints::normalize_override(url).context("Invalid API base URL override")?,
      None => derived_base,
    };

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(options.timeout_secs))
      .cookie_store(true)
      .user_agent(format!(
        "zia-probe/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()
      .context("Failed to create HTTP client")?;

    debug!(mode = ?authenticator.mode(), %api_base, "constructed ZIA client");

    Ok(Self {
      api_base,
      authenticator,
      client,
      session: Mutex::new(None),
    })
  }

  /// Authentication mode this client is bound to.
  pub fn mode(&self) -> AuthMode {
    self.authenticator.mode()
  }

  /// Base URL every API path is appended to.
  pub fn api_base(&self) -> &str {
    &self.api_base
  }

  /// Return the cached session, authenticating on first use.
  async fn session(&self) -> Result<Session> {
    let mut guard = self.session.lock().await;
    if let Some(session) = guard.as_ref() {
      return Ok(session.clone());
    }

    let session = self.authenticate().await?;
    *guard = Some(session.clone());
    Ok(session)
  }

  async fn authenticate(&self) -> Result<Session> {
    match &self.authenticator {
      Authenticator::Legacy {
        username,
        password,
        api_key,
      } => {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let body = SessionRequest {
          api_key: obfuscate_api_key(api_key, timestamp)?,
          username,
          password,
          timestamp,
        };

        let path = "/authenticatedSession";
        let response = self
          .client
          .post(format!("{}{}", self.api_base, path))
          .header("Accept", "application/json")
          .json(&body)
          .send()
          .await
          .context("Failed to send legacy authentication request")?;
        check_status(&Method::POST, path, response)
          .await
          .context("Legacy authentication failed")?;

        info!("Established legacy ZIA session");
        Ok(Session::Cookie)
      }
      Authenticator::OAuth2 {
        token_url,
        client_id,
        client_secret,
      } => {
        let form = [
          ("grant_type", "client_credentials"),
          ("client_id", client_id.as_str()),
          ("client_secret", client_secret.as_str()),
          ("audience", ONEAPI_AUDIENCE),
        ];

        let response = self
          .client
          .post(token_url)
          .header("Accept", "application/json")
          .form(&form)
          .send()
          .await
          .context("Failed to send OAuth2 token request")?;
        let response = check_status(&Method::POST, token_url, response)
          .await
          .context("OAuth2 token request failed")?;

        let token: TokenResponse = response
          .json()
          .await
          .context("Failed to parse OAuth2 token response")?;

        info!(expires_in = ?token.expires_in, "Obtained OneAPI access token");
        Ok(Session::Bearer(token.access_token))
      }
    }
  }

  /// Build an authorized request for `path` relative to the API base.
  async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
    let session = self.session().await?;
    let builder = self
      .client
      .request(method, format!("{}{}", self.api_base, path))
      .header("Accept", "application/json");

    Ok(match session {
      Session::Cookie => builder,
      Session::Bearer(token) => builder.bearer_auth(token),
    })
  }

  async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response> {
    debug!(%method, path, "sending ZIA API request");
    let response = builder
      .send()
      .await
      .with_context(|| format!("Failed to send {method} {path} to ZIA API"))?;
    check_status(&method, path, response).await
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let builder = self.request(Method::GET, path).await?;
    let response = self.send(Method::GET, path, builder).await?;
    response
      .json()
      .await
      .with_context(|| format!("Failed to parse response from GET {path}"))
  }
}

/// Turn a non-success response into an [`ApiError`] carrying the body text.
async fn check_status(method: &Method, path: &str, response: Response) -> Result<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response
    .text()
    .await
    .unwrap_or_else(|_| String::from("(no error details)"));

  Err(
    ApiError {
      status: status.as_u16(),
      method: method.to_string(),
      path: path.to_string(),
      body,
    }
    .into(),
  )
}

#[async_trait]
impl ZiaApi for ZiaClient {
  async fn list_users(&self) -> Result<Vec<User>> {
    self.get_json("/users").await.context("Failed to list users")
  }

  async fn list_url_categories(&self) -> Result<Vec<UrlCategory>> {
    self
      .get_json("/urlCategories")
      .await
      .context("Failed to list URL categories")
  }

  async fn add_url_category(&self, payload: &NewUrlCategory) -> Result<UrlCategory> {
    let path = "/urlCategories";
    let builder = self.request(Method::POST, path).await?.json(payload);
    let response = self
      .send(Method::POST, path, builder)
      .await
      .context("Failed to create URL category")?;

    response
      .json()
      .await
      .context("Failed to parse created URL category")
  }

  async fn delete_url_category(&self, id: &str) -> Result<()> {
    let path = format!("/urlCategories/{id}");
    let builder = self.request(Method::DELETE, &path).await?;
    self
      .send(Method::DELETE, &path, builder)
      .await
      .with_context(|| format!("Failed to delete URL category {id}"))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn oauth_credentials() -> ResolvedCredentials {
    ResolvedCredentials::OAuth2 {
      cloud: "beta".to_string(),
      client_id: "client".to_string(),
      client_secret: "secret".to_string(),
      vanity_domain: Some("acme".to_string()),
    }
  }

  #[test]
  fn test_zia_client_new_oauth() {
    let client = ZiaClient::new(oauth_credentials(), &ClientOptions::default()).unwrap();
    assert_eq!(client.mode(), AuthMode::OAuth2);
    assert_eq!(client.api_base(), "https://api.beta.zsapi.net/zia/api/v1");
  }

  #[test]
  fn test_zia_client_new_legacy() {
    let credentials = ResolvedCredentials::Legacy {
      cloud: "zscaler.net".to_string(),
      username: "admin@example.com".to_string(),
      password: "hunter2".to_string(),
      api_key: "abcdefghijkl".to_string(),
    };

    let client = ZiaClient::new(credentials, &ClientOptions::default()).unwrap();
    assert_eq!(client.mode(), AuthMode::LegacyCredentials);
    assert_eq!(client.api_base(), "https://zsapi.zscaler.net/api/v1");
  }

  #[test]
  fn test_zia_client_new_removes_trailing_slash_from_override() {
    let options = ClientOptions {
      api_base_override: Some("http://localhost:8500/zia/api/v1/".to_string()),
      ..ClientOptions::default()
    };

    let client = ZiaClient::new(oauth_credentials(), &options).unwrap();
    assert_eq!(client.api_base(), "http://localhost:8500/zia/api/v1");
  }

  #[test]
  fn test_zia_client_rejects_invalid_cloud() {
    let credentials = ResolvedCredentials::OAuth2 {
      cloud: "not a cloud".to_string(),
      client_id: "client".to_string(),
      client_secret: "secret".to_string(),
      vanity_domain: None,
    };

    assert!(ZiaClient::new(credentials, &ClientOptions::default()).is_err());
  }
}
