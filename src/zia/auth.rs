//! Authentication strategies for the ZIA adapter.
//!
//! The strategy is fixed when the client is built; the session itself is only
//! established on the first API call.

use anyhow::{Result, anyhow};

use crate::credentials::{AuthMode, ResolvedCredentials};

use super::endpoints;

/// How the client proves its identity.
#[derive(Clone)]
pub(crate) enum Authenticator {
  /// `POST /authenticatedSession`; the session cookie authorizes later calls.
  Legacy {
    username: String,
    password: String,
    api_key: String,
  },
  /// OAuth2 client-credentials grant; the bearer token authorizes later calls.
  OAuth2 {
    token_url: String,
    client_id: String,
    client_secret: String,
  },
}

impl Authenticator {
  /// Build the strategy and the API base URL for `credentials`.
  ///
  /// # Arguments
  /// * `credentials` - Validated credentials for a single mode.
  /// * `token_url_override` - Replaces the derived OAuth2 token endpoint.
  ///
  /// # Errors
  /// Returns an error when the cloud name or override cannot form a URL.
  pub(crate) fn from_credentials(
    credentials: ResolvedCredentials,
    token_url_override: Option<&str>,
  ) -> Result<(Self, String)> {
    match credentials {
      ResolvedCredentials::Legacy {
        cloud,
        username,
        password,
        api_key,
      } => {
        let api_base = endpoints::legacy_api_base(&cloud)?;
        Ok((
          Self::Legacy {
            username,
            password,
            api_key,
          },
          api_base,
        ))
      }
      ResolvedCredentials::OAuth2 {
        cloud,
        client_id,
        client_secret,
        vanity_domain,
      } => {
        let api_base = endpoints::oneapi_api_base(&cloud)?;
        let token_url = match token_url_override {
          Some(url) => endpoints::normalize_override(url)?,
          None => endpoints::oneapi_token_url(&cloud, vanity_domain.as_deref())?,
        };
        Ok((
          Self::OAuth2 {
            token_url,
            client_id,
            client_secret,
          },
          api_base,
        ))
      }
    }
  }

  pub(crate) fn mode(&self) -> AuthMode {
    match self {
      Self::Legacy { .. } => AuthMode::LegacyCredentials,
      Self::OAuth2 { .. } => AuthMode::OAuth2,
    }
  }
}

/// Credential material attached to each request once authenticated.
#[derive(Clone)]
pub(crate) enum Session {
  /// The reqwest cookie store holds `JSESSIONID`.
  Cookie,
  Bearer(String),
}

/// Obfuscate a legacy API key against a millisecond timestamp.
///
/// ZIA expects the key to be scrambled with the last six digits of the
/// timestamp sent alongside it: one character per digit, then one character
/// per digit of that number shifted right by one (zero-padded to six), offset
/// by two.
///
/// # Errors
/// Returns an error when the key is not ASCII, is shorter than 12 characters,
/// or the timestamp has fewer than six digits.
pub fn obfuscate_api_key(api_key: &str, timestamp_ms: i64) -> Result<String> {
  if !api_key.is_ascii() || api_key.len() < 12 {
    return Err(anyhow!("API key must be at least 12 ASCII characters"));
  }

  let now = timestamp_ms.to_string();
  if timestamp_ms < 100_000 {
    return Err(anyhow!("Timestamp too short to obfuscate API key: {now}"));
  }

  let seed = &now[now.len() - 6..];
  let shifted = format!("{:06}", seed.parse::<u32>()? >> 1);
  let key = api_key.as_bytes();

  let mut obfuscated = String::with_capacity(12);
  for digit in seed.bytes() {
    obfuscated.push(key[usize::from(digit - b'0')] as char);
  }
  for digit in shifted.bytes() {
    obfuscated.push(key[usize::from(digit - b'0') + 2] as char);
  }

  Ok(obfuscated)
}
