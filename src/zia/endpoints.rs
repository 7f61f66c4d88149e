//! Derivation of API and token URLs from a Zscaler cloud name.
//!
//! Supported layouts:
//! - Legacy: `https://zsapi.<cloud>.net/api/v1`, or `https://zsapi.<cloud>/api/v1`
//!   when the cloud already carries a domain (e.g. `zscaler.net`)
//! - OneAPI: `https://api.zsapi.net/zia/api/v1` for `production`, otherwise
//!   `https://api.<cloud>.zsapi.net/zia/api/v1`
//! - OneAPI token: `https://<vanity>.zslogin.net/oauth2/v1/token`, with the
//!   cloud appended to `zslogin` outside production

use anyhow::{Result, anyhow};
use url::Url;

/// Cloud name that maps to the unsuffixed OneAPI hosts.
pub const PRODUCTION_CLOUD: &str = "production";

/// Audience requested in the OneAPI client-credentials grant.
pub const ONEAPI_AUDIENCE: &str = "https://api.zscaler.com";

/// Normalize and validate a cloud name.
///
/// # Errors
/// Returns an error when the name is empty or contains characters that cannot
/// appear in a hostname label.
pub fn normalize_cloud(cloud: &str) -> Result<String> {
  let cloud = cloud.trim().trim_matches('.').to_ascii_lowercase();

  if cloud.is_empty() {
    return Err(anyhow!("Cloud name is empty"));
  }

  if !cloud
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
  {
    return Err(anyhow!("Invalid cloud name: {cloud}"));
  }

  Ok(cloud)
}

/// Base URL for the legacy ZIA API.
pub fn legacy_api_base(cloud: &str) -> Result<String> {
  let cloud = normalize_cloud(cloud)?;
  let host = if cloud.contains('.') {
    format!("zsapi.{cloud}")
  } else {
    format!("zsapi.{cloud}.net")
  };
  validated(format!("https://{host}/api/v1"))
}

/// Base URL for ZIA through the OneAPI gateway.
pub fn oneapi_api_base(cloud: &str) -> Result<String> {
  let cloud = normalize_cloud(cloud)?;
  if cloud == PRODUCTION_CLOUD {
    validated("https://api.zsapi.net/zia/api/v1".to_string())
  } else {
    validated(format!("https://api.{cloud}.zsapi.net/zia/api/v1"))
  }
}

/// OAuth2 token endpoint for the OneAPI identity service.
pub fn oneapi_token_url(cloud: &str, vanity_domain: Option<&str>) -> Result<String> {
  let cloud = normalize_cloud(cloud)?;
  let login_host = if cloud == PRODUCTION_CLOUD {
    "zslogin.net".to_string()
  } else {
    format!("zslogin{cloud}.net")
  };

  let host = match vanity_domain.map(str::trim).filter(|v| !v.is_empty()) {
    Some(vanity) => format!("{vanity}.{login_host}"),
    None => login_host,
  };

  validated(format!("https://{host}/oauth2/v1/token"))
}

/// Validate a user-supplied base URL override and strip trailing slashes.
pub fn normalize_override(url: &str) -> Result<String> {
  validated(url.trim().trim_end_matches('/').to_string())
}

fn validated(url: String) -> Result<String> {
  let parsed = Url::parse(&url).map_err(|e| anyhow!("Invalid URL {url}: {e}"))?;
  if parsed.host_str().is_none() {
    return Err(anyhow!("URL missing host: {url}"));
  }
  Ok(url)
}
