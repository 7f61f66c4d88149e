//! Errors surfaced by the ZIA adapter and the client factory.

use std::fmt;

use crate::credentials::MissingCredentials;

/// A non-success HTTP response from the ZIA API.
///
/// Carried inside `anyhow::Error` so callers can recover the response body
/// with [`response_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
  /// HTTP status code.
  pub status: u16,
  /// Request method, e.g. `DELETE`.
  pub method: String,
  /// Path relative to the API base, e.g. `/urlCategories/CUSTOM_01`.
  pub path: String,
  /// Raw response body text.
  pub body: String,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ZIA API returned {} for {} {}", self.status, self.method, self.path)
  }
}

impl std::error::Error for ApiError {}

/// Find the response body text of the first [`ApiError`] in an error chain.
pub fn response_body(error: &anyhow::Error) -> Option<&str> {
  error
    .chain()
    .find_map(|cause| cause.downcast_ref::<ApiError>())
    .map(|api_error| api_error.body.as_str())
    .filter(|body| !body.is_empty())
}

/// Errors produced while turning a credential set into a client.
#[derive(Debug)]
pub enum FactoryError {
  /// Required configuration is absent; no construction was attempted.
  MissingCredentials(MissingCredentials),
  /// The client rejected the supplied configuration.
  ClientConstruction(anyhow::Error),
}

impl fmt::Display for FactoryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingCredentials(err) => write!(f, "{err}"),
      Self::ClientConstruction(err) => write!(f, "failed to construct ZIA client: {err:#}"),
    }
  }
}

impl std::error::Error for FactoryError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::MissingCredentials(err) => Some(err),
      Self::ClientConstruction(err) => Some(&**err),
    }
  }
}

impl From<MissingCredentials> for FactoryError {
  fn from(err: MissingCredentials) -> Self {
    Self::MissingCredentials(err)
  }
}
