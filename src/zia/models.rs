//! Data transfer objects exchanged with the ZIA admin API.
//!
//! Records keep any fields they do not model in `extra`, so printing a record
//! shows everything the API returned.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A ZIA user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  /// Numeric user identifier.
  pub id: i64,
  /// Display name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Login email address.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  /// Department the user belongs to.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department: Option<Reference>,
  /// Groups the user is a member of.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub groups: Vec<Reference>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Lightweight `{id, name}` reference to another ZIA object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
  pub id: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

/// Kind of URL category.
///
/// Values this crate does not model are kept verbatim in `Other`, so a
/// printed record matches what the API sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryType {
  UrlCategory,
  TldCategory,
  All,
  Custom,
  Other(String),
}

impl CategoryType {
  /// Wire representation, e.g. `URL_CATEGORY`.
  pub fn as_str(&self) -> &str {
    match self {
      Self::UrlCategory => "URL_CATEGORY",
      Self::TldCategory => "TLD_CATEGORY",
      Self::All => "ALL",
      Self::Custom => "CUSTOM",
      Self::Other(raw) => raw,
    }
  }
}

impl From<String> for CategoryType {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "URL_CATEGORY" => Self::UrlCategory,
      "TLD_CATEGORY" => Self::TldCategory,
      "ALL" => Self::All,
      "CUSTOM" => Self::Custom,
      _ => Self::Other(raw),
    }
  }
}

impl From<CategoryType> for String {
  fn from(kind: CategoryType) -> Self {
    match kind {
      CategoryType::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

/// Administrative scope of a URL category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryScope {
  Organization,
  Department,
  Location,
  Group,
  Other(String),
}

impl CategoryScope {
  /// Wire representation, e.g. `ORGANIZATION`.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Organization => "ORGANIZATION",
      Self::Department => "DEPARTMENT",
      Self::Location => "LOCATION",
      Self::Group => "GROUP",
      Self::Other(raw) => raw,
    }
  }
}

impl From<String> for CategoryScope {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "ORGANIZATION" => Self::Organization,
      "DEPARTMENT" => Self::Department,
      "LOCATION" => Self::Location,
      "GROUP" => Self::Group,
      _ => Self::Other(raw),
    }
  }
}

impl From<CategoryScope> for String {
  fn from(scope: CategoryScope) -> Self {
    match scope {
      CategoryScope::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

/// A URL category as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCategory {
  /// Category identifier; predefined categories use names such as `NEWS_AND_MEDIA`,
  /// custom ones `CUSTOM_01`.
  #[serde(deserialize_with = "string_or_number")]
  pub id: String,
  /// Administrator-chosen name, only set on custom categories.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub configured_name: Option<String>,
  #[serde(default)]
  pub urls: Vec<String>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub category_type: Option<CategoryType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scope: Option<CategoryScope>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub custom_category: bool,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Payload for creating a URL category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUrlCategory {
  pub configured_name: String,
  pub urls: Vec<String>,
  #[serde(rename = "type")]
  pub category_type: CategoryType,
  pub scope: CategoryScope,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// OAuth2 token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
  pub access_token: String,
  #[serde(default)]
  pub expires_in: Option<u64>,
}

/// Legacy `/authenticatedSession` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionRequest<'a> {
  pub api_key: String,
  pub username: &'a str,
  pub password: &'a str,
  pub timestamp: i64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Id {
    Text(String),
    Number(i64),
  }

  Ok(match Id::deserialize(deserializer)? {
    Id::Text(text) => text,
    Id::Number(number) => number.to_string(),
  })
}
