//! Strongly typed credential configuration and related errors.
//!
//! These types are shared between the configuration sources, the client
//! factory, and the CLI so that callers can reason about authentication modes,
//! required keys, and failure modes consistently.

use std::fmt;

/// Authentication strategy used to talk to the ZIA admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
  /// OneAPI client-credentials flow (client id and secret).
  #[default]
  OAuth2,
  /// Legacy session login with username, password, and API key.
  LegacyCredentials,
}

impl AuthMode {
  /// Select the authentication mode from the `ZSCALER_USE_LEGACY_CLIENT` flag.
  ///
  /// Only the string `"true"` (in any ASCII case) selects the legacy mode.
  /// Unset, empty, or any other value selects OAuth2.
  pub fn from_flag(flag: Option<&str>) -> Self {
    match flag {
      Some(value) if value.eq_ignore_ascii_case("true") => Self::LegacyCredentials,
      _ => Self::OAuth2,
    }
  }

  /// Keys that must be present before a client can be constructed.
  pub fn required_keys(self) -> &'static [CredentialKey] {
    match self {
      Self::LegacyCredentials => &[
        CredentialKey::Username,
        CredentialKey::Password,
        CredentialKey::ApiKey,
        CredentialKey::CloudName,
      ],
      Self::OAuth2 => &[
        CredentialKey::ClientId,
        CredentialKey::ClientSecret,
        CredentialKey::CloudName,
      ],
    }
  }

  /// Keys the mode uses when present but does not require.
  pub fn optional_keys(self) -> &'static [CredentialKey] {
    match self {
      Self::LegacyCredentials => &[],
      Self::OAuth2 => &[CredentialKey::VanityDomain],
    }
  }

  /// Human-readable label used in terminal output.
  pub fn label(self) -> &'static str {
    match self {
      Self::OAuth2 => "OneAPI (OAuth2)",
      Self::LegacyCredentials => "Legacy API (username/password/API key)",
    }
  }
}

impl fmt::Display for AuthMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Named configuration keys read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialKey {
  Username,
  Password,
  ApiKey,
  ClientId,
  ClientSecret,
  VanityDomain,
  CloudName,
}

impl CredentialKey {
  /// Every key in declaration order.
  pub const ALL: [CredentialKey; 7] = [
    Self::Username,
    Self::Password,
    Self::ApiKey,
    Self::ClientId,
    Self::ClientSecret,
    Self::VanityDomain,
    Self::CloudName,
  ];

  /// Environment variable that supplies this key.
  pub fn env_var(self) -> &'static str {
    match self {
      Self::Username => "ZIA_USERNAME",
      Self::Password => "ZIA_PASSWORD",
      Self::ApiKey => "ZIA_API_KEY",
      Self::ClientId => "ZSCALER_CLIENT_ID",
      Self::ClientSecret => "ZSCALER_CLIENT_SECRET",
      Self::VanityDomain => "ZSCALER_VANITY_DOMAIN",
      Self::CloudName => "ZSCALER_CLOUD",
    }
  }

  /// Short field name used in error messages.
  pub fn name(self) -> &'static str {
    match self {
      Self::Username => "username",
      Self::Password => "password",
      Self::ApiKey => "api_key",
      Self::ClientId => "client_id",
      Self::ClientSecret => "client_secret",
      Self::VanityDomain => "vanity_domain",
      Self::CloudName => "cloud_name",
    }
  }

  /// Whether the value must never be echoed back in full.
  pub fn is_secret(self) -> bool {
    matches!(self, Self::Password | Self::ApiKey | Self::ClientSecret)
  }
}

impl fmt::Display for CredentialKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name(), self.env_var())
  }
}

/// Credentials that passed validation for exactly one [`AuthMode`].
#[derive(Clone, PartialEq, Eq)]
pub enum ResolvedCredentials {
  /// Legacy session login.
  Legacy {
    cloud: String,
    username: String,
    password: String,
    api_key: String,
  },
  /// OneAPI client-credentials flow.
  OAuth2 {
    cloud: String,
    client_id: String,
    client_secret: String,
    vanity_domain: Option<String>,
  },
}

impl ResolvedCredentials {
  /// Mode these credentials were resolved for.
  pub fn mode(&self) -> AuthMode {
    match self {
      Self::Legacy { .. } => AuthMode::LegacyCredentials,
      Self::OAuth2 { .. } => AuthMode::OAuth2,
    }
  }

  /// Cloud name shared by both modes.
  pub fn cloud(&self) -> &str {
    match self {
      Self::Legacy { cloud, .. } | Self::OAuth2 { cloud, .. } => cloud,
    }
  }
}

// Secrets stay out of debug output and logs.
impl fmt::Debug for ResolvedCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Legacy { cloud, username, .. } => f
        .debug_struct("Legacy")
        .field("cloud", cloud)
        .field("username", username)
        .field("password", &"<redacted>")
        .field("api_key", &"<redacted>")
        .finish(),
      Self::OAuth2 {
        cloud,
        client_id,
        vanity_domain,
        ..
      } => f
        .debug_struct("OAuth2")
        .field("cloud", cloud)
        .field("client_id", client_id)
        .field("client_secret", &"<redacted>")
        .field("vanity_domain", vanity_domain)
        .finish(),
    }
  }
}

/// Required configuration is absent for the selected mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCredentials {
  /// Mode that was being resolved.
  pub mode: AuthMode,
  /// Unsatisfied keys in the mode's declared order.
  pub missing: Vec<CredentialKey>,
}

impl MissingCredentials {
  /// Field names of the missing keys, e.g. `["cloud_name"]`.
  pub fn names(&self) -> Vec<&'static str> {
    self.missing.iter().map(|key| key.name()).collect()
  }

  /// Environment variables that need to be set.
  pub fn env_vars(&self) -> Vec<&'static str> {
    self.missing.iter().map(|key| key.env_var()).collect()
  }
}

impl fmt::Display for MissingCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keys: Vec<String> = self.missing.iter().map(ToString::to_string).collect();
    write!(f, "missing credentials for {}: {}", self.mode, keys.join(", "))
  }
}

impl std::error::Error for MissingCredentials {}
