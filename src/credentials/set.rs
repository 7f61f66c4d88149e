//! The immutable credential set loaded once at startup.
//!
//! [`CredentialSet`] captures the selector flag and every credential key in a
//! single pass over a [`CredentialSource`]. Everything downstream (the client
//! factory, `auth show`) works from this value instead of reading the
//! environment again.

use std::collections::BTreeMap;
use std::fmt;

use super::{AuthMode, CredentialKey, CredentialSource, MissingCredentials, ResolvedCredentials};

/// Environment variable that selects the legacy authentication mode.
pub const USE_LEGACY_CLIENT_VAR: &str = "ZSCALER_USE_LEGACY_CLIENT";

/// Configuration values for both authentication modes plus the selected mode.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
  mode: AuthMode,
  values: BTreeMap<CredentialKey, String>,
}

/// Presence of a single key as reported by [`CredentialSet::redacted_summary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStatus {
  pub key: CredentialKey,
  /// Whether the active mode requires this key.
  pub required: bool,
  /// Display-safe value; secrets are masked.
  pub display_value: Option<String>,
}

impl CredentialSet {
  /// Create an empty set for `mode`.
  pub fn new(mode: AuthMode) -> Self {
    Self {
      mode,
      values: BTreeMap::new(),
    }
  }

  /// Builder-style setter. Empty values are treated as absent.
  pub fn with(mut self, key: CredentialKey, value: impl Into<String>) -> Self {
    self.set(key, Some(value.into()));
    self
  }

  fn set(&mut self, key: CredentialKey, value: Option<String>) {
    match value.filter(|v| !v.is_empty()) {
      Some(value) => {
        self.values.insert(key, value);
      }
      None => {
        self.values.remove(&key);
      }
    }
  }

  /// Load the set from any [`CredentialSource`].
  pub fn from_source<S: CredentialSource + ?Sized>(source: &S) -> Self {
    Self::from_lookup(|var| source.lookup(var))
  }

  /// Load the set through a variable-name lookup function.
  ///
  /// The selector flag and every key are read exactly once.
  pub fn from_lookup<F>(mut lookup: F) -> Self
  where
    F: FnMut(&str) -> Option<String>,
  {
    let mode = AuthMode::from_flag(lookup(USE_LEGACY_CLIENT_VAR).as_deref());
    let mut set = Self::new(mode);
    for key in CredentialKey::ALL {
      set.set(key, lookup(key.env_var()));
    }
    set
  }

  /// Authentication mode selected for this run.
  pub fn mode(&self) -> AuthMode {
    self.mode
  }

  /// Value for `key`, if present and non-empty.
  pub fn get(&self, key: CredentialKey) -> Option<&str> {
    self.values.get(&key).map(String::as_str)
  }

  /// Required keys for `mode` that are not present.
  pub fn missing_for(&self, mode: AuthMode) -> Vec<CredentialKey> {
    mode
      .required_keys()
      .iter()
      .copied()
      .filter(|key| self.get(*key).is_none())
      .collect()
  }

  /// Required keys for the active mode that are not present.
  pub fn missing(&self) -> Vec<CredentialKey> {
    self.missing_for(self.mode)
  }

  /// Validate the active mode's required keys and extract them.
  ///
  /// # Errors
  /// Returns [`MissingCredentials`] naming every unsatisfied key when the
  /// active subset is incomplete.
  pub fn resolve(&self) -> Result<ResolvedCredentials, MissingCredentials> {
    let missing = self.missing();
    if !missing.is_empty() {
      return Err(MissingCredentials {
        mode: self.mode,
        missing,
      });
    }

    let take = |key: CredentialKey| self.get(key).map(str::to_string).unwrap_or_default();

    Ok(match self.mode {
      AuthMode::LegacyCredentials => ResolvedCredentials::Legacy {
        cloud: take(CredentialKey::CloudName),
        username: take(CredentialKey::Username),
        password: take(CredentialKey::Password),
        api_key: take(CredentialKey::ApiKey),
      },
      AuthMode::OAuth2 => ResolvedCredentials::OAuth2 {
        cloud: take(CredentialKey::CloudName),
        client_id: take(CredentialKey::ClientId),
        client_secret: take(CredentialKey::ClientSecret),
        vanity_domain: self.get(CredentialKey::VanityDomain).map(str::to_string),
      },
    })
  }

  /// Per-key presence for the active mode, with secrets masked.
  ///
  /// Lists the required keys first, then the optional ones.
  pub fn redacted_summary(&self) -> Vec<KeyStatus> {
    let required = self.mode.required_keys().iter().map(|key| (*key, true));
    let optional = self.mode.optional_keys().iter().map(|key| (*key, false));

    required
      .chain(optional)
      .map(|(key, required)| KeyStatus {
        key,
        required,
        display_value: self.get(key).map(|value| {
          if key.is_secret() {
            mask_secret(value)
          } else {
            value.to_string()
          }
        }),
      })
      .collect()
  }
}

impl fmt::Debug for CredentialSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let present: Vec<&str> = self.values.keys().map(|key| key.name()).collect();
    f.debug_struct("CredentialSet")
      .field("mode", &self.mode)
      .field("present", &present)
      .finish()
  }
}

/// Mask a secret, keeping a short prefix for long values.
pub fn mask_secret(value: &str) -> String {
  let len = value.chars().count();
  if len > 8 {
    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}{}", "*".repeat(len - 4))
  } else {
    "*".repeat(len)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::collections::HashMap;

  use super::*;

  fn oauth_env() -> HashMap<&'static str, &'static str> {
    HashMap::from([
      ("ZSCALER_CLIENT_ID", "client-123"),
      ("ZSCALER_CLIENT_SECRET", "s3cr3t-value-xyz"),
      ("ZSCALER_CLOUD", "beta"),
    ])
  }

  #[test]
  fn test_mode_from_flag() {
    assert_eq!(AuthMode::from_flag(None), AuthMode::OAuth2);
    assert_eq!(AuthMode::from_flag(Some("")), AuthMode::OAuth2);
    assert_eq!(AuthMode::from_flag(Some("false")), AuthMode::OAuth2);
    assert_eq!(AuthMode::from_flag(Some("1")), AuthMode::OAuth2);
    assert_eq!(AuthMode::from_flag(Some("yes")), AuthMode::OAuth2);
    assert_eq!(AuthMode::from_flag(Some("true")), AuthMode::LegacyCredentials);
    assert_eq!(AuthMode::from_flag(Some("TRUE")), AuthMode::LegacyCredentials);
    assert_eq!(AuthMode::from_flag(Some("True")), AuthMode::LegacyCredentials);
  }

  #[test]
  fn test_flag_unset_with_oauth_keys_resolves_oauth() {
    let set = CredentialSet::from_source(&oauth_env());
    assert_eq!(set.mode(), AuthMode::OAuth2);

    let resolved = set.resolve().unwrap();
    assert_eq!(
      resolved,
      ResolvedCredentials::OAuth2 {
        cloud: "beta".to_string(),
        client_id: "client-123".to_string(),
        client_secret: "s3cr3t-value-xyz".to_string(),
        vanity_domain: None,
      }
    );
  }

  #[test]
  fn test_oauth_includes_vanity_domain_when_present() {
    let mut env = oauth_env();
    env.insert("ZSCALER_VANITY_DOMAIN", "acme");

    let resolved = CredentialSet::from_source(&env).resolve().unwrap();
    match resolved {
      ResolvedCredentials::OAuth2 { vanity_domain, .. } => assert_eq!(vanity_domain.as_deref(), Some("acme")),
      other => panic!("unexpected credentials: {other:?}"),
    }
  }

  #[test]
  fn test_legacy_without_cloud_reports_cloud_name() {
    let env = HashMap::from([
      ("ZSCALER_USE_LEGACY_CLIENT", "true"),
      ("ZIA_USERNAME", "admin@example.com"),
      ("ZIA_PASSWORD", "hunter2"),
      ("ZIA_API_KEY", "abcdefghijkl"),
    ]);

    let err = CredentialSet::from_source(&env).resolve().unwrap_err();
    assert_eq!(err.mode, AuthMode::LegacyCredentials);
    assert_eq!(err.names(), vec!["cloud_name"]);
    assert_eq!(err.env_vars(), vec!["ZSCALER_CLOUD"]);
    assert!(err.to_string().contains("cloud_name (ZSCALER_CLOUD)"));
  }

  #[test]
  fn test_legacy_ignores_oauth_keys() {
    let mut env = oauth_env();
    env.insert("ZSCALER_USE_LEGACY_CLIENT", "TRUE");

    let err = CredentialSet::from_source(&env).resolve().unwrap_err();
    assert_eq!(err.names(), vec!["username", "password", "api_key"]);
  }

  #[test]
  fn test_empty_values_count_as_missing() {
    let mut env = oauth_env();
    env.insert("ZSCALER_CLIENT_SECRET", "");

    let err = CredentialSet::from_source(&env).resolve().unwrap_err();
    assert_eq!(err.missing, vec![CredentialKey::ClientSecret]);
  }

  #[test]
  fn test_every_incomplete_subset_is_rejected() {
    for mode in [AuthMode::OAuth2, AuthMode::LegacyCredentials] {
      let required = mode.required_keys();
      // Every non-full subset of the required keys, encoded as a bitmask.
      for mask in 0..(1u32 << required.len()) - 1 {
        let mut set = CredentialSet::new(mode);
        for (bit, key) in required.iter().enumerate() {
          if mask & (1 << bit) != 0 {
            set = set.with(*key, "value");
          }
        }

        let err = set.resolve().unwrap_err();
        assert_eq!(err.mode, mode);
        let expected: Vec<CredentialKey> = required
          .iter()
          .enumerate()
          .filter(|(bit, _)| mask & (1 << bit) == 0)
          .map(|(_, key)| *key)
          .collect();
        assert_eq!(err.missing, expected, "mode {mode:?}, mask {mask:b}");
      }
    }
  }

  #[test]
  fn test_complete_subset_resolves_for_both_modes() {
    for mode in [AuthMode::OAuth2, AuthMode::LegacyCredentials] {
      let set = mode
        .required_keys()
        .iter()
        .fold(CredentialSet::new(mode), |set, key| set.with(*key, "value"));
      let resolved = set.resolve().unwrap();
      assert_eq!(resolved.mode(), mode);
      assert_eq!(resolved.cloud(), "value");
    }
  }

  #[test]
  fn test_from_lookup_reads_each_variable_once() {
    let calls = Cell::new(0);
    let set = CredentialSet::from_lookup(|_| {
      calls.set(calls.get() + 1);
      None
    });

    assert_eq!(calls.get(), CredentialKey::ALL.len() + 1);
    assert_eq!(set.mode(), AuthMode::OAuth2);
  }

  #[test]
  fn test_redacted_summary_masks_secrets() {
    let set = CredentialSet::from_source(&oauth_env());
    let summary = set.redacted_summary();

    assert_eq!(summary.len(), 4);
    let secret = summary.iter().find(|s| s.key == CredentialKey::ClientSecret).unwrap();
    assert_eq!(secret.display_value.as_deref(), Some("s3cr************"));
    assert!(secret.required);

    let client_id = summary.iter().find(|s| s.key == CredentialKey::ClientId).unwrap();
    assert_eq!(client_id.display_value.as_deref(), Some("client-123"));

    let vanity = summary.iter().find(|s| s.key == CredentialKey::VanityDomain).unwrap();
    assert!(!vanity.required);
    assert_eq!(vanity.display_value, None);
  }

  #[test]
  fn test_mask_secret_short_values() {
    assert_eq!(mask_secret("hunter2"), "*******");
    assert_eq!(mask_secret(""), "");
  }

  #[test]
  fn test_debug_output_hides_values() {
    let set = CredentialSet::from_source(&oauth_env());
    let debug = format!("{set:?}");
    assert!(!debug.contains("s3cr3t"));
    assert!(debug.contains("client_secret"));

    let resolved = set.resolve().unwrap();
    assert!(!format!("{resolved:?}").contains("s3cr3t"));
  }
}
