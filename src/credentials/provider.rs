//! Configuration source abstractions.
//!
//! Defines the [`CredentialSource`] trait so a credential set can be loaded
//! from an in-memory map. The binary reads the process environment through
//! clap's `env` bindings instead (see `AuthOptions::credential_set`).

use std::collections::HashMap;

/// A source of raw configuration values keyed by environment variable name.
pub trait CredentialSource {
  /// Look up the raw value of `var`.
  ///
  /// # Arguments
  /// * `var` - Environment variable name (e.g., `ZSCALER_CLOUD`).
  ///
  /// # Returns
  /// * `Some(value)` when the source has an entry, even if it is empty.
  /// * `None` when the variable is unset.
  fn lookup(&self, var: &str) -> Option<String>;
}

impl CredentialSource for HashMap<String, String> {
  fn lookup(&self, var: &str) -> Option<String> {
    self.get(var).cloned()
  }
}

impl CredentialSource for HashMap<&str, &str> {
  fn lookup(&self, var: &str) -> Option<String> {
    self.get(var).map(|value| value.to_string())
  }
}
