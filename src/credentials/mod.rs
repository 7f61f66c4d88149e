//! Credential configuration for the ZIA admin API.
//!
//! Two authentication modes are supported:
//!
//! - **OneAPI (OAuth2)**, the default: `ZSCALER_CLIENT_ID`,
//!   `ZSCALER_CLIENT_SECRET`, and `ZSCALER_CLOUD` are required,
//!   `ZSCALER_VANITY_DOMAIN` is optional.
//! - **Legacy**, selected with `ZSCALER_USE_LEGACY_CLIENT=true`:
//!   `ZIA_USERNAME`, `ZIA_PASSWORD`, `ZIA_API_KEY`, and `ZSCALER_CLOUD` are
//!   required.
//!
//! The environment is read once into a [`CredentialSet`]; resolving it yields
//! either [`ResolvedCredentials`] for the active mode or a
//! [`MissingCredentials`] error listing what still needs to be set.

mod provider;
mod set;
mod types;

pub use provider::CredentialSource;
pub use set::{CredentialSet, KeyStatus, USE_LEGACY_CLIENT_VAR, mask_secret};
pub use types::{AuthMode, CredentialKey, MissingCredentials, ResolvedCredentials};
