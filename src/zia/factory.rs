//! Client factory: credential set in, ready client out.
//!
//! Resolution always happens before construction. When the active mode is
//! missing a required key the constructor is never called, so no half-built
//! client can escape.

use anyhow::Result;
use tracing::info;

use super::client::{ClientOptions, ZiaClient};
use super::error::FactoryError;
use crate::credentials::{CredentialSet, ResolvedCredentials};

/// Resolve `credentials` and hand the result to `construct`.
///
/// # Arguments
/// * `credentials` - Configuration loaded once at startup.
/// * `construct` - Builds the client from validated credentials; only invoked
///   when every required key of the active mode is present.
///
/// # Errors
/// * [`FactoryError::MissingCredentials`] when the active subset is incomplete.
/// * [`FactoryError::ClientConstruction`] when `construct` fails.
pub fn create_client_with<C, F>(credentials: &CredentialSet, construct: F) -> Result<C, FactoryError>
where
  F: FnOnce(ResolvedCredentials) -> Result<C>,
{
  let resolved = credentials.resolve()?;
  info!("Initializing ZIA client with {}", resolved.mode());
  construct(resolved).map_err(FactoryError::ClientConstruction)
}

/// Build the reqwest-backed [`ZiaClient`] for the active mode.
pub fn create_client(credentials: &CredentialSet, options: &ClientOptions) -> Result<ZiaClient, FactoryError> {
  create_client_with(credentials, |resolved| ZiaClient::new(resolved, options))
}
