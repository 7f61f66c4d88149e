//! Capability trait for the ZIA admin API.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{NewUrlCategory, UrlCategory, User};

/// The ZIA operations this tool performs (enables testing with fake
/// implementations).
#[async_trait]
pub trait ZiaApi: Send + Sync {
  /// List all users in the tenant.
  async fn list_users(&self) -> Result<Vec<User>>;

  /// List URL categories, predefined and custom.
  async fn list_url_categories(&self) -> Result<Vec<UrlCategory>>;

  /// Create a custom URL category.
  ///
  /// # Arguments
  /// * `payload` - Name, URLs, type, and scope of the new category.
  ///
  /// # Returns
  /// The category as stored by ZIA, including its assigned identifier.
  async fn add_url_category(&self, payload: &NewUrlCategory) -> Result<UrlCategory>;

  /// Delete a URL category by identifier.
  ///
  /// # Arguments
  /// * `id` - Identifier such as `CUSTOM_01`.
  async fn delete_url_category(&self, id: &str) -> Result<()>;
}
