//! Delete-then-create provisioning of the probe URL category.
//!
//! Re-running the probe must leave exactly one freshly created category behind.
//! An existing category with the same name is deleted first and then created
//! again from the payload; it is never updated in place.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::zia::{CategoryScope, CategoryType, NewUrlCategory, UrlCategory, ZiaApi};

/// Name used for the probe category unless overridden on the command line.
pub const DEFAULT_CATEGORY_NAME: &str = "hoverfly_test_category_1";

/// What has to happen before the category can be created.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPlan {
  /// No category with the name exists.
  Create,
  /// A category with the name exists and is deleted before creation.
  Recreate { existing: UrlCategory },
}

/// Result of a completed provisioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionOutcome {
  /// Category removed before creation, if one existed.
  pub deleted: Option<UrlCategory>,
  /// Category as returned by the create call.
  pub created: UrlCategory,
}

/// Build the probe category payload.
pub fn probe_category(name: &str) -> NewUrlCategory {
  NewUrlCategory {
    configured_name: name.to_string(),
    urls: vec!["example.com".to_string(), "test.org".to_string()],
    category_type: CategoryType::Custom,
    scope: CategoryScope::Organization,
    description: Some("Created by zia-probe for Hoverfly capture".to_string()),
  }
}

/// Decide whether `name` has to be deleted before it is created.
///
/// The first category whose configured name matches exactly is chosen.
pub fn plan(existing: &[UrlCategory], name: &str) -> CategoryPlan {
  match existing
    .iter()
    .find(|category| category.configured_name.as_deref() == Some(name))
  {
    Some(category) => CategoryPlan::Recreate {
      existing: category.clone(),
    },
    None => CategoryPlan::Create,
  }
}

/// Ensure a fresh category exists for `payload.configured_name`.
///
/// Lists categories, deletes a same-named one if present, then creates the
/// category. A failed deletion stops the run before anything is created.
///
/// # Errors
/// Returns the first failing API call's error with context describing the
/// step that failed.
pub async fn provision_category<A>(api: &A, payload: &NewUrlCategory) -> Result<ProvisionOutcome>
where
  A: ZiaApi + ?Sized,
{
  let name = payload.configured_name.as_str();
  let categories = api
    .list_url_categories()
    .await
    .context("Failed to look up existing URL categories")?;
  debug!(count = categories.len(), "listed URL categories");

  let deleted = match plan(&categories, name) {
    CategoryPlan::Create => {
      info!(name, "URL category does not exist yet");
      None
    }
    CategoryPlan::Recreate { existing } => {
      info!(name, id = %existing.id, "Deleting existing URL category");
      api
        .delete_url_category(&existing.id)
        .await
        .with_context(|| format!("Failed to delete existing URL category '{name}' (ID: {})", existing.id))?;
      Some(existing)
    }
  };

  info!(name, "Creating URL category");
  let created = api
    .add_url_category(payload)
    .await
    .with_context(|| format!("Failed to create URL category '{name}'"))?;

  Ok(ProvisionOutcome { deleted, created })
}
