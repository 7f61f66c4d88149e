//! Output format definitions and record rendering.

use clap::ValueEnum;
use serde::Serialize;

use crate::zia::{UrlCategory, User};

/// How API records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  /// Pretty-printed JSON, every field the API returned (default)
  #[default]
  Json,
  /// One line per record
  #[value(alias = "short")]
  Summary,
}

/// Pretty-print any serializable record.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
  serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable record: {e}>"))
}

/// Render a list of users.
pub fn render_users(users: &[User], format: OutputFormat) -> String {
  match format {
    OutputFormat::Json => to_pretty_json(users),
    OutputFormat::Summary => users
      .iter()
      .map(|user| {
        let mut line = format!("{:<8}  {}", user.id, user.name.as_deref().unwrap_or("-"));
        if let Some(email) = &user.email {
          line.push_str(&format!(" <{email}>"));
        }
        if let Some(name) = user.department.as_ref().and_then(|d| d.name.as_deref()) {
          line.push_str(&format!(" [{name}]"));
        }
        line
      })
      .collect::<Vec<_>>()
      .join("\n"),
  }
}

/// Render a single URL category.
pub fn render_category(category: &UrlCategory, format: OutputFormat) -> String {
  match format {
    OutputFormat::Json => to_pretty_json(category),
    OutputFormat::Summary => {
      let name = category.configured_name.as_deref().unwrap_or("-");
      let kind = if category.custom_category { "custom" } else { "predefined" };
      format!("{:<24}  {:<10}  {} ({} urls)", category.id, kind, name, category.urls.len())
    }
  }
}

/// Render a list of URL categories.
pub fn render_categories(categories: &[UrlCategory], format: OutputFormat) -> String {
  match format {
    OutputFormat::Json => to_pretty_json(categories),
    OutputFormat::Summary => categories
      .iter()
      .map(|category| render_category(category, format))
      .collect::<Vec<_>>()
      .join("\n"),
  }
}
