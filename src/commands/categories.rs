//! `categories` subcommand: list URL categories with optional filters.

use std::process;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{EXIT_OPERATION_FAILED, Printer, build_client_or_exit, report_operation_error};
use crate::credentials::CredentialSet;
use crate::format::render_categories;
use crate::zia::{UrlCategory, ZiaApi};

/// Fetch, filter, and print URL categories.
///
/// # Arguments
/// * `name` - Keep only categories whose configured name matches exactly.
/// * `custom_only` - Keep only custom categories.
/// * `credentials` - Credential snapshot taken at startup.
/// * `cli` - Parsed CLI settings.
/// * `colors` - Shared color scheme.
pub(crate) async fn handle_categories_command(
  name: Option<&str>,
  custom_only: bool,
  credentials: &CredentialSet,
  cli: &Cli,
  colors: &ColorScheme,
) {
  let client = build_client_or_exit(credentials, cli, colors);
  let mut out = Printer::stdout(cli.behavior.quiet);

  out.line(format_args!("{} {}", colors.progress("→"), colors.info("Fetching URL categories")));
  let categories = match client.list_url_categories().await {
    Ok(categories) => categories,
    Err(e) => {
      report_operation_error("Failed to list URL categories", &e, colors);
      process::exit(EXIT_OPERATION_FAILED);
    }
  };

  let total = categories.len();
  let selected = filter_categories(categories, name, custom_only);

  out.line(render_categories(&selected, cli.probe.format));
  out.line(format_args!(
    "{} Showing {} of {} URL categories.",
    colors.success("✓"),
    colors.number(selected.len()),
    colors.number(total)
  ));
}

/// Apply the `--name` and `--custom-only` filters.
pub fn filter_categories(categories: Vec<UrlCategory>, name: Option<&str>, custom_only: bool) -> Vec<UrlCategory> {
  categories
    .into_iter()
    .filter(|category| !custom_only || category.custom_category)
    .filter(|category| name.is_none_or(|wanted| category.configured_name.as_deref() == Some(wanted)))
    .collect()
}
