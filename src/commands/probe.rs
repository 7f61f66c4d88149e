//! The default `run` command.
//!
//! Lists users, then deletes and recreates the probe URL category. Each API
//! operation fails independently: a failure is reported, the remaining steps
//! still run, and the final report decides the exit status.

use std::io::Write;
use std::process;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{EXIT_OPERATION_FAILED, Printer, build_client_or_exit, report_operation_error};
use crate::credentials::CredentialSet;
use crate::format::{OutputFormat, render_category, render_users};
use crate::provision::{ProvisionOutcome, probe_category, provision_category};
use crate::zia::ZiaApi;

/// What a probe run accomplished.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
  /// Number of users fetched, or `None` when listing failed.
  pub user_count: Option<usize>,
  /// Category provisioning result, or `None` when it failed.
  pub category: Option<ProvisionOutcome>,
}

impl ProbeReport {
  /// Whether every operation succeeded.
  pub fn is_success(&self) -> bool {
    self.user_count.is_some() && self.category.is_some()
  }
}

/// Execute the probe command and exit non-zero if any operation failed.
pub(crate) async fn handle_probe_command(credentials: &CredentialSet, cli: &Cli, colors: &ColorScheme) {
  let client = build_client_or_exit(credentials, cli, colors);
  let mut out = Printer::stdout(cli.behavior.quiet);
  let report = run_probe(&client, &cli.probe.category_name, cli.probe.format, colors, &mut out).await;

  print_final_report(&report, &cli.probe.category_name, colors, &mut out);

  if !report.is_success() {
    process::exit(EXIT_OPERATION_FAILED);
  }
}

/// Run the probe sequence against any [`ZiaApi`] implementation.
///
/// Progress and records go to `out`; failures always go to stderr.
///
/// # Arguments
/// * `api` - Client used for every call.
/// * `category_name` - Configured name of the category to recreate.
/// * `format` - How fetched records are printed.
/// * `colors` - Shared color scheme.
/// * `out` - Destination for non-error output.
pub async fn run_probe<A, W>(
  api: &A,
  category_name: &str,
  format: OutputFormat,
  colors: &ColorScheme,
  out: &mut Printer<W>,
) -> ProbeReport
where
  A: ZiaApi + ?Sized,
  W: Write,
{
  out.line(format_args!("\n{} {}", colors.progress("→"), colors.info("Fetching users from ZIA")));
  let user_count = match api.list_users().await {
    Ok(users) => {
      out.line(render_users(&users, format));
      out.line(format_args!(
        "{} Successfully fetched {} users.",
        colors.success("✓"),
        colors.number(users.len())
      ));
      Some(users.len())
    }
    Err(e) => {
      report_operation_error("Failed to fetch users", &e, colors);
      None
    }
  };

  out.line(format_args!(
    "\n{} {}",
    colors.progress("→"),
    colors.info(format!("Managing URL category '{category_name}'"))
  ));
  let payload = probe_category(category_name);
  let category = match provision_category(api, &payload).await {
    Ok(outcome) => {
      if let Some(existing) = &outcome.deleted {
        out.line(format_args!(
          "{} URL category '{}' already existed:",
          colors.warning("⚠"),
          colors.emphasis(category_name)
        ));
        out.line(render_category(existing, format));
        out.line(format_args!(
          "{} Deleted URL category '{}' (ID: {})",
          colors.success("✓"),
          colors.emphasis(category_name),
          colors.number(&existing.id)
        ));
      }
      out.line(format_args!(
        "{} Created URL category '{}'",
        colors.success("✓"),
        colors.emphasis(outcome.created.configured_name.as_deref().unwrap_or(category_name))
      ));
      out.line(render_category(&outcome.created, format));
      Some(outcome)
    }
    Err(e) => {
      report_operation_error("Error during URL category operation", &e, colors);
      None
    }
  };

  ProbeReport { user_count, category }
}

fn print_final_report<W: Write>(report: &ProbeReport, category_name: &str, colors: &ColorScheme, out: &mut Printer<W>) {
  out.line(format_args!("\n{}", colors.emphasis("Summary")));

  match report.user_count {
    Some(count) => out.line(format_args!("  {} Users: {} fetched", colors.success("✓"), colors.number(count))),
    None => out.line(format_args!("  {} Users: failed", colors.error("✗"))),
  }

  match &report.category {
    Some(outcome) => {
      let action = if outcome.deleted.is_some() { "recreated" } else { "created" };
      out.line(format_args!(
        "  {} URL category '{}': {} (ID: {})",
        colors.success("✓"),
        category_name,
        action,
        colors.number(&outcome.created.id)
      ));
    }
    None => out.line(format_args!("  {} URL category '{}': failed", colors.error("✗"), category_name)),
  }
}
