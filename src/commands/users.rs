//! `users` subcommand: list every user in the tenant.

use std::process;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{EXIT_OPERATION_FAILED, Printer, build_client_or_exit, report_operation_error};
use crate::credentials::CredentialSet;
use crate::format::render_users;
use crate::zia::ZiaApi;

/// Fetch and print users, exiting non-zero when the call fails.
pub(crate) async fn handle_users_command(credentials: &CredentialSet, cli: &Cli, colors: &ColorScheme) {
  let client = build_client_or_exit(credentials, cli, colors);
  let mut out = Printer::stdout(cli.behavior.quiet);

  out.line(format_args!("{} {}", colors.progress("→"), colors.info("Fetching users from ZIA")));
  match client.list_users().await {
    Ok(users) => {
      out.line(render_users(&users, cli.probe.format));
      out.line(format_args!(
        "{} Successfully fetched {} users.",
        colors.success("✓"),
        colors.number(users.len())
      ));
    }
    Err(e) => {
      report_operation_error("Failed to fetch users", &e, colors);
      process::exit(EXIT_OPERATION_FAILED);
    }
  }
}
