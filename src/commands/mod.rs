//! CLI subcommand handlers.
//!
//! This module groups the implementations for each `zia-probe` subcommand,
//! keeping `cli.rs` focused on argument parsing. The helpers below are shared
//! by every handler that talks to the API.

pub mod auth;
pub mod categories;
pub mod completions;
pub mod probe;
pub mod users;
pub mod version;

use std::fmt::Display;
use std::io::{self, Write};
use std::process;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::credentials::CredentialSet;
use crate::zia::{self, FactoryError, ZiaClient};

/// Exit code when required credentials are missing.
pub(crate) const EXIT_MISSING_CREDENTIALS: i32 = 2;
/// Exit code when the client cannot be constructed.
pub(crate) const EXIT_CLIENT_CONSTRUCTION: i32 = 1;
/// Exit code when an API operation fails.
pub(crate) const EXIT_OPERATION_FAILED: i32 = 3;

/// Build the ZIA client or terminate with a diagnostic.
///
/// # Arguments
/// * `credentials` - Credential snapshot taken at startup.
/// * `cli` - Parsed CLI settings providing timeouts and endpoint overrides.
/// * `colors` - Shared color scheme used to render output consistently.
pub(crate) fn build_client_or_exit(credentials: &CredentialSet, cli: &Cli, colors: &ColorScheme) -> ZiaClient {
  if !cli.behavior.quiet {
    println!(
      "{} {}",
      colors.progress("→"),
      colors.info(format!("Initializing ZIA client with {}", credentials.mode()))
    );
  }

  match zia::create_client(credentials, &cli.client_options()) {
    Ok(client) => client,
    Err(FactoryError::MissingCredentials(missing)) => {
      eprintln!(
        "\n{} {}",
        colors.error("✗"),
        colors.error(format!("Missing credentials for {}", missing.mode))
      );
      for key in &missing.missing {
        eprintln!("  {}: {}", colors.emphasis(key.name()), colors.code(key.env_var()));
      }
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'zia-probe auth show' to see your current configuration")
      );
      process::exit(EXIT_MISSING_CREDENTIALS);
    }
    Err(err @ FactoryError::ClientConstruction(_)) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Failed to create API client"));
      eprintln!("  {err}");
      process::exit(EXIT_CLIENT_CONSTRUCTION);
    }
  }
}

/// Line writer for progress and results that stays silent under `--quiet`.
///
/// Failures bypass it and always go to stderr.
pub struct Printer<W: Write = io::Stdout> {
  out: W,
  quiet: bool,
}

impl Printer {
  /// Printer writing to stdout.
  pub fn stdout(quiet: bool) -> Self {
    Self::new(io::stdout(), quiet)
  }
}

impl<W: Write> Printer<W> {
  pub fn new(out: W, quiet: bool) -> Self {
    Self { out, quiet }
  }

  pub fn is_quiet(&self) -> bool {
    self.quiet
  }

  /// Write `text` followed by a newline unless quiet.
  pub fn line(&mut self, text: impl Display) {
    if !self.quiet {
      let _ = writeln!(self.out, "{text}");
    }
  }

  /// Give back the underlying writer.
  pub fn into_inner(self) -> W {
    self.out
  }
}

/// Print an operation failure, including the API response body when present.
pub(crate) fn report_operation_error(summary: &str, error: &anyhow::Error, colors: &ColorScheme) {
  eprintln!("{} {}", colors.error("✗"), colors.error(summary));
  eprintln!("  {}: {error:#}", colors.emphasis("Error"));
  if let Some(body) = zia::response_body(error) {
    eprintln!("  {}: {}", colors.emphasis("API Response Error"), body);
  }
}
