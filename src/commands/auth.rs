//! Authentication subcommand handlers.
//!
//! Covers both `zia-probe auth test`, which performs a live API call, and
//! `zia-probe auth show`, which prints the selected mode and the credential
//! keys it needs.

use std::process;

use crate::cli::{AuthCommand, Cli};
use crate::color::ColorScheme;
use crate::commands::{EXIT_OPERATION_FAILED, Printer, build_client_or_exit, report_operation_error};
use crate::credentials::{AuthMode, CredentialSet, USE_LEGACY_CLIENT_VAR};
use crate::zia::ZiaApi;

/// Dispatch the authentication subcommands defined under `zia-probe auth`.
///
/// # Arguments
/// * `subcommand` - Auth-specific variant to execute.
/// * `credentials` - Credential snapshot taken at startup.
/// * `cli` - Parsed CLI settings.
/// * `colors` - Shared color scheme used to render output consistently.
pub(crate) async fn handle_auth_command(
  subcommand: &AuthCommand,
  credentials: &CredentialSet,
  cli: &Cli,
  colors: &ColorScheme,
) {
  match subcommand {
    AuthCommand::Test => test_auth(credentials, cli, colors).await,
    AuthCommand::Show => show_auth_config(credentials, cli, colors),
  }
}

/// Authenticate and list URL categories as a read-only smoke test.
async fn test_auth(credentials: &CredentialSet, cli: &Cli, colors: &ColorScheme) {
  let client = build_client_or_exit(credentials, cli, colors);
  let mut out = Printer::stdout(cli.behavior.quiet);
  out.line(format_args!("  {}: {}", colors.emphasis("API base"), colors.link(client.api_base())));

  out.line(format_args!("\n{} {}", colors.info("→"), colors.info("Calling ZIA API...")));
  match client.list_url_categories().await {
    Ok(categories) => {
      out.line(format_args!(
        "\n{} {}",
        colors.success("✓"),
        colors.success("Authentication successful!")
      ));
      out.line(format_args!(
        "  {}: {}",
        colors.emphasis("URL categories visible"),
        colors.number(categories.len())
      ));
    }
    Err(e) => {
      eprintln!();
      report_operation_error("Authentication failed", &e, colors);
      eprintln!("\n{}", colors.info("Common issues:"));
      match client.mode() {
        AuthMode::OAuth2 => {
          eprintln!("  1. Client ID or secret revoked or mistyped");
          eprintln!("  2. Wrong ZSCALER_CLOUD or ZSCALER_VANITY_DOMAIN for the tenant");
        }
        AuthMode::LegacyCredentials => {
          eprintln!("  1. Wrong admin username or password");
          eprintln!("  2. API key does not belong to the tenant on ZSCALER_CLOUD");
        }
      }
      eprintln!("  3. Network connectivity issues");
      process::exit(EXIT_OPERATION_FAILED);
    }
  }
}

/// Display the selected mode, each key it uses, and what is missing.
fn show_auth_config(credentials: &CredentialSet, cli: &Cli, colors: &ColorScheme) {
  let mode = credentials.mode();
  println!("{}\n", colors.emphasis("Authentication Configuration"));

  println!("{}: {}", colors.emphasis("Mode"), mode);
  println!(
    "  {}: {}",
    colors.dimmed("Selector"),
    colors.dimmed(format!(
      "{USE_LEGACY_CLIENT_VAR}={}",
      cli.auth.use_legacy_client.as_deref().unwrap_or("(not set)")
    ))
  );

  println!();
  for status in credentials.redacted_summary() {
    let label = if status.required { "required" } else { "optional" };
    let value = match &status.display_value {
      Some(value) => value.clone(),
      None => colors.dimmed("(not set)"),
    };
    println!(
      "{} {}: {}",
      if status.display_value.is_some() {
        colors.success("✓")
      } else if status.required {
        colors.error("✗")
      } else {
        colors.dimmed("-")
      },
      colors.emphasis(status.key.env_var()),
      value
    );
    println!("  {}: {}", colors.dimmed(status.key.name()), colors.dimmed(label));
  }

  if let Some(url) = &cli.auth.api_base_url {
    println!("\n{}: {}", colors.emphasis("API base override"), colors.link(url));
  }
  if let Some(url) = &cli.auth.token_url {
    println!("{}: {}", colors.emphasis("Token URL override"), colors.link(url));
  }

  let missing = credentials.missing();
  if missing.is_empty() {
    println!("\n{} {}", colors.success("✓"), colors.success("Credentials configured"));
  } else {
    println!(
      "\n{} {} for {}",
      colors.warning("⚠"),
      colors.warning("Credentials incomplete"),
      mode
    );
    for key in missing {
      println!("  Missing: {} (set {})", key.name(), colors.code(key.env_var()));
    }
  }
}
