//! Command-line interface definitions for zia-probe.
//!
//! Credentials are taken from flags or, more commonly, from the environment
//! variables each flag is bound to. They are gathered once into a
//! [`CredentialSet`] before any command runs.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::categories::handle_categories_command;
use crate::commands::completions::handle_completions_command;
use crate::commands::probe::handle_probe_command;
use crate::commands::users::handle_users_command;
use crate::commands::version::handle_version_command;
use crate::credentials::{CredentialKey, CredentialSet, USE_LEGACY_CLIENT_VAR};
use crate::format::OutputFormat;
use crate::provision::DEFAULT_CATEGORY_NAME;
use crate::zia::{ClientOptions, DEFAULT_TIMEOUT_SECS};

/// zia-probe - Exercise the ZIA admin API
#[derive(Debug, Parser)]
#[command(
  name = "zia-probe",
  version,
  about = "Exercise the Zscaler Internet Access admin API",
  long_about = "Authenticates against the ZIA admin API with OneAPI (OAuth2) or legacy credentials,\n\
                lists users, and recreates a test URL category. Useful for recording API traffic.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute (defaults to `run`)
  #[command(subcommand)]
  pub command: Option<Command>,

  /// Authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Probe options
  #[command(flatten)]
  pub probe: ProbeOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,

  /// Performance options
  #[command(flatten)]
  pub performance: PerformanceOptions,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
  /// List users, then delete and recreate the probe URL category
  Run,

  /// List users in the tenant
  Users,

  /// List URL categories
  Categories {
    /// Only show the category with this configured name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Only show custom categories
    #[arg(long)]
    custom_only: bool,
  },

  /// Authentication testing and inspection
  Auth {
    #[command(subcommand)]
    subcommand: AuthCommand,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: clap_complete::Shell,
  },
}

/// Authentication subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
  /// Authenticate and make one read-only API call
  Test,
  /// Show the selected mode and which credentials are configured
  Show,
}

/// Authentication options
#[derive(Debug, Default, Parser)]
pub struct AuthOptions {
  /// Use legacy username/password/API key authentication ("true" to enable)
  #[arg(long, env = USE_LEGACY_CLIENT_VAR, value_name = "BOOL")]
  pub use_legacy_client: Option<String>,

  /// Zscaler cloud name (e.g. zscalerone, zscaler.net, beta, production)
  #[arg(long, env = "ZSCALER_CLOUD", value_name = "CLOUD")]
  pub cloud: Option<String>,

  /// ZIA admin username (legacy)
  #[arg(long, env = "ZIA_USERNAME", value_name = "EMAIL")]
  pub username: Option<String>,

  /// ZIA admin password (legacy)
  #[arg(long, env = "ZIA_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
  pub password: Option<String>,

  /// ZIA API key (legacy)
  #[arg(long, env = "ZIA_API_KEY", value_name = "KEY", hide_env_values = true)]
  pub api_key: Option<String>,

  /// OneAPI client ID
  #[arg(long, env = "ZSCALER_CLIENT_ID", value_name = "ID")]
  pub client_id: Option<String>,

  /// OneAPI client secret
  #[arg(long, env = "ZSCALER_CLIENT_SECRET", value_name = "SECRET", hide_env_values = true)]
  pub client_secret: Option<String>,

  /// OneAPI vanity domain (optional)
  #[arg(long, env = "ZSCALER_VANITY_DOMAIN", value_name = "DOMAIN")]
  pub vanity_domain: Option<String>,

  /// Override the ZIA API base URL (e.g. a local Hoverfly simulation)
  #[arg(long, env = "ZIA_API_BASE_URL", value_name = "URL")]
  pub api_base_url: Option<String>,

  /// Override the OneAPI token endpoint
  #[arg(long, env = "ZSCALER_TOKEN_URL", value_name = "URL")]
  pub token_url: Option<String>,
}

impl AuthOptions {
  /// Collect the credential flags into an immutable [`CredentialSet`].
  pub fn credential_set(&self) -> CredentialSet {
    CredentialSet::from_lookup(|var| {
      let value = match var {
        USE_LEGACY_CLIENT_VAR => &self.use_legacy_client,
        _ if var == CredentialKey::CloudName.env_var() => &self.cloud,
        _ if var == CredentialKey::Username.env_var() => &self.username,
        _ if var == CredentialKey::Password.env_var() => &self.password,
        _ if var == CredentialKey::ApiKey.env_var() => &self.api_key,
        _ if var == CredentialKey::ClientId.env_var() => &self.client_id,
        _ if var == CredentialKey::ClientSecret.env_var() => &self.client_secret,
        _ if var == CredentialKey::VanityDomain.env_var() => &self.vanity_domain,
        _ => return None,
      };
      value.clone()
    })
  }
}

/// Probe options
#[derive(Debug, Parser)]
pub struct ProbeOptions {
  /// Name of the URL category to delete and recreate
  #[arg(long, default_value = DEFAULT_CATEGORY_NAME, value_name = "NAME")]
  pub category_name: String,

  /// How API records are printed
  #[arg(long, value_enum, default_value = "json", value_name = "FORMAT")]
  pub format: OutputFormat,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

/// Performance options
#[derive(Debug, Parser)]
pub struct PerformanceOptions {
  /// Request timeout in seconds
  #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS")]
  pub timeout: u64,
}

impl Cli {
  /// Parse CLI arguments from the environment
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    if self.performance.timeout == 0 {
      return Err("--timeout must be at least 1 second".to_string());
    }

    if self.probe.category_name.trim().is_empty() {
      return Err("--category-name must not be empty".to_string());
    }

    Ok(())
  }

  /// Transport options for the ZIA client.
  pub fn client_options(&self) -> ClientOptions {
    ClientOptions {
      timeout_secs: self.performance.timeout,
      api_base_override: self.auth.api_base_url.clone(),
      token_url_override: self.auth.token_url.clone(),
    }
  }
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse_args();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  // Read once; every command works from this snapshot.
  let credentials = cli.auth.credential_set();

  match cli.command.as_ref().unwrap_or(&Command::Run) {
    Command::Run => {
      handle_probe_command(&credentials, &cli, &colors).await;
    }
    Command::Users => {
      handle_users_command(&credentials, &cli, &colors).await;
    }
    Command::Categories { name, custom_only } => {
      handle_categories_command(name.as_deref(), *custom_only, &credentials, &cli, &colors).await;
    }
    Command::Auth { subcommand } => {
      handle_auth_command(subcommand, &credentials, &cli, &colors).await;
    }
    Command::Version { json, short } => {
      handle_version_command(*json, *short, &colors);
    }
    Command::Completions { shell } => {
      handle_completions_command(*shell);
    }
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
