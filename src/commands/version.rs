//! Version/metadata reporting.
//!
//! Implements the `zia-probe version` subcommand, which prints either a
//! colored summary or a JSON document describing the build.

use serde_json::json;

use crate::color::ColorScheme;

/// Build metadata embedded by `build.rs`.
struct BuildInfo {
  version: &'static str,
  git_commit: &'static str,
  build_timestamp: String,
  target: &'static str,
  rust_version: &'static str,
}

impl BuildInfo {
  fn current() -> Self {
    Self {
      version: env!("CARGO_PKG_VERSION"),
      git_commit: option_env!("GIT_HASH").unwrap_or("unknown"),
      build_timestamp: format_timestamp(env!("BUILD_TIMESTAMP")),
      target: env!("TARGET"),
      rust_version: env!("RUSTC_VERSION"),
    }
  }
}

/// Render version and build metadata in JSON or human-readable form.
///
/// # Arguments
/// * `json` - When `true`, emit a JSON document instead of colored text.
/// * `short` - When `true`, print only the semantic version string.
/// * `colors` - Shared color palette for styled terminal output.
pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) {
  let info = BuildInfo::current();

  if short {
    println!("{}", info.version);
    return;
  }

  if json {
    let document = json!({
      "version": info.version,
      "git_commit": info.git_commit,
      "build_timestamp": info.build_timestamp,
      "target": info.target,
      "rust_version": info.rust_version,
    });
    println!("{}", serde_json::to_string_pretty(&document).unwrap_or_default());
    return;
  }

  println!("{} {}", colors.emphasis("zia-probe"), colors.number(info.version));
  println!("{}: {}", colors.emphasis("Git commit"), colors.code(info.git_commit));
  println!("{}: {}", colors.emphasis("Built"), colors.dimmed(&info.build_timestamp));
  println!("{}: {}", colors.emphasis("Target"), info.target);
  println!("{}: {}", colors.emphasis("Rust version"), info.rust_version);
}

/// Convert Unix epoch seconds into `YYYY-MM-DD HH:MM:SS UTC`, falling back to
/// the raw input when it does not parse.
fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .parse::<i64>()
    .ok()
    .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}
