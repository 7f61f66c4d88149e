//! zia-probe - Exercise the ZIA admin API
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  zia_probe::cli::run().await;
}
