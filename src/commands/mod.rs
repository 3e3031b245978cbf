//! CLI subcommand handlers.
//!
//! Each submodule implements one `confluence-rest` subcommand. Handlers print
//! their own output and exit the process with a non-zero code on failure.

pub mod auth;
pub mod completions;
pub mod content;
pub mod search;
pub mod space;
mod table;
pub mod version;

use std::process;

use serde::Serialize;

use crate::cli::Cli;
use crate::client::{ClientOptions, ConfluenceRestClient};
use crate::color::ColorScheme;
use crate::commands::auth::load_credentials;

/// Build a client from the CLI options, exiting on failure.
///
/// Missing credentials exit with code 2, any other setup problem with 1.
pub(crate) fn open_client(cli: &Cli, colors: &ColorScheme) -> ConfluenceRestClient {
  let Some(base_url) = cli.auth.url.as_deref() else {
    eprintln!("{} {}", colors.error("✗"), colors.error("Base URL not provided"));
    process::exit(4);
  };

  let (username, token) = match load_credentials(base_url, cli) {
    Ok(creds) => creds,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Failed to load credentials"));
      eprintln!("  {e}");
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'confluence-rest auth show' to see your current configuration")
      );
      process::exit(2);
    }
  };

  let options = ClientOptions {
    timeout_secs: cli.performance.timeout,
    rate_limit: cli.performance.rate_limit,
    pool_size: cli.performance.pool_size,
  };

  match ConfluenceRestClient::connect(base_url, &username, &token, options) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Failed to create API client"));
      eprintln!("  {e:#}");
      process::exit(1);
    }
  }
}

/// Print a failed operation and exit with code 1.
pub(crate) fn fail(what: &str, error: &anyhow::Error, colors: &ColorScheme) -> ! {
  eprintln!("{} {}", colors.error("✗"), colors.error(what));
  eprintln!("  {}: {error:#}", colors.emphasis("Error"));
  process::exit(1);
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  let rendered = serde_json::to_string_pretty(value)?;
  println!("{rendered}");
  Ok(())
}
