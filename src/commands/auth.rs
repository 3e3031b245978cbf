//! Authentication subcommand handlers.
//!
//! `confluence-rest auth test` performs a live API call with the resolved
//! credentials; `confluence-rest auth show` prints where each credential
//! comes from without contacting the server.

use std::process;

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

use crate::cli::{AuthCommand, Cli};
use crate::color::ColorScheme;
use crate::commands::open_client;
use crate::credentials::{Credential, CredentialsProvider, NetrcProvider};

const API_TOKEN_URL: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";

/// Dispatch the authentication subcommands defined under
/// `confluence-rest auth`.
pub(crate) async fn handle_auth_command(subcommand: &AuthCommand, cli: &Cli, colors: &ColorScheme) {
  match subcommand {
    AuthCommand::Test => test_auth(cli, colors).await,
    AuthCommand::Show => show_auth_config(cli, colors),
  }
}

async fn test_auth(cli: &Cli, colors: &ColorScheme) {
  let base_url = cli.auth.url.as_deref().unwrap_or_default();
  println!("{} {}", colors.info("→"), colors.info("Testing authentication"));
  println!("  {}: {}", colors.emphasis("URL"), colors.link(base_url));

  let client = open_client(cli, colors);

  println!("\n{} {}", colors.info("→"), colors.info("Calling Confluence API..."));
  match client.user().get_current_user().await {
    Ok(user) => {
      println!(
        "\n{} {}",
        colors.success("✓"),
        colors.success("Authentication successful!")
      );
      println!("\n{}", colors.emphasis("User Information:"));
      if let Some(display_name) = &user.display_name {
        println!("  {}: {}", colors.emphasis("Display Name"), display_name);
      }
      if let Some(identifier) = user.identifier() {
        println!("  {}: {}", colors.emphasis("Account"), colors.dimmed(identifier));
      }
      if let Some(email) = &user.email {
        println!("  {}: {}", colors.emphasis("Email"), email);
      }
    }
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Authentication failed"));
      eprintln!("  {e:#}");
      eprintln!("\n{}", colors.info("Common issues:"));
      eprintln!("  1. Invalid API token - verify at {}", colors.link(API_TOKEN_URL));
      eprintln!("  2. Incorrect username - should be your email address");
      eprintln!("  3. Wrong base URL - should be https://your-instance.atlassian.net");
      process::exit(2);
    }
  }
}

/// Where a configured value came from.
fn source_of(env_var: &str, value: Option<&str>) -> &'static str {
  if value.is_none() {
    "not set"
  } else if std::env::var_os(env_var).is_some() {
    "environment variable"
  } else {
    "command-line flag"
  }
}

/// Show `token` with all but its first four characters masked.
fn mask_token(token: &str) -> String {
  let length = token.chars().count();
  if length > 8 {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(length - 4))
  } else {
    "*".repeat(length)
  }
}

fn show_auth_config(cli: &Cli, colors: &ColorScheme) {
  println!("{}\n", colors.emphasis("Authentication Configuration"));

  let url = cli.auth.url.as_deref();
  match url {
    Some(url_value) => {
      println!("{}: {}", colors.emphasis("Base URL"), colors.link(url_value));
      println!(
        "  {}: {}",
        colors.dimmed("Source"),
        colors.dimmed(source_of("CONFLUENCE_URL", url))
      );
    }
    None => println!("{}: {}", colors.emphasis("Base URL"), colors.dimmed("(not set)")),
  }

  let username = cli.auth.user.as_deref();
  let token = cli.auth.token.as_deref();
  let host = url.and_then(extract_host);
  let netrc_creds: Option<Credential> = if username.is_none() || token.is_none() {
    host
      .as_deref()
      .and_then(|host| NetrcProvider::new().get_credentials(host).ok().flatten())
  } else {
    None
  };

  match (username, &netrc_creds) {
    (Some(user_value), _) => {
      println!("\n{}: {}", colors.emphasis("Username"), user_value);
      println!(
        "  {}: {}",
        colors.dimmed("Source"),
        colors.dimmed(source_of("CONFLUENCE_USER", username))
      );
    }
    (None, Some(creds)) => {
      println!("\n{}: {}", colors.emphasis("Username"), creds.username);
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(".netrc file"));
    }
    (None, None) => println!("\n{}: {}", colors.emphasis("Username"), colors.dimmed("(not set)")),
  }

  match (token, &netrc_creds) {
    (Some(token_value), _) => {
      println!("\n{}: {}", colors.emphasis("API Token"), colors.dimmed(mask_token(token_value)));
      println!(
        "  {}: {}",
        colors.dimmed("Source"),
        colors.dimmed(source_of("CONFLUENCE_TOKEN", token))
      );
    }
    (None, Some(_)) => {
      println!("\n{}: {}", colors.emphasis("API Token"), colors.dimmed("********"));
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(".netrc file"));
    }
    (None, None) => println!("\n{}: {}", colors.emphasis("API Token"), colors.dimmed("(not set)")),
  }

  if url.is_none() {
    println!(
      "\n{} {} is required for API access",
      colors.warning("⚠"),
      colors.emphasis("Base URL")
    );
    println!("  Set via --url flag or CONFLUENCE_URL environment variable");
  }

  let has_username = username.is_some() || netrc_creds.is_some();
  let has_token = token.is_some() || netrc_creds.is_some();

  if has_username && has_token {
    println!("\n{} {}", colors.success("✓"), colors.success("Credentials configured"));
    return;
  }

  println!(
    "\n{} {} for API access",
    colors.warning("⚠"),
    colors.warning("Credentials incomplete")
  );
  if !has_username {
    println!("  Missing: username (use --user or CONFLUENCE_USER)");
  }
  if !has_token {
    println!("  Missing: API token (use --token or CONFLUENCE_TOKEN)");
    println!("  Create one at {}", colors.link(API_TOKEN_URL));
  }
  println!("\n  Or add credentials to ~/.netrc:");
  println!("    machine {}", host.as_deref().unwrap_or("your-instance.atlassian.net"));
  println!("      login your.email@example.com");
  println!("      password your-api-token");
}

/// Resolve credentials from CLI flags, environment variables, or `.netrc`.
///
/// Explicit `--user`/`--token` values (or their environment variables) win;
/// whichever is missing is taken from the `.netrc` entry for the URL's host.
///
/// # Errors
/// Returns an error when the base URL has no host, when `.netrc` cannot be
/// read, or when no source provides both username and token.
pub(crate) fn load_credentials(base_url: &str, cli: &Cli) -> Result<(String, String)> {
  if let (Some(user), Some(token)) = (&cli.auth.user, &cli.auth.token) {
    return Ok((user.clone(), token.clone()));
  }

  let host = extract_host(base_url).ok_or_else(|| anyhow!("Invalid base URL: {base_url}"))?;

  let provider = NetrcProvider::new();
  if let Some(creds) = provider
    .get_credentials(&host)
    .context("Failed to read credentials from .netrc")?
  {
    let user = cli.auth.user.clone().unwrap_or(creds.username);
    let token = cli.auth.token.clone().unwrap_or(creds.password);
    return Ok((user, token));
  }

  bail!(
    "Credentials not found. Provide --user and --token, set CONFLUENCE_USER and CONFLUENCE_TOKEN, or add to ~/.netrc"
  )
}

/// Host name of a base URL, accepting scheme-less input.
fn extract_host(url: &str) -> Option<String> {
  let parsed = match Url::parse(url) {
    Ok(parsed) if parsed.has_host() => parsed,
    _ => Url::parse(&format!("https://{url}")).ok()?,
  };
  parsed.host_str().map(str::to_string)
}
