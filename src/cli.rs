//! Command-line interface definitions for confluence-rest.
//!
//! This module defines the CLI structure using clap derives, installs logging
//! and dispatches to the command handlers.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::completions::handle_completions_command;
use crate::commands::content::handle_content_command;
use crate::commands::search::{SearchArgs, handle_search_command};
use crate::commands::space::handle_space_command;
use crate::commands::version::handle_version_command;
use crate::cql::Field;

/// confluence-rest - Query Confluence from the command line
#[derive(Debug, Parser)]
#[command(
  name = "confluence-rest",
  version,
  about = "Query Confluence from the command line",
  long_about = "A command-line client for the Confluence REST API.\n\
                Runs CQL searches and fetches pages, blog posts and spaces.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,

  /// Performance options
  #[command(flatten)]
  pub performance: PerformanceOptions,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Search with CQL, either raw or assembled from filters
  Search(SearchArgs),

  /// Fetch a page, blog post or other content by ID
  Content {
    /// Content ID
    #[arg(value_name = "ID")]
    id: String,

    /// Historical version to fetch (0 fetches the latest)
    #[arg(long, default_value = "0", value_name = "N")]
    version: u32,

    /// Properties to expand, comma separated (e.g. body.storage,space)
    #[arg(long, value_delimiter = ',', value_name = "PROPS")]
    expand: Vec<String>,

    /// Output the raw bean as JSON
    #[arg(long)]
    json: bool,
  },

  /// Fetch one or more spaces by key
  Space {
    /// Space keys
    #[arg(value_name = "KEY", required = true)]
    keys: Vec<String>,

    /// Properties to expand, comma separated (e.g. description.plain)
    #[arg(long, value_delimiter = ',', value_name = "PROPS")]
    expand: Vec<String>,

    /// Output the raw beans as JSON
    #[arg(long)]
    json: bool,
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
    shell: Shell,
  },
}

impl Command {
  /// Whether the command talks to a Confluence instance.
  fn needs_instance(&self) -> bool {
    matches!(
      self,
      Command::Search(_)
        | Command::Content { .. }
        | Command::Space { .. }
        | Command::Auth {
          subcommand: AuthCommand::Test
        }
    )
  }
}

/// Authentication subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
  /// Call the API with the configured credentials
  Test,
  /// Show where each credential comes from
  Show,
}

/// Shells supported by `completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Fields search results can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
  Created,
  #[value(name = "lastmodified")]
  LastModified,
  Title,
}

impl SortField {
  pub fn field(self) -> Field {
    match self {
      SortField::Created => Field::Created,
      SortField::LastModified => Field::LastModified,
      SortField::Title => Field::Title,
    }
  }
}

/// Normalize a URL by adding https:// if no scheme is present
fn normalize_url(url: &str) -> Result<String, String> {
  let trimmed = url.trim();

  let parsed = match Url::parse(trimmed) {
    Ok(parsed) if parsed.has_host() => parsed,
    _ => Url::parse(&format!("https://{trimmed}")).map_err(|e| format!("Invalid URL: {e}"))?,
  };

  let mut url_str = parsed.to_string();
  if url_str.ends_with('/') && url_str.len() > 1 {
    url_str.pop();
  }

  Ok(url_str)
}

/// Authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// Confluence base URL
  #[arg(long, global = true, env = "CONFLUENCE_URL", value_name = "URL", value_parser = normalize_url)]
  pub url: Option<String>,

  /// Confluence user email
  #[arg(long, global = true, env = "CONFLUENCE_USER", value_name = "EMAIL")]
  pub user: Option<String>,

  /// Confluence API token
  #[arg(long, global = true, env = "CONFLUENCE_TOKEN", value_name = "TOKEN", hide_env_values = true)]
  pub token: Option<String>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, global = true, value_enum, default_value = "auto", value_name = "WHEN")]
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
  /// Maximum number of requests in flight
  #[arg(long, global = true, default_value = "4", value_name = "N")]
  pub pool_size: usize,

  /// Max requests per second
  #[arg(long, global = true, default_value = "10", value_name = "N")]
  pub rate_limit: usize,

  /// Request timeout in seconds
  #[arg(long, global = true, default_value = "30", value_name = "SECONDS")]
  pub timeout: u64,
}

impl Cli {
  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    if self.command.needs_instance() && self.auth.url.is_none() {
      return Err("--url (or CONFLUENCE_URL) is required for this command".to_string());
    }

    if let Command::Search(args) = &self.command
      && !args.has_query()
    {
      return Err("search needs a CQL query or at least one of --space, --type, --text".to_string());
    }

    if self.performance.pool_size == 0 {
      return Err("--pool-size must be at least 1".to_string());
    }

    if self.performance.rate_limit == 0 {
      return Err("--rate-limit must be at least 1 request per second".to_string());
    }

    if self.performance.timeout == 0 {
      return Err("--timeout must be at least 1 second".to_string());
    }

    Ok(())
  }
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  match &cli.command {
    Command::Search(args) => {
      handle_search_command(args, &cli, &colors).await;
    }
    Command::Content {
      id,
      version,
      expand,
      json,
    } => {
      handle_content_command(id, *version, expand, *json, &cli, &colors).await;
    }
    Command::Space { keys, expand, json } => {
      handle_space_command(keys, expand, *json, &cli, &colors).await;
    }
    Command::Auth { subcommand } => {
      handle_auth_command(subcommand, &cli, &colors).await;
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
