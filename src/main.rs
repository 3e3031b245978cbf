//! confluence-rest - Query Confluence from the command line
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  confluence_rest::cli::run().await;
}
