//! `content` subcommand: fetch one page, blog post or other content item.

use crate::cli::Cli;
use crate::client::{ApiUriProvider, build_path};
use crate::color::ColorScheme;
use crate::commands::{fail, open_client, print_json};
use crate::domain::ContentBean;

/// Fetch content `id` and print it.
///
/// # Arguments
/// * `id` - Content identifier.
/// * `version` - Historical version, `0` for the latest.
/// * `expand` - Properties to expand, passed through to the API.
/// * `json` - Print the raw bean as JSON instead of a summary.
pub(crate) async fn handle_content_command(
  id: &str,
  version: u32,
  expand: &[String],
  json: bool,
  cli: &Cli,
  colors: &ColorScheme,
) {
  let client = open_client(cli, colors);

  let content = match client.content().get_content_by_id(id, version, expand).await {
    Ok(content) => content,
    Err(e) => fail(&format!("Failed to fetch content {id}"), &e, colors),
  };

  if json {
    if let Err(e) = print_json(&content) {
      fail("Failed to render content as JSON", &e, colors);
    }
    return;
  }

  print_content(&content, client.uris(), colors);
}

fn print_content(content: &ContentBean, uris: &ApiUriProvider, colors: &ColorScheme) {
  println!(
    "{}",
    colors.emphasis(content.title.as_deref().unwrap_or("(untitled)"))
  );

  let field = |label: &str, value: Option<String>| {
    if let Some(value) = value {
      println!("  {}: {}", colors.dimmed(label), value);
    }
  };

  field("ID", content.id.as_ref().map(|id| colors.number(id)));
  field("Type", content.content_type.clone());
  field("Status", content.status.clone());
  field(
    "Space",
    content.space.as_ref().and_then(|space| space.key.clone()),
  );
  field(
    "Version",
    content.version.as_ref().map(|version| colors.number(version.number)),
  );
  field(
    "Last updated",
    content.version.as_ref().and_then(|version| version.when.clone()),
  );
  field(
    "Link",
    content
      .links
      .as_ref()
      .and_then(|links| links.web_ui.as_deref())
      .map(|web_ui| colors.link(build_path(uris.base_uri(), &[web_ui]))),
  );

  if let Some(ancestors) = content.ancestors.as_ref().filter(|ancestors| !ancestors.is_empty()) {
    let trail = ancestors
      .iter()
      .filter_map(|ancestor| ancestor.title.as_deref())
      .collect::<Vec<_>>()
      .join(" / ");
    field("Ancestors", Some(trail));
  }

  if let Some(storage) = content.body.as_ref().and_then(|body| body.storage.as_ref()) {
    println!("\n{}", colors.dimmed(format!("--- body ({}) ---", storage.representation)));
    println!("{}", storage.value);
  }
}
