//! `space` subcommand: fetch spaces by key.

use futures::future::try_join_all;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::table::render_table;
use crate::commands::{fail, open_client, print_json};
use crate::domain::SpaceBean;

/// Fetch every key in `keys` concurrently and print the spaces in the order
/// requested. Any failure aborts the command.
pub(crate) async fn handle_space_command(
  keys: &[String],
  expand: &[String],
  json: bool,
  cli: &Cli,
  colors: &ColorScheme,
) {
  let client = open_client(cli, colors);
  let spaces = client.space();

  let handles = keys.iter().map(|key| spaces.get_space_by_key(key, expand));
  let fetched = match try_join_all(handles).await {
    Ok(fetched) => fetched,
    Err(e) => fail("Failed to fetch spaces", &e, colors),
  };

  if json {
    if let Err(e) = print_json(&fetched) {
      fail("Failed to render spaces as JSON", &e, colors);
    }
    return;
  }

  print!("{}", render_table(&["KEY", "NAME", "TYPE", "STATUS"], &space_rows(&fetched)));
}

fn space_rows(spaces: &[SpaceBean]) -> Vec<Vec<String>> {
  spaces
    .iter()
    .map(|space| {
      vec![
        space.key.clone().unwrap_or_default(),
        space.name.clone().unwrap_or_default(),
        space.space_type.clone().unwrap_or_default(),
        space.status.clone().unwrap_or_default(),
      ]
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_space_rows() {
    let spaces = vec![
      SpaceBean {
        key: Some("DEMO".to_string()),
        name: Some("Demonstration Space".to_string()),
        space_type: Some("global".to_string()),
        status: Some("current".to_string()),
        ..SpaceBean::default()
      },
      SpaceBean {
        key: Some("~jdoe".to_string()),
        ..SpaceBean::default()
      },
    ];

    let output = render_table(&["KEY", "NAME", "TYPE", "STATUS"], &space_rows(&spaces));
    insta::assert_snapshot!(output, @r"
    KEY    NAME                 TYPE    STATUS
    DEMO   Demonstration Space  global  current
    ~jdoe
    ");
  }
}
