//! `search` subcommand: run a CQL search and list the hits.
//!
//! The query is either given verbatim or assembled from `--space`, `--type`
//! and `--text` filters with [`CqlBuilder`].

use clap::Args;

use crate::cli::{Cli, SortField};
use crate::color::ColorScheme;
use crate::commands::table::render_table;
use crate::commands::{fail, open_client, print_json};
use crate::cql::{CqlBuilder, Field, Operator, SortOrder, quote};
use crate::domain::search::format_last_modified;
use crate::domain::{CqlSearchBean, CqlSearchResult, SearchResultBean};

#[derive(Debug, Args)]
pub struct SearchArgs {
  /// Raw CQL query, e.g. 'space = DEMO and type = page'
  #[arg(value_name = "CQL", conflicts_with_all = ["space", "content_type", "text"])]
  pub cql: Option<String>,

  /// Restrict to space keys (repeatable)
  #[arg(long, value_name = "KEY")]
  pub space: Vec<String>,

  /// Restrict to content types such as page or blogpost (repeatable)
  #[arg(long = "type", value_name = "TYPE")]
  pub content_type: Vec<String>,

  /// Full-text search term
  #[arg(long, value_name = "TEXT")]
  pub text: Option<String>,

  /// Order results by this field
  #[arg(long, value_enum, value_name = "FIELD", conflicts_with = "cql")]
  pub order_by: Option<SortField>,

  /// Sort descending instead of ascending
  #[arg(long, requires = "order_by")]
  pub desc: bool,

  /// Maximum number of results
  #[arg(long, default_value = "25", value_name = "N")]
  pub limit: u32,

  /// Index of the first result
  #[arg(long, default_value = "0", value_name = "N")]
  pub start: u32,

  /// Properties to expand on each hit, comma separated
  #[arg(long, value_delimiter = ',', value_name = "PROPS")]
  pub expand: Vec<String>,

  /// Output the decoded result as JSON
  #[arg(long)]
  pub json: bool,
}

impl SearchArgs {
  pub fn has_query(&self) -> bool {
    self.cql.as_deref().is_some_and(|cql| !cql.trim().is_empty())
      || !self.space.is_empty()
      || !self.content_type.is_empty()
      || self.text.is_some()
  }

  /// The CQL to send: the raw query, or one built from the filters joined
  /// with `AND`.
  pub fn to_cql(&self) -> String {
    if let Some(cql) = &self.cql {
      return cql.trim().to_string();
    }

    let mut conditions: Vec<(Field, Operator, Vec<String>)> = Vec::new();
    if !self.space.is_empty() {
      conditions.push(membership(Field::Space, &self.space));
    }
    if !self.content_type.is_empty() {
      conditions.push(membership(Field::Type, &self.content_type));
    }
    if let Some(text) = &self.text {
      conditions.push((Field::Text, Operator::Contains, vec![quote(text)]));
    }

    let mut builder = CqlBuilder::new();
    let mut conditions = conditions.into_iter();
    let Some((field, operator, operands)) = conditions.next() else {
      return String::new();
    };
    let mut handle = builder.add_condition(Some(field), Some(operator), &operands);
    for (field, operator, operands) in conditions {
      handle = handle.and().add_condition(Some(field), Some(operator), &operands);
    }

    let cql = match self.order_by {
      Some(sort) => {
        let order = if self.desc { SortOrder::Desc } else { SortOrder::Asc };
        handle.order_by(Some(order), &[sort.field()])
      }
      None => handle.build(),
    };
    cql.trim_end().to_string()
  }
}

/// `field = "v"` for one value, `field IN ("a","b")` for several.
fn membership(field: Field, values: &[String]) -> (Field, Operator, Vec<String>) {
  let operands: Vec<String> = values.iter().map(|value| quote(value)).collect();
  let operator = if operands.len() == 1 {
    Operator::Equals
  } else {
    Operator::In
  };
  (field, operator, operands)
}

/// Run the search described by `args` and print the hits.
pub(crate) async fn handle_search_command(args: &SearchArgs, cli: &Cli, colors: &ColorScheme) {
  let cql = args.to_cql();
  let request = CqlSearchBean::new(cql.clone())
    .with_start(args.start)
    .with_limit(args.limit)
    .with_expand(args.expand.iter().cloned());

  if !args.json {
    println!("{} {}", colors.info("→"), colors.code(&cql));
  }

  let client = open_client(cli, colors);
  let result = match client.search().search_content(&request).await {
    Ok(result) => result,
    Err(e) => fail("Search failed", &e, colors),
  };

  if args.json {
    if let Err(e) = print_json(&result) {
      fail("Failed to render search result as JSON", &e, colors);
    }
    return;
  }

  if result.results.is_empty() {
    println!("{}", colors.dimmed("No results"));
    return;
  }

  print!(
    "{}",
    render_table(&["KIND", "ID", "TITLE", "LAST MODIFIED"], &result_rows(&result))
  );
  println!(
    "\n{} {} of {} in {} ms",
    colors.success("✓"),
    colors.number(result.size),
    colors.number(result.total_size),
    colors.number(result.search_duration)
  );
}

fn result_rows(result: &CqlSearchResult) -> Vec<Vec<String>> {
  result
    .results
    .iter()
    .map(|entry| {
      let id = match &entry.bean {
        SearchResultBean::Content(content) => content.id.clone(),
        SearchResultBean::Space(space) => space.key.clone(),
      };
      vec![
        entry.bean.kind().to_string(),
        id.unwrap_or_default(),
        entry.bean.title().unwrap_or_default().to_string(),
        format_last_modified(&entry.last_modified),
      ]
    })
    .collect()
}
