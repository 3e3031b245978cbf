//! CQL search.

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

use super::base::{BaseClient, QueryParams, join_expand, non_blank};
use super::pool::TaskHandle;
use crate::domain::search::decode;
use crate::domain::{CqlSearchBean, CqlSearchResult};

/// Client for the `search` endpoint.
#[derive(Clone)]
pub struct SearchClient {
  base: BaseClient,
}

impl SearchClient {
  pub(crate) fn new(base: BaseClient) -> Self {
    Self { base }
  }

  /// Run a CQL search.
  ///
  /// The response mixes content and space hits; see
  /// [`decode`](crate::domain::search::decode) for how they are told apart.
  /// A response that fails to decode fails the task with a
  /// [`DecodeError`](crate::domain::DecodeError) reachable through
  /// `downcast_ref`.
  pub fn search_content(&self, search: &CqlSearchBean) -> TaskHandle<CqlSearchResult> {
    info!(
      cql = %search.cql,
      cql_context = ?search.cql_context,
      expand = ?search.expand,
      start = search.start,
      limit = search.limit,
      "Searching content"
    );

    let uri = self.base.rest_uri(&["search"], &search_params(search));
    self.base.submit(|base| run_search(base, uri))
  }
}

async fn run_search(base: BaseClient, uri: Url) -> Result<CqlSearchResult> {
  let raw = base.get_value(uri).await?;
  let result = decode(&raw).context("Failed to decode search response")?;
  info!(
    hits = result.results.len(),
    total = result.total_size,
    duration_ms = result.search_duration,
    "Search finished"
  );
  Ok(result)
}

fn search_params(search: &CqlSearchBean) -> QueryParams {
  let mut params: QueryParams = vec![("cql", search.cql.trim().to_string())];
  if let Some(context) = non_blank(search.cql_context.as_deref()) {
    params.push(("cqlcontext", context));
  }
  if let Some(excerpt) = non_blank(search.excerpt.as_deref()) {
    params.push(("excerpt", excerpt));
  }
  if let Some(expand) = join_expand(&search.expand) {
    params.push(("expand", expand));
  }
  if search.include_archived_spaces {
    params.push(("includeArchivedSpaces", "true".to_string()));
  }
  if search.start > 0 {
    params.push(("start", search.start.to_string()));
  }
  if search.limit > 0 {
    params.push(("limit", search.limit.to_string()));
  }
  params
}
