//! Operations on spaces.

use tracing::info;

use super::base::{BaseClient, QueryParams, join_expand};
use super::pool::TaskHandle;
use crate::domain::{SpaceBean, SpaceQuery, SpaceResultsBean};

const SPACE: &str = "space";

/// Client for the `space` endpoints.
#[derive(Clone)]
pub struct SpaceClient {
  base: BaseClient,
}

impl SpaceClient {
  pub(crate) fn new(base: BaseClient) -> Self {
    Self { base }
  }

  /// List spaces matching `query`. Keys and labels are sent as repeated
  /// parameters.
  pub fn get_spaces(&self, query: &SpaceQuery) -> TaskHandle<SpaceResultsBean> {
    info!(
      keys = ?query.space_keys,
      space_type = ?query.space_type,
      status = ?query.status,
      labels = ?query.labels,
      expand = ?query.expand,
      start = query.start,
      limit = query.limit,
      "Getting spaces"
    );

    let uri = self.base.rest_uri(&[SPACE], &space_query_params(query));
    self.base.submit(|base| async move { base.get(uri).await })
  }

  /// Fetch one space by its key.
  pub fn get_space_by_key<S: AsRef<str>>(&self, key: &str, expand: &[S]) -> TaskHandle<SpaceBean> {
    let expand = join_expand(expand);
    info!(key, expand = ?expand, "Getting space by key");

    let mut params = QueryParams::new();
    if let Some(expand) = expand {
      params.push(("expand", expand));
    }

    let uri = self.base.rest_uri(&[SPACE, key], &params);
    self.base.submit(|base| async move { base.get(uri).await })
  }
}

fn space_query_params(query: &SpaceQuery) -> QueryParams {
  let mut params = QueryParams::new();
  for key in query.space_keys.iter().map(|key| key.trim()).filter(|key| !key.is_empty()) {
    params.push(("spaceKey", key.to_string()));
  }
  if let Some(space_type) = query.space_type {
    params.push(("type", space_type.as_str().to_string()));
  }
  if let Some(status) = query.status {
    params.push(("status", status.as_str().to_string()));
  }
  for label in query.labels.iter().map(|label| label.trim()).filter(|label| !label.is_empty()) {
    params.push(("label", label.to_string()));
  }
  if let Some(expand) = join_expand(&query.expand) {
    params.push(("expand", expand));
  }
  if query.start > 0 {
    params.push(("start", query.start.to_string()));
  }
  if query.limit > 0 {
    params.push(("limit", query.limit.to_string()));
  }
  params
}
