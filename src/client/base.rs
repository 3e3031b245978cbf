//! Plumbing shared by the content, space, search and user clients.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::pool::{TaskHandle, TaskPool};
use super::request::RequestService;
use super::uri::{ApiUriProvider, build_path};
use crate::domain::AttachmentUpload;

/// Query parameters in request order. Keys may repeat.
pub(crate) type QueryParams = Vec<(&'static str, String)>;

#[derive(Clone)]
pub(crate) struct BaseClient {
  requests: Arc<dyn RequestService>,
  uris: Arc<ApiUriProvider>,
  pool: TaskPool,
}

impl BaseClient {
  pub(crate) fn new(requests: Arc<dyn RequestService>, uris: ApiUriProvider, pool: TaskPool) -> Self {
    Self {
      requests,
      uris: Arc::new(uris),
      pool,
    }
  }

  pub(crate) fn uris(&self) -> &ApiUriProvider {
    &self.uris
  }

  pub(crate) fn pool(&self) -> &TaskPool {
    &self.pool
  }

  /// Run `operation` on the pool with a clone of this client.
  pub(crate) fn submit<T, F, Fut>(&self, operation: F) -> TaskHandle<T>
  where
    T: Send + 'static,
    F: FnOnce(BaseClient) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
  {
    self.pool.submit(operation(self.clone()))
  }

  /// URI below the REST API root with `params` as its query string.
  pub(crate) fn rest_uri<S: AsRef<str>>(&self, paths: &[S], params: &QueryParams) -> Url {
    let mut uri = build_path(self.uris.rest_api_base_uri(), paths);
    if !params.is_empty() {
      uri.query_pairs_mut().extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
    }
    uri
  }

  /// URI below the instance root, for resources outside the REST API.
  pub(crate) fn non_rest_uri<S: AsRef<str>>(&self, paths: &[S]) -> Url {
    build_path(self.uris.base_uri(), paths)
  }

  pub(crate) async fn get<T: DeserializeOwned>(&self, uri: Url) -> Result<T> {
    debug!(%uri, "GET");
    let value = self.requests.execute_get_request(&uri).await?;
    decode_response(value, &uri)
  }

  pub(crate) async fn get_value(&self, uri: Url) -> Result<Value> {
    debug!(%uri, "GET");
    self.requests.execute_get_request(&uri).await
  }

  pub(crate) async fn download(&self, uri: Url) -> Result<Vec<u8>> {
    debug!(%uri, "GET (download)");
    self.requests.execute_get_request_for_download(&uri).await
  }

  pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(&self, uri: Url, body: &B) -> Result<T> {
    debug!(%uri, "POST");
    let body = serde_json::to_value(body).context("Failed to serialize request body")?;
    let value = self.requests.execute_post_request(&uri, &body).await?;
    decode_response(value, &uri)
  }

  pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(&self, uri: Url, body: &B) -> Result<T> {
    debug!(%uri, "PUT");
    let body = serde_json::to_value(body).context("Failed to serialize request body")?;
    let value = self.requests.execute_put_request(&uri, &body).await?;
    decode_response(value, &uri)
  }

  pub(crate) async fn upload<T: DeserializeOwned>(&self, uri: Url, upload: &AttachmentUpload) -> Result<T> {
    debug!(%uri, title = %upload.title, bytes = upload.data.len(), "POST (upload)");
    let value = self.requests.execute_post_request_for_upload(&uri, upload).await?;
    decode_response(value, &uri)
  }
}

fn decode_response<T: DeserializeOwned>(value: Value, uri: &Url) -> Result<T> {
  serde_json::from_value(value).with_context(|| format!("Failed to parse response from {uri}"))
}

/// Comma-join `expand` properties; `None` when there are none.
pub(crate) fn join_expand<S: AsRef<str>>(expand: &[S]) -> Option<String> {
  let joined = expand
    .iter()
    .map(|property| property.as_ref().trim())
    .filter(|property| !property.is_empty())
    .collect::<Vec<_>>()
    .join(",");
  (!joined.is_empty()).then_some(joined)
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
  value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
