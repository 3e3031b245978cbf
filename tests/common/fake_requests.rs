//! Fake request service for testing
//!
//! Serves canned JSON responses keyed by HTTP method and URI path, and
//! records every request so tests can assert on the URIs and bodies the
//! clients produced. No network access takes place.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use confluence_rest::client::{ApiUriProvider, ConfluenceRestClient, RequestService, RestError, TaskPool};
use confluence_rest::domain::AttachmentUpload;
use serde_json::Value;
use url::Url;

pub const BASE_URL: &str = "https://example.atlassian.net";
pub const REST_ROOT: &str = "/wiki/rest/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
  Get,
  Post,
  Put,
}

/// A request as seen by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
  pub method: Method,
  pub uri: Url,
  pub body: Option<Value>,
  pub upload: Option<AttachmentUpload>,
}

impl RecordedRequest {
  /// Value of query parameter `key`, if present.
  pub fn query(&self, key: &str) -> Option<String> {
    self
      .uri
      .query_pairs()
      .find(|(name, _)| name == key)
      .map(|(_, value)| value.into_owned())
  }
}

enum Reply {
  Json(Value),
  Status(u16, String),
}

/// A fake request service that returns predefined responses
#[derive(Default)]
pub struct FakeRequestService {
  replies: HashMap<(Method, String), Reply>,
  downloads: HashMap<String, Vec<u8>>,
  requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeRequestService {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answer `method` requests to the REST path `path` (relative to the API
  /// root, e.g. `content/123`) with `body`.
  pub fn respond(mut self, method: Method, path: &str, body: Value) -> Self {
    self.replies.insert((method, rest_path(path)), Reply::Json(body));
    self
  }

  /// Answer `method` requests to `path` with an error status.
  pub fn fail(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
    self
      .replies
      .insert((method, rest_path(path)), Reply::Status(status, body.to_string()));
    self
  }

  /// Serve `bytes` for downloads of the absolute URI path `path`.
  pub fn serve_download(mut self, path: &str, bytes: &[u8]) -> Self {
    self.downloads.insert(path.to_string(), bytes.to_vec());
    self
  }

  /// Every request received so far, in arrival order.
  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.requests.lock().unwrap().clone()
  }

  /// The only request received, failing the test otherwise.
  pub fn single_request(&self) -> RecordedRequest {
    let requests = self.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:#?}");
    requests.into_iter().next().unwrap()
  }

  fn record(&self, method: Method, uri: &Url, body: Option<&Value>, upload: Option<&AttachmentUpload>) {
    self.requests.lock().unwrap().push(RecordedRequest {
      method,
      uri: uri.clone(),
      body: body.cloned(),
      upload: upload.cloned(),
    });
  }

  fn reply(&self, method: Method, uri: &Url) -> Result<Value> {
    match self.replies.get(&(method, uri.path().to_string())) {
      Some(Reply::Json(body)) => Ok(body.clone()),
      Some(Reply::Status(status, body)) => Err(
        RestError::Status {
          status: *status,
          body: body.clone(),
        }
        .into(),
      ),
      None => Err(
        RestError::Status {
          status: 404,
          body: format!("no fake response for {method:?} {}", uri.path()),
        }
        .into(),
      ),
    }
  }
}

#[async_trait]
impl RequestService for FakeRequestService {
  async fn execute_get_request(&self, uri: &Url) -> Result<Value> {
    self.record(Method::Get, uri, None, None);
    self.reply(Method::Get, uri)
  }

  async fn execute_get_request_for_download(&self, uri: &Url) -> Result<Vec<u8>> {
    self.record(Method::Get, uri, None, None);
    self.downloads.get(uri.path()).cloned().ok_or_else(|| {
      RestError::Status {
        status: 404,
        body: format!("no fake download for {}", uri.path()),
      }
      .into()
    })
  }

  async fn execute_post_request(&self, uri: &Url, content: &Value) -> Result<Value> {
    self.record(Method::Post, uri, Some(content), None);
    self.reply(Method::Post, uri)
  }

  async fn execute_put_request(&self, uri: &Url, content: &Value) -> Result<Value> {
    self.record(Method::Put, uri, Some(content), None);
    self.reply(Method::Put, uri)
  }

  async fn execute_post_request_for_upload(&self, uri: &Url, upload: &AttachmentUpload) -> Result<Value> {
    self.record(Method::Post, uri, None, Some(upload));
    self.reply(Method::Post, uri)
  }
}

fn rest_path(path: &str) -> String {
  format!("{REST_ROOT}/{}", path.trim_start_matches('/'))
}

/// A client wired to `fake`, which stays reachable for assertions.
///
/// Must be called inside a tokio runtime.
pub fn client_with(fake: FakeRequestService) -> (ConfluenceRestClient, Arc<FakeRequestService>) {
  let fake = Arc::new(fake);
  let client = ConfluenceRestClient::new(
    fake.clone(),
    ApiUriProvider::new(BASE_URL).unwrap(),
    TaskPool::current(4).unwrap(),
  );
  (client, fake)
}
