//! The transport seam every client operation goes through.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::domain::AttachmentUpload;

/// Failures reported by the Confluence server or detected while preparing a
/// request.
#[derive(Debug, Error)]
pub enum RestError {
  /// The server answered with a non-success status.
  #[error("Confluence API returned error {status}: {body}")]
  Status { status: u16, body: String },
  /// The server answered successfully with something other than expected.
  #[error("Unexpected content: expected {expected}, got {actual}")]
  UnexpectedContent { expected: String, actual: String },
  /// The request could not be built from the given arguments.
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
}

impl RestError {
  /// HTTP status code when the error came from the server.
  pub fn status(&self) -> Option<u16> {
    match self {
      RestError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Issues requests against the Confluence REST API (enables testing with fake
/// implementations).
///
/// Bodies travel as JSON values; typed decoding happens in the clients.
#[async_trait]
pub trait RequestService: Send + Sync {
  /// `GET` a JSON document.
  async fn execute_get_request(&self, uri: &Url) -> Result<Value>;

  /// `GET` raw bytes, e.g. an attachment download.
  async fn execute_get_request_for_download(&self, uri: &Url) -> Result<Vec<u8>>;

  /// `POST` a JSON body and return the JSON response.
  async fn execute_post_request(&self, uri: &Url, content: &Value) -> Result<Value>;

  /// `PUT` a JSON body and return the JSON response.
  async fn execute_put_request(&self, uri: &Url, content: &Value) -> Result<Value>;

  /// `POST` a multipart file upload and return the JSON response.
  async fn execute_post_request_for_upload(&self, uri: &Url, upload: &AttachmentUpload) -> Result<Value>;
}
