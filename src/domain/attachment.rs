//! Attachment metadata and upload payloads.

use serde::{Deserialize, Serialize};

use super::links::LinksBean;

/// Attachment metadata as returned by the content endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentBean {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub attachment_type: Option<String>,
  /// File name shown in Confluence.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<AttachmentMetadata>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub extensions: Option<AttachmentExtensions>,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
  #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
  pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentExtensions {
  #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
  pub media_type: Option<String>,
  /// Size of the attachment in bytes.
  #[serde(rename = "fileSize", skip_serializing_if = "Option::is_none")]
  pub file_size: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
}

/// Envelope returned by the attachment endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentResultsBean {
  #[serde(default)]
  pub results: Vec<AttachmentBean>,
  #[serde(default)]
  pub start: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub size: u32,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}

/// A file to attach to existing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
  /// File name the attachment is stored under.
  pub title: String,
  pub data: Vec<u8>,
  /// Version comment recorded with the upload.
  pub comment: Option<String>,
  /// MIME type; the server guesses from the file name when absent.
  pub media_type: Option<String>,
}

impl AttachmentUpload {
  pub fn new(title: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
    Self {
      title: title.into(),
      data: data.into(),
      comment: None,
      media_type: None,
    }
  }

  pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = Some(comment.into());
    self
  }

  pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
    self.media_type = Some(media_type.into());
    self
  }
}
