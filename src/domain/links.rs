//! Hypermedia links attached to most Confluence resources.

use serde::{Deserialize, Serialize};

/// The `_links` object returned alongside resources and result envelopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksBean {
  /// Base URL of the Confluence instance.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub base: Option<String>,
  /// Context path (typically `/wiki`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<String>,
  /// Fully qualified API endpoint for the resource.
  #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
  pub self_link: Option<String>,
  /// Path to the resource within the web UI.
  #[serde(rename = "webui", skip_serializing_if = "Option::is_none")]
  pub web_ui: Option<String>,
  #[serde(rename = "tinyui", skip_serializing_if = "Option::is_none")]
  pub tiny_ui: Option<String>,
  /// Download path for attachments, relative to the context path.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub download: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub edit: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub collection: Option<String>,
  /// Next page of a paginated envelope.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next: Option<String>,
  /// Previous page of a paginated envelope.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prev: Option<String>,
}
