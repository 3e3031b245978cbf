//! Content labels.

use serde::{Deserialize, Serialize};

use super::links::LinksBean;

/// A label attached to content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBean {
  /// Namespace of the label (`global`, `my`, `team`).
  pub prefix: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
}

impl LabelBean {
  /// A label in the `global` namespace.
  pub fn global(name: impl Into<String>) -> Self {
    Self {
      prefix: "global".to_string(),
      name: name.into(),
      id: None,
    }
  }
}

/// Envelope returned by the label endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsBean {
  #[serde(default)]
  pub results: Vec<LabelBean>,
  #[serde(default)]
  pub start: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub size: u32,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}
