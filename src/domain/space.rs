//! Spaces and the query types of the `space` endpoints.

use serde::{Deserialize, Serialize};

use super::links::LinksBean;

/// Space classification accepted as a `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
  Global,
  Personal,
}

impl SpaceType {
  pub fn as_str(&self) -> &'static str {
    match self {
      SpaceType::Global => "global",
      SpaceType::Personal => "personal",
    }
  }
}

/// Space lifecycle states accepted as a `status` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
  Current,
  Archived,
}

impl SpaceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      SpaceStatus::Current => "current",
      SpaceStatus::Archived => "archived",
    }
  }
}

/// A Confluence space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceBean {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<u64>,
  /// Short key that uniquely identifies the space.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub key: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub space_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<IconBean>,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
  /// Names of properties that can be requested through `expand`.
  #[serde(rename = "_expandable", skip_serializing_if = "Option::is_none")]
  pub expandable: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Space icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconBean {
  pub path: String,
  #[serde(default)]
  pub width: u32,
  #[serde(default)]
  pub height: u32,
  #[serde(rename = "isDefault", default)]
  pub is_default: bool,
}

/// Paginated envelope returned by `GET space`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceResultsBean {
  #[serde(default)]
  pub results: Vec<SpaceBean>,
  #[serde(default)]
  pub start: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub size: u32,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}

/// Filters for `GET space`; empty values are left off the request.
#[derive(Debug, Clone, Default)]
pub struct SpaceQuery {
  pub space_keys: Vec<String>,
  pub space_type: Option<SpaceType>,
  pub status: Option<SpaceStatus>,
  pub labels: Vec<String>,
  pub expand: Vec<String>,
  pub start: u32,
  pub limit: u32,
}
