//! Content (pages, blog posts, comments, attachments) and its query types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::links::LinksBean;
use super::space::SpaceBean;
use super::user::UserBean;

/// Kinds of content the `content` endpoints accept as a `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
  Page,
  #[serde(rename = "blogpost")]
  BlogPost,
  Attachment,
  Comment,
}

impl ContentType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ContentType::Page => "page",
      ContentType::BlogPost => "blogpost",
      ContentType::Attachment => "attachment",
      ContentType::Comment => "comment",
    }
  }
}

/// Content lifecycle states accepted as a `status` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
  Current,
  Trashed,
  Historical,
  Draft,
  /// Matches both `current` and `trashed` content.
  Any,
}

impl ContentStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ContentStatus::Current => "current",
      ContentStatus::Trashed => "trashed",
      ContentStatus::Historical => "historical",
      ContentStatus::Draft => "draft",
      ContentStatus::Any => "any",
    }
  }
}

/// A piece of Confluence content.
///
/// Type and status are kept as strings so content kinds newer than
/// [`ContentType`] still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBean {
  /// Identifier assigned by Confluence; absent for content not yet created.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub content_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  /// Space the content lives in.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub space: Option<SpaceBean>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub history: Option<HistoryBean>,
  /// Version information; required by the server when updating.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<VersionBean>,
  /// Parent pages, root first.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ancestors: Option<Vec<ContentBean>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<BodyBean>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<serde_json::Value>,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}

impl ContentBean {
  /// Start a new page in `space_key` with a storage-format body.
  pub fn new_page(space_key: impl Into<String>, title: impl Into<String>, storage: impl Into<String>) -> Self {
    Self {
      content_type: Some(ContentType::Page.as_str().to_string()),
      title: Some(title.into()),
      space: Some(SpaceBean {
        key: Some(space_key.into()),
        ..SpaceBean::default()
      }),
      body: Some(BodyBean {
        storage: Some(StorageBean::storage(storage)),
        view: None,
      }),
      ..Self::default()
    }
  }
}

/// Body content in its different representations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyBean {
  /// Confluence storage-format XHTML.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub storage: Option<StorageBean>,
  /// Rendered HTML, when expanded.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub view: Option<StorageBean>,
}

/// A body value together with its representation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBean {
  pub value: String,
  pub representation: String,
}

impl StorageBean {
  /// Wrap raw storage-format markup.
  pub fn storage(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      representation: "storage".to_string(),
    }
  }
}

/// Version metadata of a piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBean {
  pub number: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub when: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(rename = "minorEdit", default)]
  pub minor_edit: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub by: Option<UserBean>,
}

/// Creation history of a piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryBean {
  #[serde(default)]
  pub latest: bool,
  #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
  pub created_by: Option<UserBean>,
  #[serde(rename = "createdDate", skip_serializing_if = "Option::is_none")]
  pub created_date: Option<String>,
}

/// Paginated envelope returned by `GET content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResultsBean {
  #[serde(default)]
  pub results: Vec<ContentBean>,
  #[serde(default)]
  pub start: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub size: u32,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  pub links: Option<LinksBean>,
}

/// Filters for `GET content`; unset values are left off the request.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
  pub content_type: Option<ContentType>,
  pub space_key: Option<String>,
  /// Title of the page to find. Required by the server for the page type.
  pub title: Option<String>,
  pub status: Option<ContentStatus>,
  /// Posting day of a blog post, sent as `yyyy-MM-dd`.
  pub posting_day: Option<NaiveDate>,
  pub expand: Vec<String>,
  pub start: u32,
  pub limit: u32,
}
