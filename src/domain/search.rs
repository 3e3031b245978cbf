//! CQL search requests and the polymorphic search-result envelope.
//!
//! The `search` endpoint mixes content hits and space hits in one `results`
//! array. Each element carries its payload under either a `content` or a
//! `space` key, and nothing else tells them apart, so decoding runs in two
//! passes: the envelope is decoded structurally, then every element is
//! dispatched on whichever of those keys it contains.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::content::ContentBean;
use super::links::LinksBean;
use super::space::SpaceBean;

const CONTENT: &str = "content";
const SPACE: &str = "space";
const LAST_MODIFIED: &str = "lastModified";

/// Wire format of `lastModified` (`yyyy-MM-dd'T'HH:mm:ss.SSSZ`).
pub const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parameters of a `GET search` request.
#[derive(Debug, Clone, Default)]
pub struct CqlSearchBean {
  /// The CQL query, e.g. built with [`CqlBuilder`](crate::cql::CqlBuilder).
  pub cql: String,
  /// JSON context (space key, content id) used to resolve relative CQL
  /// functions such as `currentSpace()`.
  pub cql_context: Option<String>,
  /// Excerpt strategy: `highlight`, `indexed` or `none`.
  pub excerpt: Option<String>,
  pub expand: Vec<String>,
  pub start: u32,
  pub limit: u32,
  pub include_archived_spaces: bool,
}

impl CqlSearchBean {
  pub fn new(cql: impl Into<String>) -> Self {
    Self {
      cql: cql.into(),
      ..Self::default()
    }
  }

  pub fn with_limit(mut self, limit: u32) -> Self {
    self.limit = limit;
    self
  }

  pub fn with_start(mut self, start: u32) -> Self {
    self.start = start;
    self
  }

  pub fn with_expand<I, S>(mut self, expand: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.expand = expand.into_iter().map(Into::into).collect();
    self
  }
}

/// Failure to decode a search response.
///
/// Any failure aborts the whole response; there is no partial result.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("search response is not valid JSON: {0}")]
  Json(#[source] serde_json::Error),
  #[error("search response is not a JSON object")]
  NotAnObject,
  #[error("search response does not match the result envelope: {0}")]
  Envelope(#[source] serde_json::Error),
  #[error("search response has no `results` field")]
  MissingResults,
  #[error("search response `results` is not an array")]
  ResultsNotArray,
  #[error("search result {index} is not a JSON object")]
  EntryNotObject { index: usize },
  #[error("search result {index} has an invalid `{key}` payload: {source}")]
  Payload {
    index: usize,
    key: &'static str,
    #[source]
    source: serde_json::Error,
  },
  #[error("search result {index} has no string `lastModified` value")]
  MissingLastModified { index: usize },
  #[error("search result {index} has an unparseable `lastModified` value {value:?}: {source}")]
  Timestamp {
    index: usize,
    value: String,
    #[source]
    source: chrono::ParseError,
  },
}

/// The payload of one search hit.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultBean {
  Content(ContentBean),
  Space(SpaceBean),
}

impl SearchResultBean {
  pub fn as_content(&self) -> Option<&ContentBean> {
    match self {
      SearchResultBean::Content(content) => Some(content),
      SearchResultBean::Space(_) => None,
    }
  }

  pub fn as_space(&self) -> Option<&SpaceBean> {
    match self {
      SearchResultBean::Space(space) => Some(space),
      SearchResultBean::Content(_) => None,
    }
  }

  /// Discriminator key this payload is stored under on the wire.
  pub fn kind(&self) -> &'static str {
    match self {
      SearchResultBean::Content(_) => CONTENT,
      SearchResultBean::Space(_) => SPACE,
    }
  }

  /// Content title or space name, whichever applies.
  pub fn title(&self) -> Option<&str> {
    match self {
      SearchResultBean::Content(content) => content.title.as_deref(),
      SearchResultBean::Space(space) => space.name.as_deref(),
    }
  }
}

/// One search hit together with its modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultEntry {
  pub bean: SearchResultBean,
  pub last_modified: DateTime<Utc>,
}

/// Paginated envelope returned by `GET search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CqlSearchResult {
  /// Decoded hits, in response order.
  pub results: Vec<SearchResultEntry>,
  pub start: u32,
  pub limit: u32,
  pub size: u32,
  pub total_size: u32,
  /// The CQL query the server actually ran.
  pub cql_query: Option<String>,
  /// Server-side search time in milliseconds.
  pub search_duration: u64,
  pub links: Option<LinksBean>,
}

/// Envelope fields that decode structurally. `results` is handled apart.
#[derive(Deserialize)]
struct EnvelopeFields {
  #[serde(default)]
  start: u32,
  #[serde(default)]
  limit: u32,
  #[serde(default)]
  size: u32,
  #[serde(rename = "totalSize", default)]
  total_size: u32,
  #[serde(rename = "cqlQuery", default)]
  cql_query: Option<String>,
  #[serde(rename = "searchDuration", default)]
  search_duration: u64,
  #[serde(rename = "_links", default)]
  links: Option<LinksBean>,
}

/// Decode a raw `GET search` response body.
///
/// # Errors
/// Returns [`DecodeError`] when the text is not JSON or when
/// [`decode`] rejects the value.
pub fn decode_str(raw: &str) -> Result<CqlSearchResult, DecodeError> {
  let value: Value = serde_json::from_str(raw).map_err(DecodeError::Json)?;
  decode(&value)
}

/// Decode a `GET search` response.
///
/// Elements of `results` are inspected for a `content` key first and a
/// `space` key second; the first one present selects the payload type.
/// Elements holding neither are skipped without error.
///
/// # Errors
/// Returns [`DecodeError`] when the envelope is malformed, `results` is
/// missing or not an array, an element is not an object, a payload does not
/// decode, or `lastModified` is absent or unparseable.
pub fn decode(raw: &Value) -> Result<CqlSearchResult, DecodeError> {
  let object = raw.as_object().ok_or(DecodeError::NotAnObject)?;
  let fields = EnvelopeFields::deserialize(raw).map_err(DecodeError::Envelope)?;

  let results = object
    .get("results")
    .ok_or(DecodeError::MissingResults)?
    .as_array()
    .ok_or(DecodeError::ResultsNotArray)?;

  let mut entries = Vec::with_capacity(results.len());
  for (index, element) in results.iter().enumerate() {
    let entry = element.as_object().ok_or(DecodeError::EntryNotObject { index })?;
    if let Some(decoded) = decode_entry(index, entry)? {
      entries.push(decoded);
    }
  }

  Ok(CqlSearchResult {
    results: entries,
    start: fields.start,
    limit: fields.limit,
    size: fields.size,
    total_size: fields.total_size,
    cql_query: fields.cql_query,
    search_duration: fields.search_duration,
    links: fields.links,
  })
}

fn decode_entry(index: usize, entry: &Map<String, Value>) -> Result<Option<SearchResultEntry>, DecodeError> {
  let bean = if let Some(payload) = entry.get(CONTENT) {
    let content = ContentBean::deserialize(payload).map_err(|source| DecodeError::Payload {
      index,
      key: CONTENT,
      source,
    })?;
    SearchResultBean::Content(content)
  } else if let Some(payload) = entry.get(SPACE) {
    let space = SpaceBean::deserialize(payload).map_err(|source| DecodeError::Payload {
      index,
      key: SPACE,
      source,
    })?;
    SearchResultBean::Space(space)
  } else {
    debug!(
      index,
      keys = ?entry.keys().collect::<Vec<_>>(),
      "Skipping search result without a content or space payload"
    );
    return Ok(None);
  };

  let value = entry
    .get(LAST_MODIFIED)
    .and_then(Value::as_str)
    .ok_or(DecodeError::MissingLastModified { index })?;
  let last_modified = parse_last_modified(value).map_err(|source| DecodeError::Timestamp {
    index,
    value: value.to_string(),
    source,
  })?;

  Ok(Some(SearchResultEntry { bean, last_modified }))
}

/// Parse a `lastModified` timestamp and normalise it to UTC.
///
/// Accepts a numeric offset (`+0000`) as well as a literal `Z`.
pub fn parse_last_modified(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  if let Some(local) = value.strip_suffix('Z') {
    return NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.3f").map(|naive| naive.and_utc());
  }
  DateTime::parse_from_str(value, LAST_MODIFIED_FORMAT).map(|parsed| parsed.with_timezone(&Utc))
}

/// Render a timestamp in the wire format, always with a `+0000` offset.
pub fn format_last_modified(timestamp: &DateTime<Utc>) -> String {
  timestamp.format(LAST_MODIFIED_FORMAT).to_string()
}

#[derive(Serialize)]
struct WireEntry<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  content: Option<&'a ContentBean>,
  #[serde(skip_serializing_if = "Option::is_none")]
  space: Option<&'a SpaceBean>,
  #[serde(rename = "lastModified")]
  last_modified: String,
}

#[derive(Serialize)]
struct WireEnvelope<'a> {
  results: Vec<WireEntry<'a>>,
  start: u32,
  limit: u32,
  size: u32,
  #[serde(rename = "totalSize")]
  total_size: u32,
  #[serde(rename = "cqlQuery", skip_serializing_if = "Option::is_none")]
  cql_query: Option<&'a str>,
  #[serde(rename = "searchDuration")]
  search_duration: u64,
  #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
  links: Option<&'a LinksBean>,
}

impl Serialize for CqlSearchResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let results = self
      .results
      .iter()
      .map(|entry| WireEntry {
        content: entry.bean.as_content(),
        space: entry.bean.as_space(),
        last_modified: format_last_modified(&entry.last_modified),
      })
      .collect();

    WireEnvelope {
      results,
      start: self.start,
      limit: self.limit,
      size: self.size,
      total_size: self.total_size,
      cql_query: self.cql_query.as_deref(),
      search_duration: self.search_duration,
      links: self.links.as_ref(),
    }
    .serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for CqlSearchResult {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    decode(&value).map_err(serde::de::Error::custom)
  }
}
