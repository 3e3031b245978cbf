//! Base URIs of a Confluence instance and path building on top of them.

use anyhow::{Context, Result, anyhow};
use url::Url;

const REST_API_PATH: &str = "rest/api";
const CLOUD_HOST_SUFFIX: &str = ".atlassian.net";
const CLOUD_CONTEXT_PATH: &str = "/wiki";

/// Resolves the two roots every request is built from: the instance base
/// (used for downloads) and the REST API root beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUriProvider {
  base_uri: Url,
  rest_api_base_uri: Url,
}

impl ApiUriProvider {
  /// Derive the URIs from the instance base URL.
  ///
  /// Atlassian Cloud hosts serve Confluence below `/wiki`; that context path
  /// is added when the URL has no path of its own.
  ///
  /// # Arguments
  /// * `base_url` - Instance URL such as `https://example.atlassian.net` or
  ///   `https://confluence.example.com/confluence`.
  ///
  /// # Errors
  /// Returns an error when the URL does not parse or has no host.
  pub fn new(base_url: &str) -> Result<Self> {
    let mut base_uri = Url::parse(base_url.trim()).context("Invalid Confluence base URL")?;
    let host = base_uri
      .host_str()
      .ok_or_else(|| anyhow!("Confluence base URL has no host: {base_url}"))?
      .to_string();

    base_uri.set_query(None);
    base_uri.set_fragment(None);

    let mut path = base_uri.path().trim_end_matches('/').to_string();
    if path.is_empty() && host.ends_with(CLOUD_HOST_SUFFIX) {
      path = CLOUD_CONTEXT_PATH.to_string();
    }
    base_uri.set_path(&path);

    let rest_api_base_uri = build_path(&base_uri, &[REST_API_PATH]);

    Ok(Self {
      base_uri,
      rest_api_base_uri,
    })
  }

  /// Instance root including its context path, e.g. `https://host/wiki`.
  pub fn base_uri(&self) -> &Url {
    &self.base_uri
  }

  /// REST root, e.g. `https://host/wiki/rest/api`.
  pub fn rest_api_base_uri(&self) -> &Url {
    &self.rest_api_base_uri
  }
}

/// Append path segments to `base`.
///
/// A `/` is inserted before every segment that does not start with one. A
/// `?` inside a segment splits off a query string, which replaces whatever
/// query the URI had.
pub fn build_path<S: AsRef<str>>(base: &Url, paths: &[S]) -> Url {
  let mut uri = base.clone();
  let mut path = uri.path().trim_end_matches('/').to_string();

  for segment in paths {
    let segment = match segment.as_ref().split_once('?') {
      Some((segment, query)) => {
        uri.set_query(Some(query));
        segment
      }
      None => segment.as_ref(),
    };

    if !segment.starts_with('/') {
      path.push('/');
    }
    path.push_str(segment);
  }

  uri.set_path(&path);
  uri
}
