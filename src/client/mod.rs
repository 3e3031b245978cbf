//! Client layer: URI building, the transport seam, the task pool and the
//! per-resource clients.
//!
//! # Example
//!
//! ```ignore
//! use confluence_rest::client::{ClientOptions, ConfluenceRestClient};
//! use confluence_rest::domain::CqlSearchBean;
//!
//! let client = ConfluenceRestClient::connect(
//!   "https://example.atlassian.net",
//!   "user@example.com",
//!   "api-token",
//!   ClientOptions::default(),
//! )?;
//!
//! let result = client.search().search_content(&CqlSearchBean::new("type = page")).await?;
//! for entry in result.results {
//!   println!("{:?} {}", entry.bean.title(), entry.last_modified);
//! }
//! ```

mod base;
pub mod content;
pub mod http;
pub mod pool;
pub mod request;
pub mod search;
pub mod space;
pub mod uri;
pub mod user;

use std::sync::Arc;

use anyhow::Result;

use self::base::BaseClient;
pub use self::content::ContentClient;
pub use self::http::HttpRequestService;
pub use self::pool::{TaskHandle, TaskPool};
pub use self::request::{RequestService, RestError};
pub use self::search::SearchClient;
pub use self::space::SpaceClient;
pub use self::uri::{ApiUriProvider, build_path};
pub use self::user::UserClient;

/// Transport and pool settings for [`ConfluenceRestClient::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
  /// Request timeout in seconds.
  pub timeout_secs: u64,
  /// Maximum requests per second.
  pub rate_limit: usize,
  /// Maximum number of operations running at once.
  pub pool_size: usize,
}

impl Default for ClientOptions {
  fn default() -> Self {
    Self {
      timeout_secs: 30,
      rate_limit: 10,
      pool_size: 4,
    }
  }
}

/// Entry point handing out the content, space, search and user clients.
///
/// All clients share one request service, one set of base URIs and one
/// task pool.
#[derive(Clone)]
pub struct ConfluenceRestClient {
  base: BaseClient,
}

impl ConfluenceRestClient {
  /// Assemble a client from its parts (enables testing with fake request
  /// services).
  pub fn new(requests: Arc<dyn RequestService>, uris: ApiUriProvider, pool: TaskPool) -> Self {
    Self {
      base: BaseClient::new(requests, uris, pool),
    }
  }

  /// Connect to a live instance over HTTP with Basic authentication.
  ///
  /// # Errors
  /// Returns an error when the base URL is invalid, the options are out of
  /// range, or no tokio runtime is running.
  pub fn connect(base_url: &str, username: &str, token: &str, options: ClientOptions) -> Result<Self> {
    let uris = ApiUriProvider::new(base_url)?;
    let requests = HttpRequestService::new(username, token, options.timeout_secs, options.rate_limit)?;
    let pool = TaskPool::current(options.pool_size)?;
    Ok(Self::new(Arc::new(requests), uris, pool))
  }

  pub fn uris(&self) -> &ApiUriProvider {
    self.base.uris()
  }

  pub fn pool(&self) -> &TaskPool {
    self.base.pool()
  }

  pub fn content(&self) -> ContentClient {
    ContentClient::new(self.base.clone())
  }

  pub fn space(&self) -> SpaceClient {
    SpaceClient::new(self.base.clone())
  }

  pub fn search(&self) -> SearchClient {
    SearchClient::new(self.base.clone())
  }

  pub fn user(&self) -> UserClient {
    UserClient::new(self.base.clone())
  }
}
