//! `reqwest`-backed [`RequestService`] talking to a live Confluence instance.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, trace};
use url::Url;

use super::request::{RequestService, RestError};
use crate::domain::AttachmentUpload;

/// Header Confluence requires on multipart uploads to bypass XSRF checks.
const XSRF_HEADER: &str = "X-Atlassian-Token";

/// HTTP transport with Basic authentication and client-side rate limiting.
#[derive(Clone)]
pub struct HttpRequestService {
  username: String,
  token: String,
  client: reqwest::Client,
  rate_limiter: Arc<RequestRateLimiter>,
}

/// Simple fixed-window rate limiter to cap the number of requests per interval.
#[derive(Debug)]
struct RequestRateLimiter {
  max_requests: usize,
  window: Duration,
  timestamps: Mutex<VecDeque<Instant>>,
}

impl RequestRateLimiter {
  /// Create a rate limiter with a fixed window.
  ///
  /// # Arguments
  /// * `max_requests` - Maximum number of requests permitted within the window.
  /// * `window` - Duration of the request window used to enforce throttling.
  fn new(max_requests: usize, window: Duration) -> Self {
    Self {
      max_requests,
      window,
      timestamps: Mutex::new(VecDeque::with_capacity(max_requests)),
    }
  }

  /// Wait until the caller can perform another request without exceeding the
  /// rate limit.
  async fn acquire(&self) {
    loop {
      let mut timestamps = self.timestamps.lock().await;
      let now = Instant::now();

      while let Some(earliest) = timestamps.front()
        && now.duration_since(*earliest) >= self.window
      {
        timestamps.pop_front();
      }

      if timestamps.len() < self.max_requests {
        timestamps.push_back(now);
        return;
      }

      let wait_duration = match timestamps.front() {
        Some(earliest) => self.window.saturating_sub(now.duration_since(*earliest)),
        None => Duration::ZERO,
      };

      drop(timestamps);

      if !wait_duration.is_zero() {
        trace!(?wait_duration, "Rate limit reached, waiting");
        sleep(wait_duration).await;
      }
    }
  }
}

impl HttpRequestService {
  /// Create a new HTTP transport.
  ///
  /// # Arguments
  /// * `username` - The user's email address (Cloud) or user name (Server)
  /// * `token` - The API token or password
  /// * `timeout_secs` - Request timeout in seconds
  /// * `rate_limit` - Maximum requests per second
  ///
  /// # Errors
  /// Returns an error if the rate limit is zero or if the underlying
  /// `reqwest::Client` cannot be built.
  pub fn new(
    username: impl Into<String>,
    token: impl Into<String>,
    timeout_secs: u64,
    rate_limit: usize,
  ) -> Result<Self> {
    if rate_limit == 0 {
      return Err(anyhow!("Rate limit must be at least 1 request per second"));
    }

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .user_agent(format!(
        "confluence-rest/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self {
      username: username.into(),
      token: token.into(),
      client,
      rate_limiter: Arc::new(RequestRateLimiter::new(rate_limit, Duration::from_secs(1))),
    })
  }

  /// Get the authorization header value (Basic auth).
  fn auth_header(&self) -> String {
    let credentials = format!("{}:{}", self.username, self.token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
  }

  /// Send a request and turn non-success statuses into [`RestError::Status`].
  async fn send(&self, request: reqwest::RequestBuilder, uri: &Url) -> Result<reqwest::Response> {
    self.rate_limiter.acquire().await;
    debug!(%uri, "Sending request to Confluence");

    let response = request
      .header(AUTHORIZATION, self.auth_header())
      .send()
      .await
      .with_context(|| format!("Failed to send request to {uri}"))?;

    let status = response.status();
    if !status.is_success() {
      let body = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("(no error details)"));
      return Err(RestError::Status {
        status: status.as_u16(),
        body,
      }
      .into());
    }

    Ok(response)
  }

  async fn send_for_json(&self, request: reqwest::RequestBuilder, uri: &Url) -> Result<Value> {
    let response = self.send(request.header(ACCEPT, "application/json"), uri).await?;
    response
      .json()
      .await
      .with_context(|| format!("Failed to parse JSON response from {uri}"))
  }
}

#[async_trait]
impl RequestService for HttpRequestService {
  async fn execute_get_request(&self, uri: &Url) -> Result<Value> {
    self.send_for_json(self.client.get(uri.as_str()), uri).await
  }

  async fn execute_get_request_for_download(&self, uri: &Url) -> Result<Vec<u8>> {
    let response = self.send(self.client.get(uri.as_str()), uri).await?;
    let bytes = response.bytes().await.context("Failed to read download bytes")?;
    Ok(bytes.to_vec())
  }

  async fn execute_post_request(&self, uri: &Url, content: &Value) -> Result<Value> {
    self.send_for_json(self.client.post(uri.as_str()).json(content), uri).await
  }

  async fn execute_put_request(&self, uri: &Url, content: &Value) -> Result<Value> {
    self.send_for_json(self.client.put(uri.as_str()).json(content), uri).await
  }

  async fn execute_post_request_for_upload(&self, uri: &Url, upload: &AttachmentUpload) -> Result<Value> {
    let mut part = Part::bytes(upload.data.clone()).file_name(upload.title.clone());
    if let Some(media_type) = &upload.media_type {
      part = part
        .mime_str(media_type)
        .with_context(|| format!("Invalid media type for attachment {}", upload.title))?;
    }

    let mut form = Form::new().part("file", part);
    if let Some(comment) = &upload.comment {
      form = form.text("comment", comment.clone());
    }

    let request = self
      .client
      .post(uri.as_str())
      .header(XSRF_HEADER, "no-check")
      .multipart(form);
    self.send_for_json(request, uri).await
  }
}
