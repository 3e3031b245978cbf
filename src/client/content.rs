//! Operations on pages, blog posts, attachments and labels.

use anyhow::Result;
use tracing::info;
use url::Url;

use super::base::{BaseClient, QueryParams, join_expand, non_blank};
use super::pool::TaskHandle;
use super::request::RestError;
use crate::domain::{
  AttachmentBean, AttachmentResultsBean, AttachmentUpload, ContentBean, ContentQuery, ContentResultsBean, LabelBean,
  LabelsBean,
};

const CONTENT: &str = "content";

/// Client for the `content` endpoints.
#[derive(Clone)]
pub struct ContentClient {
  base: BaseClient,
}

impl ContentClient {
  pub(crate) fn new(base: BaseClient) -> Self {
    Self { base }
  }

  /// Fetch a single piece of content.
  ///
  /// # Arguments
  /// * `id` - Content identifier.
  /// * `version` - Historical version to fetch; `0` selects the latest.
  /// * `expand` - Properties to expand, e.g. `body.storage` or `space`.
  pub fn get_content_by_id<S: AsRef<str>>(&self, id: &str, version: u32, expand: &[S]) -> TaskHandle<ContentBean> {
    let expand = join_expand(expand);
    info!(id, version, expand = ?expand, "Getting content by ID");

    let mut params = QueryParams::new();
    if version > 0 {
      params.push(("version", version.to_string()));
    }
    if let Some(expand) = expand {
      params.push(("expand", expand));
    }

    let uri = self.base.rest_uri(&[CONTENT, id], &params);
    self.base.submit(|base| async move { base.get(uri).await })
  }

  /// List content matching `query`. Unset filters are left off the request.
  pub fn get_content(&self, query: &ContentQuery) -> TaskHandle<ContentResultsBean> {
    info!(
      content_type = ?query.content_type,
      space = ?query.space_key,
      title = ?query.title,
      status = ?query.status,
      posting_day = ?query.posting_day,
      expand = ?query.expand,
      start = query.start,
      limit = query.limit,
      "Getting content"
    );

    let uri = self.base.rest_uri(&[CONTENT], &content_query_params(query));
    self.base.submit(|base| async move { base.get(uri).await })
  }

  /// Create new content (typically a page or blog post).
  ///
  /// # Returns
  /// The created content as stored by the server, including its new id.
  pub fn create_content(&self, content: ContentBean) -> TaskHandle<ContentBean> {
    info!(
      title = ?content.title,
      space = ?content.space.as_ref().and_then(|space| space.key.as_deref()),
      "Creating content"
    );

    let uri = self.base.rest_uri(&[CONTENT], &QueryParams::new());
    self.base.submit(|base| async move { base.post(uri, &content).await })
  }

  /// Replace existing content. The bean must carry the content id and the
  /// next version number.
  ///
  /// # Errors
  /// Returns [`RestError::InvalidArgument`] before submission when the bean
  /// has no id.
  pub fn update_content(&self, content: ContentBean) -> Result<TaskHandle<ContentBean>> {
    let id = content
      .id
      .clone()
      .ok_or_else(|| RestError::InvalidArgument("content to update must have an id".to_string()))?;
    info!(
      id = %id,
      title = ?content.title,
      space = ?content.space.as_ref().and_then(|space| space.key.as_deref()),
      "Updating content"
    );

    let uri = self.base.rest_uri(&[CONTENT, id.as_str()], &QueryParams::new());
    Ok(self.base.submit(|base| async move { base.put(uri, &content).await }))
  }

  /// Attach a file to a page or blog post.
  ///
  /// # Errors
  /// Returns [`RestError::InvalidArgument`] before submission when the parent
  /// has no id. The task fails with [`RestError::UnexpectedContent`] unless
  /// the server reports exactly one stored attachment.
  pub fn upload_attachment(&self, upload: AttachmentUpload, parent: &ContentBean) -> Result<TaskHandle<AttachmentBean>> {
    let parent_id = parent
      .id
      .as_deref()
      .ok_or_else(|| RestError::InvalidArgument("parent content of an attachment must have an id".to_string()))?;
    info!(parent = parent_id, title = %upload.title, "Uploading attachment");

    let uri = self
      .base
      .rest_uri(&[CONTENT, parent_id, "child", "attachment"], &QueryParams::new());
    Ok(self.base.submit(|base| store_single_attachment(base, uri, upload)))
  }

  /// Download the bytes of an attachment.
  ///
  /// The download link is taken from the bean when present; otherwise the
  /// attachment is looked up by id first.
  ///
  /// # Errors
  /// Returns [`RestError::InvalidArgument`] before submission when the
  /// attachment has no id or no title.
  pub fn download_attachment(&self, attachment: &AttachmentBean) -> Result<TaskHandle<Vec<u8>>> {
    let id = attachment
      .id
      .clone()
      .ok_or_else(|| RestError::InvalidArgument("ID of the attachment cannot be null".to_string()))?;
    let title = attachment
      .title
      .as_deref()
      .ok_or_else(|| RestError::InvalidArgument("Title of the attachment cannot be null".to_string()))?;
    info!(id = %id, title, "Downloading attachment");

    let known_link = attachment.links.as_ref().and_then(|links| links.download.clone());
    Ok(self.base.submit(|base| fetch_attachment_bytes(base, id, known_link)))
  }

  /// Add labels to content.
  ///
  /// # Errors
  /// Returns [`RestError::InvalidArgument`] before submission when the
  /// content has no id.
  pub fn add_labels(&self, content: &ContentBean, labels: Vec<LabelBean>) -> Result<TaskHandle<LabelsBean>> {
    let id = content
      .id
      .as_deref()
      .ok_or_else(|| RestError::InvalidArgument("content to label must have an id".to_string()))?;
    info!(
      id,
      labels = ?labels.iter().map(|label| label.name.as_str()).collect::<Vec<_>>(),
      "Adding labels to content"
    );

    let uri = self.base.rest_uri(&[CONTENT, id, "label"], &QueryParams::new());
    Ok(self.base.submit(|base| async move { base.post(uri, &labels).await }))
  }
}

async fn store_single_attachment(base: BaseClient, uri: Url, upload: AttachmentUpload) -> Result<AttachmentBean> {
  let mut stored: AttachmentResultsBean = base.upload(uri, &upload).await?;
  if stored.results.len() != 1 {
    return Err(
      RestError::UnexpectedContent {
        expected: "attachment result set with 1 element".to_string(),
        actual: format!("attachment result set with {} elements", stored.results.len()),
      }
      .into(),
    );
  }
  Ok(stored.results.remove(0))
}

async fn fetch_attachment_bytes(base: BaseClient, id: String, known_link: Option<String>) -> Result<Vec<u8>> {
  let download = match known_link {
    Some(link) => link,
    None => {
      let content: ContentBean = base
        .get(base.rest_uri(&[CONTENT, id.as_str()], &QueryParams::new()))
        .await?;
      content
        .links
        .and_then(|links| links.download)
        .ok_or_else(|| RestError::UnexpectedContent {
          expected: "attachment with a download link".to_string(),
          actual: format!("content {id} without a download link"),
        })?
    }
  };

  base.download(base.non_rest_uri(&[download])).await
}

fn content_query_params(query: &ContentQuery) -> QueryParams {
  let mut params = QueryParams::new();
  if let Some(content_type) = query.content_type {
    params.push(("type", content_type.as_str().to_string()));
  }
  if let Some(space_key) = non_blank(query.space_key.as_deref()) {
    params.push(("spaceKey", space_key));
  }
  if let Some(title) = non_blank(query.title.as_deref()) {
    params.push(("title", title));
  }
  if let Some(status) = query.status {
    params.push(("status", status.as_str().to_string()));
  }
  if let Some(posting_day) = query.posting_day {
    params.push(("postingDay", posting_day.format("%Y-%m-%d").to_string()));
  }
  if let Some(expand) = join_expand(&query.expand) {
    params.push(("expand", expand));
  }
  if query.start > 0 {
    params.push(("start", query.start.to_string()));
  }
  if query.limit > 0 {
    params.push(("limit", query.limit.to_string()));
  }
  params
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::domain::{ContentStatus, ContentType};

  #[test]
  fn test_content_query_params_skip_unset_values() {
    let params = content_query_params(&ContentQuery::default());
    assert!(params.is_empty());

    let params = content_query_params(&ContentQuery {
      space_key: Some("   ".to_string()),
      title: Some(String::new()),
      ..ContentQuery::default()
    });
    assert!(params.is_empty());
  }

  #[test]
  fn test_content_query_params_in_order() {
    let params = content_query_params(&ContentQuery {
      content_type: Some(ContentType::BlogPost),
      space_key: Some("DEMO".to_string()),
      title: Some(" Release notes ".to_string()),
      status: Some(ContentStatus::Any),
      posting_day: NaiveDate::from_ymd_opt(2016, 7, 6),
      expand: vec!["space".to_string(), "version".to_string()],
      start: 25,
      limit: 50,
    });

    let rendered: Vec<_> = params.iter().map(|(key, value)| format!("{key}={value}")).collect();
    assert_eq!(
      rendered,
      vec![
        "type=blogpost",
        "spaceKey=DEMO",
        "title=Release notes",
        "status=any",
        "postingDay=2016-07-06",
        "expand=space,version",
        "start=25",
        "limit=50",
      ]
    );
  }
}
