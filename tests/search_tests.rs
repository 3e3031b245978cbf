//! CQL search tests against the fake request service
//!
//! Builds queries with `CqlBuilder`, runs them through the search client and
//! checks how mixed content/space responses are decoded.

mod common;

use chrono::{TimeZone, Utc};
use common::fake_requests::{FakeRequestService, Method, client_with};
use common::fixtures;
use confluence_rest::cql::{CqlBuilder, Field, Operator, SortOrder, quote};
use confluence_rest::domain::search::format_last_modified;
use confluence_rest::domain::{CqlSearchBean, DecodeError, SearchResultBean};
use serde_json::json;

#[tokio::test]
async fn test_search_with_built_cql() {
  let fake = FakeRequestService::new().respond(Method::Get, "search", fixtures::sample_search_response());
  let (client, fake) = client_with(fake);

  let mut builder = CqlBuilder::new();
  let cql = builder
    .add_condition(Some(Field::Space), Some(Operator::Equals), &[quote("DOCS")])
    .and()
    .add_condition(Some(Field::Type), Some(Operator::In), &["page", "comment"])
    .order_by(Some(SortOrder::Desc), &[Field::LastModified]);

  let request = CqlSearchBean::new(cql)
    .with_limit(25)
    .with_expand(["content.space"]);
  let result = client.search().search_content(&request).await.unwrap();

  let sent = fake.single_request();
  assert_eq!(sent.uri.path(), "/wiki/rest/api/search");
  assert_eq!(
    sent.query("cql").as_deref(),
    Some(r#"space = "DOCS" AND type IN (page,comment) ORDER BY lastmodified DESC"#)
  );
  assert_eq!(sent.query("limit").as_deref(), Some("25"));
  assert_eq!(sent.query("expand").as_deref(), Some("content.space"));
  assert_eq!(sent.query("start"), None);

  assert_eq!(result.size, 3);
  assert_eq!(result.total_size, 3);
  assert_eq!(result.search_duration, 42);
  assert_eq!(result.cql_query.as_deref(), Some(r#"space = "DOCS""#));
  assert_eq!(result.results.len(), 3);
}

#[tokio::test]
async fn test_search_decodes_mixed_results_in_order() {
  let fake = FakeRequestService::new().respond(Method::Get, "search", fixtures::sample_search_response());
  let (client, _fake) = client_with(fake);

  let result = client
    .search()
    .search_content(&CqlSearchBean::new(r#"space = "DOCS""#))
    .await
    .unwrap();

  let kinds: Vec<_> = result.results.iter().map(|entry| entry.bean.kind()).collect();
  assert_eq!(kinds, vec!["content", "space", "content"]);

  let page = result.results[0].bean.as_content().unwrap();
  assert_eq!(page.id.as_deref(), Some("123456"));
  assert_eq!(page.content_type.as_deref(), Some("page"));

  let space = result.results[1].bean.as_space().unwrap();
  assert_eq!(space.key.as_deref(), Some("DOCS"));
  assert_eq!(
    result.results[1].last_modified,
    Utc.with_ymd_and_hms(2016, 6, 30, 8, 0, 0).unwrap()
  );

  // +0200 offset normalised to UTC
  let stamps: Vec<_> = result
    .results
    .iter()
    .map(|entry| format_last_modified(&entry.last_modified))
    .collect();
  insta::assert_debug_snapshot!(stamps, @r#"
  [
      "2016-07-06T10:39:38.000+0000",
      "2016-06-30T08:00:00.000+0000",
      "2016-07-07T12:05:00.123+0000",
  ]
  "#);
}

#[tokio::test]
async fn test_search_skips_unknown_payloads() {
  let fake = FakeRequestService::new().respond(
    Method::Get,
    "search",
    json!({
      "results": [
        { "user": { "displayName": "Jane Doe" }, "lastModified": "2016-07-06T10:39:38.000+0000" },
        { "content": { "id": "1", "title": "Kept" }, "lastModified": "2016-07-06T10:39:38.000+0000" }
      ],
      "size": 2,
      "totalSize": 2
    }),
  );
  let (client, _fake) = client_with(fake);

  let result = client
    .search()
    .search_content(&CqlSearchBean::new("type = page"))
    .await
    .unwrap();

  assert_eq!(result.results.len(), 1);
  assert_eq!(result.results[0].bean.title(), Some("Kept"));
  assert_eq!(result.size, 2);
}

#[tokio::test]
async fn test_search_prefers_content_over_space() {
  let fake = FakeRequestService::new().respond(
    Method::Get,
    "search",
    json!({
      "results": [{
        "content": { "id": "7", "title": "Page" },
        "space": { "key": "DOCS", "name": "Documentation" },
        "lastModified": "2016-07-06T10:39:38.000+0000"
      }]
    }),
  );
  let (client, _fake) = client_with(fake);

  let result = client
    .search()
    .search_content(&CqlSearchBean::new("id = 7"))
    .await
    .unwrap();

  assert!(matches!(result.results[0].bean, SearchResultBean::Content(_)));
  assert_eq!(result.start, 0);
  assert_eq!(result.total_size, 0);
}

#[tokio::test]
async fn test_search_with_bad_timestamp_fails() {
  let fake = FakeRequestService::new().respond(
    Method::Get,
    "search",
    json!({
      "results": [{ "content": { "id": "1" }, "lastModified": "yesterday" }]
    }),
  );
  let (client, _fake) = client_with(fake);

  let error = client
    .search()
    .search_content(&CqlSearchBean::new("id = 1"))
    .await
    .unwrap_err();

  match error.downcast_ref::<DecodeError>() {
    Some(DecodeError::Timestamp { index, value, .. }) => {
      assert_eq!(*index, 0);
      assert_eq!(value, "yesterday");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn test_search_without_results_fails() {
  let fake = FakeRequestService::new().respond(Method::Get, "search", json!({ "size": 0 }));
  let (client, _fake) = client_with(fake);

  let error = client
    .search()
    .search_content(&CqlSearchBean::new("type = page"))
    .await
    .unwrap_err();

  assert!(matches!(
    error.downcast_ref::<DecodeError>(),
    Some(DecodeError::MissingResults)
  ));
}

#[tokio::test]
async fn test_search_result_serializes_back_to_wire_shape() {
  let fake = FakeRequestService::new().respond(Method::Get, "search", fixtures::sample_search_response());
  let (client, _fake) = client_with(fake);

  let result = client
    .search()
    .search_content(&CqlSearchBean::new(r#"space = "DOCS""#))
    .await
    .unwrap();

  let wire = serde_json::to_value(&result).unwrap();
  assert_eq!(wire["totalSize"], 3);
  assert_eq!(wire["searchDuration"], 42);
  assert_eq!(wire["results"][1]["space"]["key"], "DOCS");
  assert_eq!(wire["results"][2]["lastModified"], "2016-07-07T12:05:00.123+0000");
  assert!(wire["results"][0].get("space").is_none());
}
