//! Test fixtures for Confluence REST API responses
//!
//! Realistic sample payloads shaped like the server's JSON.

use serde_json::{Value, json};

/// A page with its storage body, space and version expanded.
pub fn sample_page_response() -> Value {
  json!({
    "id": "123456",
    "type": "page",
    "status": "current",
    "title": "Getting Started Guide",
    "space": {
      "id": 98304,
      "key": "DOCS",
      "name": "Documentation",
      "type": "global",
      "status": "current"
    },
    "version": {
      "number": 7,
      "when": "2016-07-06T10:39:38.000Z",
      "minorEdit": false,
      "by": {
        "type": "known",
        "accountId": "5b10a2844c20165700ede21g",
        "displayName": "Jane Doe"
      }
    },
    "ancestors": [
      { "id": "100", "type": "page", "title": "Home" }
    ],
    "body": {
      "storage": {
        "value": "<h1>Getting Started</h1><p>Welcome to our documentation!</p>",
        "representation": "storage"
      }
    },
    "_links": {
      "webui": "/spaces/DOCS/pages/123456/Getting+Started+Guide",
      "tinyui": "/x/QAE",
      "self": "https://example.atlassian.net/wiki/rest/api/content/123456"
    },
    "_expandable": {
      "children": "/rest/api/content/123456/child"
    }
  })
}

/// A paginated list of pages.
pub fn sample_content_list_response() -> Value {
  json!({
    "results": [
      { "id": "123456", "type": "page", "status": "current", "title": "Getting Started Guide" },
      { "id": "123457", "type": "page", "status": "current", "title": "Installation" }
    ],
    "start": 0,
    "limit": 25,
    "size": 2,
    "_links": {
      "base": "https://example.atlassian.net/wiki",
      "context": "/wiki"
    }
  })
}

/// A global space with a plain-text description.
pub fn sample_space_response(key: &str, name: &str) -> Value {
  json!({
    "id": 98304,
    "key": key,
    "name": name,
    "type": "global",
    "status": "current",
    "description": {
      "plain": { "value": format!("{name} space"), "representation": "plain" }
    },
    "icon": {
      "path": "/images/logo/default-space-logo-256.png",
      "width": 48,
      "height": 48,
      "isDefault": true
    },
    "_links": {
      "webui": format!("/spaces/{key}")
    },
    "_expandable": {
      "homepage": "/rest/api/content/65541"
    }
  })
}

/// A list of spaces.
pub fn sample_space_list_response() -> Value {
  json!({
    "results": [
      sample_space_response("DOCS", "Documentation"),
      sample_space_response("ENG", "Engineering")
    ],
    "start": 0,
    "limit": 25,
    "size": 2
  })
}

/// A search response mixing a page, a space and a comment hit.
pub fn sample_search_response() -> Value {
  json!({
    "results": [
      {
        "content": {
          "id": "123456",
          "type": "page",
          "status": "current",
          "title": "Getting Started Guide",
          "_links": { "webui": "/spaces/DOCS/pages/123456" }
        },
        "title": "Getting Started Guide",
        "excerpt": "Welcome to our documentation!",
        "url": "/spaces/DOCS/pages/123456",
        "entityType": "content",
        "lastModified": "2016-07-06T10:39:38.000+0000"
      },
      {
        "space": {
          "id": 98304,
          "key": "DOCS",
          "name": "Documentation",
          "type": "global"
        },
        "title": "Documentation",
        "entityType": "space",
        "lastModified": "2016-06-30T08:00:00.000Z"
      },
      {
        "content": {
          "id": "200001",
          "type": "comment",
          "status": "current",
          "title": "Re: Getting Started Guide"
        },
        "entityType": "content",
        "lastModified": "2016-07-07T14:05:00.123+0200"
      }
    ],
    "start": 0,
    "limit": 25,
    "size": 3,
    "totalSize": 3,
    "cqlQuery": "space = \"DOCS\"",
    "searchDuration": 42,
    "_links": {
      "base": "https://example.atlassian.net/wiki",
      "context": "/wiki"
    }
  })
}

/// The current user.
pub fn sample_current_user_response() -> Value {
  json!({
    "type": "known",
    "accountId": "5b10a2844c20165700ede21g",
    "accountType": "atlassian",
    "email": "jane.doe@example.com",
    "publicName": "Jane Doe",
    "displayName": "Jane Doe",
    "profilePicture": {
      "path": "/wiki/aa-avatar/5b10a2844c20165700ede21g",
      "width": 48,
      "height": 48,
      "isDefault": false
    }
  })
}

/// An attachment as listed under its parent page.
pub fn sample_attachment(id: &str, title: &str) -> Value {
  json!({
    "id": id,
    "type": "attachment",
    "status": "current",
    "title": title,
    "metadata": {
      "mediaType": "text/plain",
      "comment": "uploaded by tests"
    },
    "extensions": {
      "mediaType": "text/plain",
      "fileSize": 11
    },
    "_links": {
      "download": format!("/download/attachments/123456/{title}?version=1&api=v2")
    }
  })
}

/// The envelope returned by an attachment upload.
pub fn sample_upload_response(attachments: Vec<Value>) -> Value {
  let size = attachments.len();
  json!({
    "results": attachments,
    "start": 0,
    "limit": 50,
    "size": size
  })
}

/// Labels after an add.
pub fn sample_labels_response() -> Value {
  json!({
    "results": [
      { "prefix": "global", "name": "howto", "id": "1001" },
      { "prefix": "global", "name": "onboarding", "id": "1002" }
    ],
    "start": 0,
    "limit": 200,
    "size": 2
  })
}
