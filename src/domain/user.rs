//! Users and their profile pictures.

use serde::{Deserialize, Serialize};

/// A Confluence user as embedded in history/version data or returned by
/// `user/current`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBean {
  /// `known`, `anonymous`, ...
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub user_type: Option<String>,
  /// Server/Data Center user name.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(rename = "userKey", skip_serializing_if = "Option::is_none")]
  pub user_key: Option<String>,
  /// Stable Atlassian Cloud account identifier.
  #[serde(rename = "accountId", skip_serializing_if = "Option::is_none")]
  pub account_id: Option<String>,
  #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(rename = "profilePicture", skip_serializing_if = "Option::is_none")]
  pub profile_picture: Option<ProfilePictureBean>,
}

impl UserBean {
  /// Best available identifier: account id, then user key, then user name.
  pub fn identifier(&self) -> Option<&str> {
    self
      .account_id
      .as_deref()
      .or(self.user_key.as_deref())
      .or(self.username.as_deref())
  }
}

/// Avatar of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePictureBean {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub width: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub height: Option<u32>,
  #[serde(rename = "isDefault", skip_serializing_if = "Option::is_none")]
  pub is_default: Option<bool>,
}
