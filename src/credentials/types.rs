//! Credentials and their lookup errors.

use std::path::PathBuf;

use thiserror::Error;

/// User name and secret for Basic authentication.
///
/// For Atlassian Cloud the user name is the account email and the secret an
/// API token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

/// Errors that can occur while looking up credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
  /// No home directory to look for `.netrc` in.
  #[error("cannot locate .netrc: neither NETRC nor HOME is set")]
  NetrcNotFound,
  /// The `.netrc` file is malformed.
  #[error("failed to parse {path}: {message}")]
  NetrcParse { path: PathBuf, message: String },
  /// The `.netrc` file exists but could not be read.
  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
