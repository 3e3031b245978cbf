//! `.netrc` credential discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Credential, CredentialError, CredentialsProvider};

/// Reads credentials from a `.netrc` file.
///
/// The file is `$NETRC` when set, otherwise `$HOME/.netrc`. Entries may span
/// several lines or sit on one (`machine h login u password p`); a `default`
/// entry matches any host not listed explicitly.
#[derive(Debug, Default)]
pub struct NetrcProvider {
  path: Option<PathBuf>,
}

impl NetrcProvider {
  /// Provider for the user's default `.netrc`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Provider for a specific file.
  pub fn with_path(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
    }
  }

  fn resolve_path(&self) -> Result<PathBuf, CredentialError> {
    if let Some(path) = &self.path {
      return Ok(path.clone());
    }
    if let Some(path) = std::env::var_os("NETRC") {
      return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME").ok_or(CredentialError::NetrcNotFound)?;
    Ok(Path::new(&home).join(".netrc"))
  }
}

impl CredentialsProvider for NetrcProvider {
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
    let path = self.resolve_path()?;
    if !path.exists() {
      debug!(path = %path.display(), "No .netrc file");
      return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| CredentialError::Io {
      path: path.clone(),
      source,
    })?;

    parse_netrc(&content, host).map_err(|message| CredentialError::NetrcParse { path, message })
  }
}

#[derive(Default)]
struct Entry {
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn into_credential(self) -> Option<Credential> {
    Some(Credential {
      username: self.login?,
      password: self.password?,
    })
  }
}

/// Find the entry for `target_host`, falling back to `default`.
fn parse_netrc(content: &str, target_host: &str) -> Result<Option<Credential>, String> {
  let mut tokens = tokenize(content).into_iter();
  let mut default_entry: Option<Entry> = None;
  // `Some(true)` while inside the target machine, `Some(false)` inside another
  // machine, `None` inside `default`.
  let mut current: Option<(Option<bool>, Entry)> = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" | "default" => {
        if let Some((matches, entry)) = current.take() {
          match matches {
            Some(true) => return Ok(entry.into_credential()),
            Some(false) => {}
            None => default_entry = Some(entry),
          }
        }
        let matches = if token == "machine" {
          let host = tokens.next().ok_or("`machine` without a host name")?;
          Some(host.eq_ignore_ascii_case(target_host))
        } else {
          None
        };
        current = Some((matches, Entry::default()));
      }
      "login" | "password" | "account" => {
        let value = tokens.next().ok_or_else(|| format!("`{token}` without a value"))?;
        if let Some((_, entry)) = current.as_mut() {
          match token {
            "login" => entry.login = Some(value.to_string()),
            "password" => entry.password = Some(value.to_string()),
            _ => {}
          }
        }
      }
      "macdef" => {
        // Macro bodies run to the next blank line and carry no credentials.
        tokens.next();
      }
      other => return Err(format!("unexpected token `{other}`")),
    }
  }

  match current {
    Some((Some(true), entry)) => Ok(entry.into_credential()),
    Some((None, entry)) => Ok(entry.into_credential()),
    _ => Ok(default_entry.and_then(Entry::into_credential)),
  }
}

/// Split into whitespace-separated tokens, dropping `#` comments and macro
/// bodies.
fn tokenize(content: &str) -> Vec<&str> {
  let mut tokens = Vec::new();
  let mut in_macro = false;

  for line in content.lines() {
    let trimmed = line.trim();
    if in_macro {
      if trimmed.is_empty() {
        in_macro = false;
      }
      continue;
    }
    if trimmed.starts_with('#') {
      continue;
    }

    let mut words = trimmed.split_whitespace();
    while let Some(word) = words.next() {
      if word.starts_with('#') {
        break;
      }
      tokens.push(word);
      if word == "macdef" {
        if let Some(name) = words.next() {
          tokens.push(name);
        }
        in_macro = true;
        break;
      }
    }
  }

  tokens
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_parse_netrc_multi_line_entries() {
    let content = r#"
machine example.com
  login user1
  password pass1

machine other.com
  login user2
  password pass2
"#;

    let cred = parse_netrc(content, "other.com").unwrap().unwrap();
    assert_eq!(cred.username, "user2");
    assert_eq!(cred.password, "pass2");

    let cred = parse_netrc(content, "example.com").unwrap().unwrap();
    assert_eq!(cred.username, "user1");
  }

  #[test]
  fn test_parse_netrc_single_line_entry() {
    let content = "machine example.atlassian.net login me@example.com password token123\n";
    let cred = parse_netrc(content, "EXAMPLE.atlassian.net").unwrap().unwrap();
    assert_eq!(cred.username, "me@example.com");
    assert_eq!(cred.password, "token123");
  }

  #[test]
  fn test_parse_netrc_not_found() {
    let content = "machine example.com login user1 password pass1";
    assert!(parse_netrc(content, "notfound.com").unwrap().is_none());
  }

  #[test]
  fn test_parse_netrc_default_entry() {
    let content = r#"
default
  login fallback
  password secret
machine example.com login user1 password pass1
"#;
    let cred = parse_netrc(content, "unknown.com").unwrap().unwrap();
    assert_eq!(cred.username, "fallback");

    let cred = parse_netrc(content, "example.com").unwrap().unwrap();
    assert_eq!(cred.username, "user1");
  }

  #[test]
  fn test_parse_netrc_comments_and_macros() {
    let content = r#"
# personal hosts
machine example.com login user1 password pass1 # trailing comment
macdef init
cd /pub
binary

machine other.com login user2 password pass2
"#;
    let cred = parse_netrc(content, "other.com").unwrap().unwrap();
    assert_eq!(cred.password, "pass2");
  }

  #[test]
  fn test_parse_netrc_rejects_dangling_keyword() {
    assert!(parse_netrc("machine example.com login", "example.com").is_err());
    assert!(parse_netrc("machine example.com user bob", "example.com").is_err());
  }

  #[test]
  fn test_provider_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "machine wiki.example.com login reader password hunter2").unwrap();

    let provider = NetrcProvider::with_path(file.path());
    let cred = provider.get_credentials("wiki.example.com").unwrap().unwrap();
    assert_eq!(cred.username, "reader");
    assert!(provider.get_credentials("other.example.com").unwrap().is_none());
  }

  #[test]
  fn test_provider_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = NetrcProvider::with_path(dir.path().join("absent"));
    assert!(provider.get_credentials("example.com").unwrap().is_none());
  }
}
