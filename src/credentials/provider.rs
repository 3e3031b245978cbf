//! Credential provider abstraction.

use super::{Credential, CredentialError};

/// A source of credentials keyed by host name.
pub trait CredentialsProvider {
  /// Retrieves credentials for the specified host.
  ///
  /// # Returns
  /// * `Ok(Some(Credential))` when the provider has an entry for the host.
  /// * `Ok(None)` when it has none, so another source can be tried.
  ///
  /// # Errors
  /// Returns `Err(CredentialError)` when the backing store cannot be read or
  /// parsed.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError>;
}
