//! Credential lookup for the command-line front end.
//!
//! Atlassian Cloud authenticates REST calls with an email address and an
//! **API token** (create one at
//! <https://id.atlassian.com/manage-profile/security/api-tokens>). When they
//! are not passed on the command line or through the environment they are
//! read from `~/.netrc`:
//!
//! ```text
//! machine your-instance.atlassian.net
//!   login your.email@example.com
//!   password your-api-token-here
//! ```

mod netrc;
mod provider;
mod types;

pub use netrc::NetrcProvider;
pub use provider::CredentialsProvider;
pub use types::{Credential, CredentialError};
