//! Operations on users.

use tracing::info;

use super::base::{BaseClient, QueryParams};
use super::pool::TaskHandle;
use crate::domain::UserBean;

/// Client for the `user` endpoints.
#[derive(Clone)]
pub struct UserClient {
  base: BaseClient,
}

impl UserClient {
  pub(crate) fn new(base: BaseClient) -> Self {
    Self { base }
  }

  /// Fetch the user the client authenticates as. Doubles as a credentials
  /// check.
  pub fn get_current_user(&self) -> TaskHandle<UserBean> {
    info!("Getting current user");

    let uri = self.base.rest_uri(&["user", "current"], &QueryParams::new());
    self.base.submit(|base| async move { base.get(uri).await })
  }
}
