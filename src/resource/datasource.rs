use tracing::{instrument, warn};

use crate::{
    error::{Error, Result},
    resource::state::ResourceState,
    resource::user::{FIELD_EMAIL, FIELD_ROLE_ID},
    Client,
};

/// Field name of the lookup key in the host-facing schema.
pub const FIELD_ID: &str = "id";

/// Read-only lookup of an existing user, for data sources. Obtained via
/// [`Client::user_lookup`].
#[derive(Debug, Clone)]
pub struct UserLookup<'client> {
    client: &'client Client,
}

impl<'client> UserLookup<'client> {
    pub(crate) fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Resolves the user named by the `id` field (an email address) and
    /// fills `email` and `role_id`. One un-retried read; a missing user
    /// marks the lookup absent instead of failing.
    ///
    /// # Errors
    /// `Error::MissingIdentifier` if the `id` field is unset, otherwise
    /// whatever the read failed with.
    #[instrument(skip(self, state))]
    pub async fn read<S: ResourceState>(&self, state: &mut S) -> Result<()> {
        let Some(identifier) = state.get(FIELD_ID) else {
            return Err(Error::MissingIdentifier);
        };
        match self.client.users().get(&identifier).await {
            Ok(user) => {
                state.set_id(&user.email);
                state.set(FIELD_EMAIL, &user.email);
                state.set(FIELD_ROLE_ID, &user.role_id);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                warn!(identifier = %identifier, "user does not exist");
                state.clear_id();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
