use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{instrument, warn};

use crate::{
    error::{Error, Result},
    resource::state::ResourceState,
    retry,
    users::User,
    Client,
};

/// Field name of the email address in the host-facing schema.
pub const FIELD_EMAIL: &str = "email";
/// Field name of the role id in the host-facing schema.
pub const FIELD_ROLE_ID: &str = "role_id";

/// Lowercase-only pattern the provisioning schema accepts for addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}$")
        .expect("EMAIL_PATTERN is a valid regex")
});

/// Cooldown slept before a failed retry sequence is handed back to the
/// host.
const FAILURE_COOLDOWN: Duration = Duration::from_secs(2);

/// Validates an email address against the schema pattern. The pattern is
/// case-sensitive, uppercase addresses are rejected.
///
/// # Errors
/// `Error::InvalidEmail` if the address does not match.
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(Error::InvalidEmail(email.to_string()))
    }
}

/// The user an orchestration host declares it wants to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredUser {
    pub email: String,
    /// Empty means "no role declared", the server assigns its default.
    pub role_id: String,
}

impl DeclaredUser {
    fn to_user(&self) -> User {
        User {
            id: String::new(),
            email: self.email.clone(),
            role_id: self.role_id.clone(),
        }
    }
}

/// Reconciles one user resource instance against the remote account.
/// Obtained via [`Client::user_resource`].
///
/// Rate-limited API calls are retried for up to two minutes; all other
/// failures terminate the operation immediately.
#[derive(Debug, Clone)]
pub struct UserResource<'client> {
    client: &'client Client,
}

impl<'client> UserResource<'client> {
    pub(crate) fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Creates the declared user and marks the resource present under its
    /// email address.
    ///
    /// State is refreshed from the server after creation so the assigned
    /// role lands in it; a failure of that refresh is logged, not
    /// surfaced.
    ///
    /// # Errors
    /// `Error::InvalidEmail` before any network call if the declared email
    /// does not match the schema pattern, otherwise whatever the create
    /// call terminally failed with.
    #[instrument(skip(self, state))]
    pub async fn create<S: ResourceState>(
        &self,
        declared: &DeclaredUser,
        state: &mut S,
    ) -> Result<()> {
        validate_email(&declared.email)?;
        let user = declared.to_user();
        let users = self.client.users();
        if let Err(err) = retry::retry(|| users.create(&user)).await {
            return fail_after_cooldown(err).await;
        }
        state.set_id(&user.email);
        if let Err(err) = self.read(state).await {
            warn!(%err, "post-create read failed");
        }
        Ok(())
    }

    /// Refreshes state from the remote user, keyed by the stored
    /// identifier.
    ///
    /// A user deleted out-of-band marks the resource absent instead of
    /// failing, the host is expected to recreate it on the next pass.
    ///
    /// # Errors
    /// `Error::MissingIdentifier` if the resource is absent, otherwise
    /// whatever the read terminally failed with.
    #[instrument(skip(self, state))]
    pub async fn read<S: ResourceState>(&self, state: &mut S) -> Result<()> {
        let Some(id) = state.id() else {
            return Err(Error::MissingIdentifier);
        };
        let users = self.client.users();
        match retry::retry(|| users.get(&id)).await {
            Ok(user) => {
                state.set(FIELD_EMAIL, &user.email);
                state.set(FIELD_ROLE_ID, &user.role_id);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                warn!(identifier = %id, "user no longer exists, marking resource absent");
                state.clear_id();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Converges the remote user to the declaration.
    ///
    /// A declared email differing from the stored one is rejected before
    /// any network call, the email is immutable. A changed role is pushed
    /// to the server; an unchanged declaration falls through to a state
    /// refresh.
    ///
    /// # Errors
    /// `Error::EmailImmutable` on an attempted email change, otherwise
    /// whatever the update terminally failed with.
    #[instrument(skip(self, state))]
    pub async fn update<S: ResourceState>(
        &self,
        declared: &DeclaredUser,
        state: &mut S,
    ) -> Result<()> {
        let stored_email = state.get(FIELD_EMAIL).unwrap_or_default();
        if declared.email != stored_email {
            return Err(Error::EmailImmutable);
        }
        let stored_role = state.get(FIELD_ROLE_ID).unwrap_or_default();
        if declared.role_id != stored_role {
            let user = declared.to_user();
            let users = self.client.users();
            if let Err(err) = retry::retry(|| users.update(&user)).await {
                return fail_after_cooldown(err).await;
            }
            return Ok(());
        }
        self.read(state).await
    }

    /// Deletes the remote user keyed by the stored identifier and marks
    /// the resource absent.
    ///
    /// Unlike [`UserResource::read`], a 404 here is an error and the
    /// identifier is kept.
    ///
    /// # Errors
    /// `Error::MissingIdentifier` if the resource is absent, otherwise
    /// whatever the delete terminally failed with.
    #[instrument(skip(self, state))]
    pub async fn delete<S: ResourceState>(&self, state: &mut S) -> Result<()> {
        let Some(id) = state.id() else {
            return Err(Error::MissingIdentifier);
        };
        let users = self.client.users();
        if let Err(err) = retry::retry(|| users.delete(&id)).await {
            return fail_after_cooldown(err).await;
        }
        state.clear_id();
        Ok(())
    }

    /// Adopts an existing user into state, keyed by email address. One
    /// un-retried read.
    ///
    /// # Errors
    /// If the user does not exist or the read fails.
    #[instrument(skip(self, state))]
    pub async fn import<S: ResourceState>(&self, identifier: &str, state: &mut S) -> Result<()> {
        let user = self.client.users().get(identifier).await?;
        state.set(FIELD_EMAIL, &user.email);
        state.set(FIELD_ROLE_ID, &user.role_id);
        state.set_id(identifier);
        Ok(())
    }
}

/// Sleeps out [`FAILURE_COOLDOWN`] before propagating a terminal retry
/// failure.
async fn fail_after_cooldown<T>(err: Error) -> Result<T> {
    tokio::time::sleep(FAILURE_COOLDOWN).await;
    Err(err)
}
