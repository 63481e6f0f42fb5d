use std::fmt;

use tracing::instrument;

use crate::{
    error::{ApiError, Error, Operation, Result},
    http,
    users::{requests, User},
};

/// Provides methods to work with HubSpot users.
///
/// Each method issues exactly one HTTP call; rate-limited calls are retried
/// by the resource layer, not here.
#[derive(Debug, Clone)]
pub struct Client<'client> {
    http_client: &'client http::Client,
}

impl<'client> Client<'client> {
    pub(crate) fn new(http_client: &'client http::Client) -> Self {
        Self { http_client }
    }

    /// Gets a user by email address.
    ///
    /// # Errors
    /// If the API call fails or the user does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, email: impl AsRef<str> + fmt::Debug) -> Result<User> {
        let res = self
            .http_client
            .get(format!(
                "/settings/v3/users/{}?idProperty=EMAIL",
                email.as_ref()
            ))
            .await?;
        match res.status() {
            200 => res.json().await,
            status => Err(fail(Operation::Read, status)),
        }
    }

    /// Creates a user. HubSpot sends a welcome email as part of creation.
    ///
    /// The server response is discarded; callers wanting the assigned id or
    /// role re-read the user.
    ///
    /// # Errors
    /// If the API call fails, typically with 409 when the email is taken.
    #[instrument(skip(self))]
    pub async fn create(&self, user: &User) -> Result<()> {
        let req = requests::CreateUser::from_user(user);
        let res = self.http_client.post("/settings/v3/users/", req).await?;
        match res.status() {
            200..=299 => Ok(()),
            status => Err(fail(Operation::Create, status)),
        }
    }

    /// Changes the role of a user, addressed by email.
    ///
    /// # Errors
    /// If the API call fails.
    #[instrument(skip(self))]
    pub async fn update(&self, user: &User) -> Result<()> {
        let req = requests::UpdateUser::from_user(user);
        let res = self
            .http_client
            .put(
                format!("/settings/v3/users/{}?idProperty=EMAIL", user.email),
                req,
            )
            .await?;
        // 3xx counts as success here, the band this endpoint has always
        // been called with.
        match res.status() {
            200..=399 => Ok(()),
            status => Err(fail(Operation::Update, status)),
        }
    }

    /// Deletes a user by email address.
    ///
    /// # Errors
    /// If the API call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, email: impl AsRef<str> + fmt::Debug) -> Result<()> {
        let res = self
            .http_client
            .delete(format!(
                "/settings/v3/users/{}?idProperty=EMAIL",
                email.as_ref()
            ))
            .await?;
        match res.status() {
            200..=299 => Ok(()),
            status => Err(fail(Operation::Delete, status)),
        }
    }
}

fn fail(operation: Operation, status: u16) -> Error {
    let err = ApiError::new(status, operation);
    tracing::error!(%err, "api call failed");
    Error::Api(err)
}
