//! The top-level client for the HubSpot API.
use std::env;

use crate::{
    auth,
    error::{Error, Result},
    http, resource, users,
};

/// URL of the hosted HubSpot API.
static API_URL: &str = "https://api.hubapi.com";

/// The client is the entrypoint of the whole SDK.
///
/// You can create it using [`Client::builder`]. The access token is
/// acquired once at build time and never refreshed; an expired token
/// surfaces as a 401 API error and calls for a new client.
///
/// # Examples
/// ```no_run
/// use hubspot_rs::{Client, Error};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     // Get the OAuth credentials from the environment variables
///     // HUBSPOT_CLIENT_ID, HUBSPOT_CLIENT_SECRET and HUBSPOT_REFRESH_TOKEN
///     // and exchange them for an access token.
///     let client = Client::builder().build().await?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables.
///     let client = Client::builder()
///         .with_client_id("my-client-id")
///         .with_client_secret("my-client-secret")
///         .with_refresh_token("my-refresh-token")
///         .build()
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    http_client: http::Client,
}

impl Client {
    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Get the url (cloned).
    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Work with the users of the account.
    pub fn users(&self) -> users::Client<'_> {
        users::Client::new(&self.http_client)
    }

    /// Manage a user as a declarative resource.
    pub fn user_resource(&self) -> resource::UserResource<'_> {
        resource::UserResource::new(self)
    }

    /// Look up a user read-only, for data sources.
    pub fn user_lookup(&self) -> resource::UserLookup<'_> {
        resource::UserLookup::new(self)
    }
}

/// This builder is used to create a new client.
pub struct Builder {
    env_fallback: bool,
    url: Option<String>,
    token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            url: None,
            token: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Add a pre-acquired access token to the client, skipping the OAuth
    /// exchange. If this is not set, the token will be read from the
    /// environment variable `HUBSPOT_ACCESS_TOKEN` before falling back to
    /// the OAuth credentials.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add an OAuth client id. If this is not set, it will be read from
    /// the environment variable `HUBSPOT_CLIENT_ID`.
    pub fn with_client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Add an OAuth client secret. If this is not set, it will be read
    /// from the environment variable `HUBSPOT_CLIENT_SECRET`.
    pub fn with_client_secret<S: Into<String>>(mut self, client_secret: S) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Add an OAuth refresh token. If this is not set, it will be read
    /// from the environment variable `HUBSPOT_REFRESH_TOKEN`.
    pub fn with_refresh_token<S: Into<String>>(mut self, refresh_token: S) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Add an URL to the client. This is only meant for testing purposes, you
    /// don't need to set it.
    #[doc(hidden)]
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build the client, exchanging the refresh token for an access token
    /// unless one was supplied directly.
    ///
    /// # Errors
    /// `Error::MissingCredentials` if neither an access token nor a full
    /// set of OAuth credentials is available.
    pub async fn build(self) -> Result<Client> {
        let env_fallback = self.env_fallback;

        let mut url = self.url.unwrap_or_default();
        if url.is_empty() && env_fallback {
            url = env::var("HUBSPOT_URL").unwrap_or_default();
        }
        if url.is_empty() {
            url = API_URL.to_string();
        }

        let mut token = or_env(self.token, env_fallback, "HUBSPOT_ACCESS_TOKEN");
        if token.is_empty() {
            let client_id = or_env(self.client_id, env_fallback, "HUBSPOT_CLIENT_ID");
            let client_secret = or_env(self.client_secret, env_fallback, "HUBSPOT_CLIENT_SECRET");
            let refresh_token = or_env(self.refresh_token, env_fallback, "HUBSPOT_REFRESH_TOKEN");
            if client_id.is_empty() || client_secret.is_empty() || refresh_token.is_empty() {
                return Err(Error::MissingCredentials);
            }
            token = auth::exchange_refresh_token(&url, &client_id, &client_secret, &refresh_token)
                .await?;
        }

        let http_client = http::Client::new(&url, token)?;

        Ok(Client { url, http_client })
    }
}

fn or_env(value: Option<String>, env_fallback: bool, var: &str) -> String {
    let value = value.unwrap_or_default();
    if value.is_empty() && env_fallback {
        env::var(var).unwrap_or_default()
    } else {
        value
    }
}
