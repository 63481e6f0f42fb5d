use http::header;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

pub(crate) static USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Client is a wrapper around `reqwest::Client` which provides automatically
/// prepending the base url and attaching bearer auth.
///
/// Every invocation performs exactly one outbound call; retrying is the
/// job of [`crate::retry`], on top of this.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    base_url: Url,
    inner: reqwest::Client,
}

impl Client {
    /// Creates a new client.
    pub(crate) fn new<U, T>(base_url: U, token: T) -> Result<Self>
    where
        U: AsRef<str>,
        T: Into<String>,
    {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        let token = token.into();

        let mut default_headers = header::HeaderMap::new();
        let token_header_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_e| Error::InvalidToken)?;
        default_headers.insert(header::AUTHORIZATION, token_header_value);
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(Error::HttpClientSetup)?;

        Ok(Self {
            base_url,
            inner: http_client,
        })
    }

    async fn execute<P>(
        &self,
        method: http::Method,
        path: P,
        body: Option<serde_json::Value>,
    ) -> Result<Response>
    where
        P: AsRef<str>,
    {
        let url = self
            .base_url
            .join(path.as_ref().trim_start_matches('/'))
            .map_err(Error::InvalidUrl)?;

        let mut req = self.inner.request(method.clone(), url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let res = self.inner.execute(req.build().map_err(Error::Transport)?).await;
        match res {
            Ok(res) => Ok(Response::new(res)),
            Err(e) => {
                tracing::error!(%method, path = path.as_ref(), error = %e, "transport failure");
                Err(Error::Transport(e))
            }
        }
    }

    pub(crate) async fn get<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::GET, path, None).await
    }

    pub(crate) async fn post<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::POST,
            path,
            Some(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }

    pub(crate) async fn put<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::PUT,
            path,
            Some(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }

    pub(crate) async fn delete<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::DELETE, path, None).await
    }
}

/// A response with its status still unclassified. The per-operation success
/// bands live in the callers.
#[derive(Debug)]
pub(crate) struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    pub(crate) fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json::<T>().await.map_err(Error::Deserialize)
    }
}
