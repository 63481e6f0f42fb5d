//! OAuth refresh-token exchange.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::http::USER_AGENT;

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges an OAuth refresh token for a short-lived access token.
///
/// One POST to `/oauth/v1/token`, no retry. The token is held unchanged for
/// the lifetime of the [`crate::Client`]; when it expires the API answers
/// 401 and a new client has to be built.
///
/// # Errors
/// If the exchange request fails or the response carries no access token.
pub async fn exchange_refresh_token(
    base_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<String> {
    let http_client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(Error::HttpClientSetup)?;

    let url = format!("{}/oauth/v1/token", base_url.trim_end_matches('/'));
    let params = [
        ("grant_type", "refresh_token"),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
    ];
    let token: TokenResponse = http_client
        .post(url)
        .form(&params)
        .send()
        .await
        .map_err(Error::Transport)?
        .json()
        .await
        .map_err(Error::Deserialize)?;

    Ok(token.access_token)
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;

    use super::*;

    #[tokio::test]
    async fn exchanges_refresh_token_for_access_token() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/oauth/v1/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("grant_type=refresh_token")
                .body_contains("client_id=my-client")
                .body_contains("client_secret=my-secret")
                .body_contains("refresh_token=my-refresh");
            then.status(200).json_body(serde_json::json!({
                "access_token": "my-access",
                "refresh_token": "my-refresh",
                "expires_in": "21600"
            }));
        });

        let token =
            exchange_refresh_token(&server.base_url(), "my-client", "my-secret", "my-refresh")
                .await?;
        assert_eq!(token, "my-access");
        mock.assert_hits_async(1).await;

        Ok(())
    }

    #[tokio::test]
    async fn undecodable_response_is_a_deserialize_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/oauth/v1/token");
            then.status(400).body("not json");
        });

        let res = exchange_refresh_token(&server.base_url(), "a", "b", "c").await;
        assert!(matches!(res, Err(Error::Deserialize(_))));
    }
}
