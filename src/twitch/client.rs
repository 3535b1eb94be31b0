// Twitch GraphQL HTTP client.
// Handles the client id header, status checking, and GraphQL envelope decoding.

use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{MutualsError, Result};

use super::types::GqlResponse;

/// Twitch GraphQL client identified by a public client id.
pub struct TwitchClient {
    client: Client,
    gql_url: String,
}

impl TwitchClient {
    /// Create a new client sending the given client id on every request.
    pub fn new(client_id: &str, gql_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "Client-ID",
            HeaderValue::from_str(client_id).map_err(|e| MutualsError::Other(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("mutuals"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(MutualsError::Network)?;

        Ok(Self {
            client,
            gql_url: gql_url.into(),
        })
    }

    /// Create a client from the endpoint and client id in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.client_id, config.gql_url.clone())
    }

    pub fn gql_url(&self) -> &str {
        &self.gql_url
    }

    /// POST a GraphQL query and decode its `data` member.
    pub async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self.client.post(&self.gql_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "GraphQL request rejected");
            return Err(MutualsError::from_status(status));
        }

        let text = response.text().await?;
        parse_graphql(&text)
    }
}

/// Decode a GraphQL response body into its `data` payload.
pub(crate) fn parse_graphql<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GqlResponse<T> = serde_json::from_str(body)
        .map_err(|e| MutualsError::MalformedResponse(e.to_string()))?;

    match envelope.data {
        Some(data) => Ok(data),
        None => {
            let reason = envelope
                .errors
                .unwrap_or_default()
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            if reason.is_empty() {
                Err(MutualsError::MalformedResponse(
                    "no data in GraphQL response".to_string(),
                ))
            } else {
                Err(MutualsError::MalformedResponse(format!(
                    "GraphQL error: {}",
                    reason
                )))
            }
        }
    }
}
