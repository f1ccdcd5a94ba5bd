use crate::error::ClientError;
use crate::remote::{IndexHandle, RemoteIndexClient};
use async_trait::async_trait;
use neardup_core::{Item, NeighborResult, RemoteId};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// Hosted search APIs prefix function ids in create responses.
const FUNCTION_ID_PREFIX: &str = "function_";

/// Connection settings for the hosted similarity-search API.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl HttpConfig {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CreatedFunction {
    id: String,
}

#[derive(Deserialize)]
struct CreatedSample {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSample {
    sample_id: String,
    distance: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    search_samples: Vec<SearchSample>,
}

/// [`RemoteIndexClient`] backed by a hosted similarity-search HTTP API.
///
/// One index maps to one remotely hosted "Search" function: items are
/// posted as samples and queried with `sampleCount=2`, where the first
/// hit is the item's own sample and the second is its nearest other
/// neighbor. The client authenticates once with OAuth2 client
/// credentials and holds its own `reqwest::Client`; nothing is shared
/// process-wide.
pub struct HttpIndexClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpIndexClient {
    /// Exchanges client credentials for a bearer token and returns a
    /// ready-to-use client.
    pub async fn connect(config: HttpConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::new();
        let response = http
            .post(format!("{}/connect/token", config.base_url))
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!("status {status}: {body}")));
        }
        let token: TokenResponse = response.json().await?;
        debug!("Obtained access token");

        Ok(Self {
            http,
            base_url: config.base_url,
            token: token.access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Consumes a response, failing unless its status is one of `accept`.
    async fn check_status(
        response: reqwest::Response,
        endpoint: &str,
        accept: &[u16],
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status().as_u16();
        if accept.contains(&status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl RemoteIndexClient for HttpIndexClient {
    async fn create_index(&self) -> Result<IndexHandle, ClientError> {
        let endpoint = self.url("/v1/functions/");
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "input": "Image", "output": "Search" }))
            .send()
            .await?;
        let response = Self::check_status(response, &endpoint, &[200]).await?;

        let created: CreatedFunction = response.json().await?;
        let function_id = created
            .id
            .strip_prefix(FUNCTION_ID_PREFIX)
            .unwrap_or(&created.id)
            .to_string();
        info!("Created search function {function_id} for deduplication");
        Ok(IndexHandle::new(function_id))
    }

    async fn insert(&self, index: &IndexHandle, item: &Item) -> Result<RemoteId, ClientError> {
        let endpoint = self.url(&format!("/v1/functions/{index}/samples"));
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "data": item.payload }))
            .send()
            .await?;
        // 409 means the sample already exists; the body still carries its id.
        let response = Self::check_status(response, &endpoint, &[200, 409]).await?;

        let created: CreatedSample = response.json().await?;
        Ok(RemoteId::new(created.id))
    }

    async fn query_nearest_excluding_self(
        &self,
        index: &IndexHandle,
        item: &Item,
    ) -> Result<NeighborResult, ClientError> {
        let endpoint = self.url(&format!("/v0.9/functions/{index}/search?sampleCount=2"));
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "data": item.payload }))
            .send()
            .await?;
        let response = Self::check_status(response, &endpoint, &[200]).await?;

        // Hit 0 is the queried item's own sample; hit 1 is the nearest
        // other sample.
        let mut search: SearchResponse = response.json().await?;
        if search.search_samples.len() < 2 {
            return Err(ClientError::NoNeighbor);
        }
        let nearest = search.search_samples.swap_remove(1);
        Ok(NeighborResult::new(nearest.sample_id, nearest.distance))
    }

    async fn delete_index(&self, index: &IndexHandle) -> Result<(), ClientError> {
        let endpoint = self.url(&format!("/v1/functions/{index}"));
        let response = self
            .http
            .delete(&endpoint)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check_status(response, &endpoint, &[200]).await?;
        info!("Deleted search function {index}");
        Ok(())
    }
}
