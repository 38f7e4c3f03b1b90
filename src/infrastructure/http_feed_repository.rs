// HTTP feed repository implementation
use crate::application::feed_repository::{PollFeedRepository, PollRecord, PrecomputedPayload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpFeedRepository {
    base_url: String,
    records_name: String,
    payload_name: String,
    client: reqwest::Client,
}

impl HttpFeedRepository {
    pub fn new(base_url: String, records_name: String, payload_name: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            records_name,
            payload_name,
            client: reqwest::Client::new(),
        }
    }

    fn build_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(name))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let url = self.build_url(name);
        tracing::debug!("Fetching feed {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feed {} failed with status {}: {}", name, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse feed {}", name))
    }
}

#[async_trait]
impl PollFeedRepository for HttpFeedRepository {
    async fn fetch_records(&self) -> Result<Vec<PollRecord>> {
        self.fetch_json(&self.records_name).await
    }

    async fn fetch_payload(&self) -> Result<PrecomputedPayload> {
        self.fetch_json(&self.payload_name).await
    }
}
