//! Pass-through client for the external fact endpoint.

use async_trait::async_trait;
use common::types::Fact;
use thiserror::Error;
use tracing::instrument;

use crate::capability::FactProvider;
use crate::errors::ServiceError;

#[derive(Debug, Error)]
pub enum FactError {
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("decode error: {0}")]
    Decode(reqwest::Error),
}

/// Fetches facts with a plain GET. No retries; the transport default timeout applies.
pub struct CatFactService {
    client: reqwest::Client,
    url: String,
}

impl CatFactService {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

#[async_trait]
impl FactProvider for CatFactService {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn get_fact(&self) -> Result<Fact, ServiceError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FactError::Network)?;
        if !resp.status().is_success() {
            return Err(FactError::Status(resp.status()).into());
        }
        let fact = resp.json::<Fact>().await.map_err(FactError::Decode)?;
        Ok(fact)
    }
}
