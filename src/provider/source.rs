use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::core::{PayloadError, ResultsPayload, ScenarioId, sample_payload};

/// Errors a retrieval source can surface. The provider flattens all of these
/// into its `error` string, but the variants keep "no backend configured"
/// distinguishable from a genuine fetch failure at the source layer.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no results backend configured")]
    Unconfigured,
    #[error("unknown scenario: {0}")]
    UnknownScenario(ScenarioId),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned HTTP {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Injectable retrieval capability: fetch the results payload for one
/// scenario or fail. Swapping implementations changes where results come
/// from without touching the provider contract.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_results(&self, id: &ScenarioId) -> Result<ResultsPayload, SourceError>;
}

/// In-memory placeholder source: serves the builtin sample scenarios after an
/// artificial delay, standing in for the real backend until one exists.
pub struct SampleSource {
    delay: Duration,
}

impl SampleSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

#[async_trait]
impl ResultsSource for SampleSource {
    async fn fetch_results(&self, id: &ScenarioId) -> Result<ResultsPayload, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        sample_payload(id).ok_or_else(|| SourceError::UnknownScenario(id.clone()))
    }
}

/// HTTP retrieval source for a real results backend. No request timeout and
/// no retries: a hung backend keeps the call suspended and a failed one
/// surfaces as a single retrieval error.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn results_url(&self, id: &ScenarioId) -> String {
        format!("{}/api/results/{id}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ResultsSource for HttpSource {
    async fn fetch_results(&self, id: &ScenarioId) -> Result<ResultsPayload, SourceError> {
        let response = self.client.get(self.results_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        let payload: ResultsPayload = response.json().await?;
        payload.validate()?;
        Ok(payload)
    }
}

/// Source for deployments with no backend wired up at all. Every fetch fails
/// with [`SourceError::Unconfigured`], so "nothing to talk to" reads
/// differently from "the backend said no".
pub struct UnconfiguredSource;

#[async_trait]
impl ResultsSource for UnconfiguredSource {
    async fn fetch_results(&self, _id: &ScenarioId) -> Result<ResultsPayload, SourceError> {
        Err(SourceError::Unconfigured)
    }
}
