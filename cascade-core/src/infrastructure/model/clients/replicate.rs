//! Replicate predictions adapter
//!
//! Generation runs as a job: the submission returns a status URL, which is
//! then polled until the prediction settles.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::domain::types::ProviderId;
use crate::infrastructure::model::polling::{
    AsyncJob, JobSnapshot, JobStatus, JobStatusSource, PollingPolicy, poll_job,
};
use crate::infrastructure::model::traits::ProviderAdapter;
use crate::infrastructure::model::types::ProviderError;

#[derive(Clone)]
pub struct ReplicateClient {
    base: HttpClientBase,
    polling: PollingPolicy,
}

impl ReplicateClient {
    pub fn from_config(config: &ProviderConfig, http: Client, polling: PollingPolicy) -> Self {
        Self {
            base: HttpClientBase::new(config, http),
            polling,
        }
    }

    /// Create the prediction and return its job handle.
    async fn submit(&self, prompt: &str) -> Result<AsyncJob, ProviderError> {
        let url = self
            .base
            .build_url(&format!("v1/models/{}/predictions", self.base.model));

        let payload = json!({
            "input": {
                "prompt": prompt,
                "system_prompt": SYSTEM_INSTRUCTION,
                "temperature": TEMPERATURE,
                "max_new_tokens": MAX_OUTPUT_TOKENS
            }
        });

        info!(
            provider = self.base.id.as_str(),
            model = self.base.model.as_str(),
            "Submitting prediction to Replicate"
        );

        let prediction: Prediction = self.base.post_with_bearer(&url, &payload).await?;
        let status_url = prediction
            .urls
            .and_then(|urls| urls.get)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ProviderError::MissingStatusUrl)?;

        debug!(
            prediction = prediction.id.as_deref().unwrap_or("unknown"),
            status_url = status_url.as_str(),
            "Replicate prediction accepted"
        );
        Ok(AsyncJob::new(status_url))
    }
}

#[async_trait]
impl ProviderAdapter for ReplicateClient {
    fn id(&self) -> ProviderId {
        self.base.id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.base.require_api_key()?;
        let job = self.submit(prompt).await?;
        poll_job(self, job, &self.polling).await
    }
}

#[async_trait]
impl JobStatusSource for ReplicateClient {
    async fn read_status(&self, status_url: &str) -> Result<JobSnapshot, ProviderError> {
        let prediction: Prediction = self.base.get_with_bearer(status_url).await?;
        Ok(prediction.into_snapshot())
    }
}

#[derive(Deserialize)]
struct Prediction {
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    urls: Option<PredictionUrls>,
    output: Option<PredictionOutput>,
}

impl Prediction {
    fn into_snapshot(self) -> JobSnapshot {
        JobSnapshot {
            status: self
                .status
                .as_deref()
                .map(JobStatus::from_wire)
                .unwrap_or(JobStatus::Pending),
            output: self.output.map(PredictionOutput::into_text),
        }
    }
}

#[derive(Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

/// Language models stream tokens into an array; others return one string.
#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionOutput {
    Segments(Vec<String>),
    Text(String),
}

impl PredictionOutput {
    fn into_text(self) -> String {
        match self {
            PredictionOutput::Segments(segments) => segments.join("\n"),
            PredictionOutput::Text(text) => text,
        }
    }
}
