//! Base HTTP client with shared logic

use crate::config::ProviderConfig;
use crate::domain::types::ProviderId;
use crate::infrastructure::model::types::ProviderError;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: ProviderId,
    pub endpoint: String,
    pub model: String,
    api_key: Option<String>,
    api_key_env: String,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(config: &ProviderConfig, http: Client) -> Self {
        Self {
            id: config.id,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.credential().map(str::to_string),
            api_key_env: config.api_key_env.clone(),
            http,
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// The configured credential, or the error naming where it should come from.
    pub fn require_api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::configuration_missing(&self.api_key_env))
    }

    /// Post JSON with bearer auth
    pub async fn post_with_bearer<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, ProviderError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;
        self.send(self.http.post(url).bearer_auth(api_key).json(body))
            .await
    }

    /// Post JSON with provider-specific auth headers
    pub async fn post_with_headers<Req, Res>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Req,
    ) -> Result<Res, ProviderError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut request = self.http.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request).await
    }

    /// Get JSON with bearer auth
    pub async fn get_with_bearer<Res>(&self, url: &str) -> Result<Res, ProviderError>
    where
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;
        self.send(self.http.get(url).bearer_auth(api_key)).await
    }

    async fn send<Res>(&self, request: RequestBuilder) -> Result<Res, ProviderError>
    where
        Res: DeserializeOwned,
    {
        let response = request.send().await.map_err(ProviderError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(ProviderError::network)?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::invalid_response(e.to_string()))
    }
}
