use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use caption_curator::config::ClientConfig;

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    text: String,
    image: String,
    platform: String,
}

impl BackendClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, String> {
        BackendClient::new(
            config.backend.base_url.clone(),
            Duration::from_millis(config.backend.timeout_ms),
        )
    }

    pub fn new(base_url: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build backend client: {}", err))?;
        Ok(Self { client, base_url })
    }

    // The response stays an untyped Value; the normalizer is the single place
    // that reconciles the two payload shapes the backend is known to emit.
    pub async fn analyze(&self, text: &str, image: &str, platform: &str) -> Result<Value, String> {
        let url = format!("{}/analyze", self.base_url.trim_end_matches('/'));
        debug!(%url, platform, "submitting content for analysis");
        let request = AnalyzeRequest {
            text: text.to_string(),
            image: image.to_string(),
            platform: platform.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| format!("analysis request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = body.trim();
            if detail.is_empty() {
                return Err(format!("backend error: {}", status));
            }
            return Err(format!("backend error: {} {}", status, detail));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| format!("backend response parse failed: {}", err))
    }

    pub async fn health(&self) -> Result<Value, String> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| format!("health request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("backend unhealthy: {}", status));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| format!("health response parse failed: {}", err))
    }
}
