//! Remote inference service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use reqwest::Client;
use tracing::{debug, warn};

use crate::backend::VideoDiffusion;
use crate::error::{DiffusionError, DiffusionResult};
use crate::types::{GenerateRequest, GenerateResponse, HealthResponse};
use vgen_media::{decode_image, encode_image_png, FrameSequence};
use vgen_models::GenerationParams;

/// Configuration for the diffusion client.
#[derive(Debug, Clone)]
pub struct DiffusionClientConfig {
    /// Base URL of the inference service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries for transport-level failures
    pub max_retries: u32,
}

impl Default for DiffusionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(600), // generation is slow on cold GPUs
            max_retries: 2,
        }
    }
}

impl DiffusionClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DIFFUSION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("DIFFUSION_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            max_retries: std::env::var("DIFFUSION_SERVICE_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }
}

/// Client for the remote diffusion inference service.
pub struct DiffusionClient {
    http: Client,
    config: DiffusionClientConfig,
}

impl DiffusionClient {
    /// Create a new diffusion client.
    pub fn new(config: DiffusionClientConfig) -> DiffusionResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DiffusionError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> DiffusionResult<Self> {
        Self::new(DiffusionClientConfig::from_env())
    }

    /// Check if the inference service is healthy.
    pub async fn health_check(&self) -> DiffusionResult<bool> {
        let url = format!("{}/health", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response.json().await?;
                Ok(health.status == "healthy" || health.status == "ok")
            }
            Ok(response) => {
                warn!("Inference service health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Inference service health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Request frame generation and decode the returned frames.
    async fn generate_frames(
        &self,
        image: &RgbImage,
        params: &GenerationParams,
    ) -> DiffusionResult<FrameSequence> {
        let url = format!("{}/generate", self.config.base_url);
        let request = GenerateRequest::new(
            encode_image_png(image)?,
            image.width(),
            image.height(),
            params,
        );

        debug!(
            num_frames = params.num_frames,
            seed = params.seed,
            "Sending generation request to {}",
            url
        );

        let response = self
            .with_retry(|| async {
                self.http
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(DiffusionError::Network)
            })
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DiffusionError::GenerationFailed(format!(
                "inference service returned {}: {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response.json().await?;

        if generated.frames.len() as u32 != params.num_frames {
            return Err(DiffusionError::FrameCountMismatch {
                expected: params.num_frames,
                actual: generated.frames.len() as u32,
            });
        }

        generated
            .frames
            .iter()
            .map(|frame| decode_image(frame).map_err(DiffusionError::from))
            .collect()
    }

    /// Execute with retry logic for transport-level failures.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> DiffusionResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = DiffusionResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "Generation request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(DiffusionError::RequestFailed("Unknown error".to_string())))
    }
}

#[async_trait]
impl VideoDiffusion for DiffusionClient {
    async fn generate(
        &self,
        image: &RgbImage,
        params: &GenerationParams,
    ) -> DiffusionResult<FrameSequence> {
        self.generate_frames(image, params).await
    }
}
