//! Queue runtime adapter.
//!
//! The hosting queue runtime is a black box that hands out jobs and
//! collects results. This adapter long-polls a take endpoint, feeds each
//! job to the handler, and posts the result back; it never interprets a
//! result beyond posting it, and re-dispatch policy stays with the
//! runtime.

use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use vgen_diffusion::VideoDiffusion;
use vgen_models::{Job, JobId, JobResult};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::handler::RequestHandler;

/// Adapter between the handler and the hosting queue runtime.
pub struct QueueRuntime {
    http: Client,
    config: WorkerConfig,
}

impl QueueRuntime {
    /// Create a new runtime adapter.
    pub fn new(config: WorkerConfig) -> WorkerResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(WorkerError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Self::new(WorkerConfig::from_env())
    }

    /// Serve jobs until a shutdown signal arrives.
    ///
    /// One job at a time: the runtime owns cross-job concurrency by
    /// spinning up more worker processes.
    pub async fn serve<D: VideoDiffusion>(&self, handler: &RequestHandler<D>) -> WorkerResult<()> {
        info!("Serving jobs from {}", self.config.queue_url);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping");
                    break;
                }
                taken = self.take_job() => {
                    match taken {
                        Ok(Some(job)) => {
                            let job_id = job.id.clone();
                            let result = handler.handle(&job).await;
                            if let Err(e) = self.post_result(&job_id, &result).await {
                                // The runtime re-delivers unacknowledged jobs
                                error!(job_id = %job_id, "Failed to post result: {e}");
                            }
                        }
                        Ok(None) => {
                            tokio::time::sleep(self.config.poll_interval).await;
                        }
                        Err(e) => {
                            warn!("Failed to take job: {e}");
                            tokio::time::sleep(self.config.error_backoff).await;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Take the next job, if any is queued.
    pub async fn take_job(&self) -> WorkerResult<Option<Job>> {
        let url = format!("{}/jobs/next", self.config.queue_url);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(WorkerError::runtime(format!(
                    "take endpoint returned {status}: {body}"
                )))
            }
        }
    }

    /// Post a job result back to the runtime.
    pub async fn post_result(&self, job_id: &JobId, result: &JobResult) -> WorkerResult<()> {
        let url = format!("{}/jobs/{}/result", self.config.queue_url, job_id);
        let response = self.http.post(&url).json(result).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::runtime(format!(
                "result endpoint returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
