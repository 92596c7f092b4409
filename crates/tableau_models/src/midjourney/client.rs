//! midjourney-proxy REST client.

use crate::midjourney::conversion;
use crate::midjourney::{
    ActionRequestBuilder, ImagineRequestBuilder, SubmitResponse, TaskDto, TaskStatus,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tableau_core::GenerationResult;
use tableau_error::{BackendError, BackendErrorKind, HttpError, TableauResult};
use tableau_interface::{ImageBackend, ProgressObserver, UpscaleRequest};
use tableau_rate_limit::BackendConfig;
use tracing::{debug, info, instrument, warn};

const API_SECRET_HEADER: &str = "mj-api-secret";
const API_SECRET_ENV: &str = "MJ_API_SECRET";

/// Client for a midjourney-proxy service.
///
/// Every submission is a two-step affair: the proxy answers the submit call
/// with a task id, then the task is polled until it finishes or the poll
/// timeout elapses.
///
/// # Example
///
/// ```rust,no_run
/// use tableau_models::MidjourneyProxyClient;
/// use tableau_rate_limit::BackendConfig;
///
/// let client = MidjourneyProxyClient::from_config(&BackendConfig::default());
/// assert_eq!(client.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone)]
pub struct MidjourneyProxyClient {
    client: Client,
    base_url: String,
    api_secret: Option<String>,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl MidjourneyProxyClient {
    /// Creates a client for `base_url` with default polling.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(&BackendConfig {
            base_url: base_url.into(),
            ..BackendConfig::default()
        })
    }

    /// Creates a client from the `[backend]` configuration section.
    ///
    /// The API secret is read from `MJ_API_SECRET` when set.
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn from_config(config: &BackendConfig) -> Self {
        let api_secret = std::env::var(API_SECRET_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        debug!(has_secret = api_secret.is_some(), "Creating midjourney-proxy client");

        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_secret,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
        }
    }

    /// Overrides the API secret.
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Overrides the interval between task polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Overrides how long a task may take before it is abandoned.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_secret {
            Some(secret) => builder.header(API_SECRET_HEADER, secret),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> TableauResult<Response> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("{} failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::with_status(
                format!("{} returned {}: {}", what, status, body),
                status.as_u16(),
            )
            .into());
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> TableauResult<T> {
        response.json::<T>().await.map_err(|e| {
            BackendError::new(BackendErrorKind::UnexpectedResponse(format!(
                "{}: {}",
                what, e
            )))
            .into()
        })
    }

    async fn submit<B: Serialize>(&self, path: &str, body: &B) -> TableauResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.send(self.client.post(&url).json(body), &url).await?;
        let answer: SubmitResponse = Self::decode(response, &url).await?;

        match answer.accepted_task() {
            Some(task_id) => {
                debug!(task_id, code = answer.code(), "Submission accepted");
                Ok(task_id.to_string())
            }
            None => Err(BackendError::new(BackendErrorKind::Rejected(format!(
                "code {}: {}",
                answer.code(),
                answer.description().clone().unwrap_or_default()
            )))
            .into()),
        }
    }

    /// Fetches the current state of a task.
    #[instrument(skip(self))]
    pub async fn fetch_task(&self, task_id: &str) -> TableauResult<TaskDto> {
        let url = format!("{}/mj/task/{}/fetch", self.base_url, task_id);
        let response = self.send(self.client.get(&url), &url).await?;
        Self::decode(response, &url).await
    }

    /// Polls a task until it finishes. Returns `None` on failure or timeout.
    #[instrument(skip(self, observer))]
    pub async fn wait_for_task(
        &self,
        task_id: &str,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<TaskDto>> {
        let deadline = tokio::time::Instant::now() + self.poll_timeout;

        loop {
            let task = self.fetch_task(task_id).await?;
            let status = *task.status();
            match status {
                TaskStatus::Success => return Ok(Some(task)),
                TaskStatus::Failure | TaskStatus::Cancel => {
                    warn!(
                        status = ?status,
                        reason = task.fail_reason().as_deref().unwrap_or(""),
                        "Task did not succeed"
                    );
                    return Ok(None);
                }
                _ => {
                    if let Some(observer) = observer {
                        let progress = task
                            .progress()
                            .clone()
                            .unwrap_or_else(|| format!("{:?}", status));
                        observer.on_progress(task.image_url().as_deref().unwrap_or(""), &progress);
                    }
                }
            }

            if tokio::time::Instant::now() >= deadline {
                warn!(timeout_secs = self.poll_timeout.as_secs(), "Task timed out");
                return Ok(None);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ImageBackend for MidjourneyProxyClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn connect(&self) -> TableauResult<()> {
        let url = format!("{}/mj/task/list", self.base_url);
        self.send(self.client.get(&url), &url).await.map_err(|e| {
            BackendError::new(BackendErrorKind::Connection(format!(
                "{} unreachable: {}",
                self.base_url, e
            )))
        })?;
        info!("midjourney-proxy reachable");
        Ok(())
    }

    #[instrument(skip(self, prompt, observer), fields(prompt_len = prompt.len()))]
    async fn submit_prompt(
        &self,
        prompt: &str,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        let body = ImagineRequestBuilder::default()
            .prompt(prompt)
            .build()
            .map_err(|e| BackendError::new(BackendErrorKind::Rejected(e.to_string())))?;
        let task_id = self.submit("/mj/submit/imagine", &body).await?;

        match self.wait_for_task(&task_id, observer).await? {
            Some(task) => conversion::grid_result(&task),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, observer), fields(msg_id = %request.msg_id(), index = request.index()))]
    async fn upscale(
        &self,
        request: &UpscaleRequest,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        let grid = self.fetch_task(request.msg_id()).await?;
        let Some(custom_id) = conversion::upscale_custom_id(&grid, *request.index()) else {
            warn!("Grid task has no matching upscale button");
            return Ok(None);
        };

        let body = ActionRequestBuilder::default()
            .task_id(request.msg_id().clone())
            .custom_id(custom_id)
            .build()
            .map_err(|e| BackendError::new(BackendErrorKind::Rejected(e.to_string())))?;
        let task_id = self.submit("/mj/submit/action", &body).await?;

        match self.wait_for_task(&task_id, observer).await? {
            Some(task) => conversion::upscale_result(&task),
            None => Ok(None),
        }
    }

    async fn disconnect(&self) -> TableauResult<()> {
        debug!("midjourney-proxy sessions are stateless, nothing to release");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "midjourney-proxy"
    }
}
