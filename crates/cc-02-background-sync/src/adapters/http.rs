//! HTTP delivery to the backend's vote and submission endpoints.

use crate::domain::errors::DeliveryError;
use crate::ports::outbound::DeliveryClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{QueuedSubmission, QueuedVote};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_VOTES_PATH: &str = "/api/votes";
pub const DEFAULT_SUBMISSIONS_PATH: &str = "/api/submissions";

#[derive(Debug, Clone)]
pub struct HttpDeliveryConfig {
    /// Scheme and authority of the backend, e.g. `https://api.example.com`.
    pub base_url: String,
    pub votes_path: String,
    pub submissions_path: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpDeliveryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            votes_path: DEFAULT_VOTES_PATH.to_string(),
            submissions_path: DEFAULT_SUBMISSIONS_PATH.to_string(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

impl HttpDeliveryConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Body of a non-2xx answer. Only `error` is read, and only for logging.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<Value>,
}

/// JSON `POST` delivery. Any 2xx status counts as accepted.
pub struct HttpDeliveryClient {
    client: Client,
    votes_url: String,
    submissions_url: String,
}

impl HttpDeliveryClient {
    pub fn new(config: HttpDeliveryConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DeliveryError::InvalidRequest(e.to_string()))?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            votes_url: format!("{}{}", base, config.votes_path),
            submissions_url: format!("{}{}", base, config.submissions_path),
        })
    }

    pub fn votes_url(&self) -> &str {
        &self.votes_url
    }

    pub fn submissions_url(&self) -> &str {
        &self.submissions_url
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(url, status = status.as_u16(), "[cc-02] Record accepted");
            return Ok(());
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .map(|error| match error {
                Value::String(s) => s,
                other => other.to_string(),
            });

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn deliver_vote(&self, vote: &QueuedVote) -> Result<(), DeliveryError> {
        self.post_json(&self.votes_url, &vote.delivery_body()).await
    }

    async fn deliver_submission(
        &self,
        submission: &QueuedSubmission,
    ) -> Result<(), DeliveryError> {
        if let Some(attachment) = &submission.attachment {
            warn!(
                local_id = submission.local_id,
                content_type = %attachment.content_type,
                bytes = attachment.len(),
                "[cc-02] Attachment is not replayed, sending entry fields only"
            );
        }
        self.post_json(&self.submissions_url, &submission.delivery_body())
            .await
    }
}
