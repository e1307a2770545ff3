//! HTTP client for the remote megaverse API.
//!
//! # Operations
//!
//! | Call | Wire | Failure |
//! |------|------|---------|
//! | [`RemoteClient::fetch_goal`] | `GET {base}/map/{candidate}/goal` | [`ClientError::Fetch`] |
//! | [`RemoteClient::fetch_actual`] | `GET {base}/map/{candidate}` | [`ClientError::Fetch`] |
//! | [`RemoteClient::create_entity`] | `POST {base}/{kind}s` | [`ClientError::Create`] |
//! | [`RemoteClient::delete_entity`] | `DELETE {base}/{kind}s` | [`ClientError::Delete`] |
//!
//! Writes carry `{row, column, [color|direction], candidateId}` JSON bodies.
//! The candidate identifier is caller-supplied on every call; the client
//! itself holds only the base URL, the shared `reqwest::Client`, and the
//! [`RetryPolicy`]. Create/delete calls are not idempotency-checked locally:
//! every call mutates remote state, so callers must not create the same
//! position twice without an intervening delete.
//!
//! All calls share one bounded request timeout so an unresponsive remote
//! cannot hang a run, and all retry state lives inside [`retry`].

pub mod retry;

use std::time::Duration;

use megaverse_types::{EntityKind, GoalResponse, PositionedEntity, RemoteState};
use reqwest::Response;

use crate::retry::{RetryOutcome, RetryPolicy};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Connection settings for [`RemoteClient`]. Built once at startup and
/// passed in; there is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Remote call failures, one variant per operation family. The reconciler
/// treats all three as fatal for the current run.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to fetch {resource}: {detail}")]
    Fetch {
        resource: &'static str,
        detail: String,
    },
    #[error("failed to create {kind} at ({row}, {column}): {detail}")]
    Create {
        kind: EntityKind,
        row: usize,
        column: usize,
        detail: String,
    },
    #[error("failed to delete {kind} at ({row}, {column}): {detail}")]
    Delete {
        kind: EntityKind,
        row: usize,
        column: usize,
        detail: String,
    },
}

/// Client for the remote grid service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RemoteClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
        })
    }

    /// Fetch the declared goal grid (raw token rows).
    pub async fn fetch_goal(&self, candidate_id: &str) -> Result<Vec<Vec<String>>, ClientError> {
        let url = format!("{}/map/{candidate_id}/goal", self.base_url);
        let response = self.get(&url, "goal map").await?;
        let body: GoalResponse = response.json().await.map_err(|e| ClientError::Fetch {
            resource: "goal map",
            detail: format!("malformed body: {e}"),
        })?;
        Ok(body.goal)
    }

    /// Fetch the authoritative actual state.
    pub async fn fetch_actual(&self, candidate_id: &str) -> Result<RemoteState, ClientError> {
        let url = format!("{}/map/{candidate_id}", self.base_url);
        let response = self.get(&url, "actual map").await?;
        response.json().await.map_err(|e| ClientError::Fetch {
            resource: "actual map",
            detail: format!("malformed body: {e}"),
        })
    }

    /// Create one entity. Mutates remote state; not locally idempotent.
    pub async fn create_entity(
        &self,
        entity: &PositionedEntity,
        candidate_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.collection_url(entity.kind());
        let body = entity_payload(entity, candidate_id);
        tracing::debug!(entity = %entity, "creating entity");

        match retry::send_with_retry(|| self.http.post(&url).json(&body), &self.retry).await {
            RetryOutcome::Success(_) => Ok(()),
            RetryOutcome::HttpError(response) => Err(ClientError::Create {
                kind: entity.kind(),
                row: entity.row(),
                column: entity.column(),
                detail: http_error_detail(response).await,
            }),
            RetryOutcome::Transport { attempts, source } => Err(ClientError::Create {
                kind: entity.kind(),
                row: entity.row(),
                column: entity.column(),
                detail: transport_detail(attempts, &source),
            }),
        }
    }

    /// Delete one entity. The remote accepts the same body shape as create.
    pub async fn delete_entity(
        &self,
        entity: &PositionedEntity,
        candidate_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.collection_url(entity.kind());
        let body = entity_payload(entity, candidate_id);
        tracing::debug!(entity = %entity, "deleting entity");

        match retry::send_with_retry(|| self.http.delete(&url).json(&body), &self.retry).await {
            RetryOutcome::Success(_) => Ok(()),
            RetryOutcome::HttpError(response) => Err(ClientError::Delete {
                kind: entity.kind(),
                row: entity.row(),
                column: entity.column(),
                detail: http_error_detail(response).await,
            }),
            RetryOutcome::Transport { attempts, source } => Err(ClientError::Delete {
                kind: entity.kind(),
                row: entity.row(),
                column: entity.column(),
                detail: transport_detail(attempts, &source),
            }),
        }
    }

    async fn get(&self, url: &str, resource: &'static str) -> Result<Response, ClientError> {
        match retry::send_with_retry(|| self.http.get(url), &self.retry).await {
            RetryOutcome::Success(response) => Ok(response),
            RetryOutcome::HttpError(response) => Err(ClientError::Fetch {
                resource,
                detail: http_error_detail(response).await,
            }),
            RetryOutcome::Transport { attempts, source } => Err(ClientError::Fetch {
                resource,
                detail: transport_detail(attempts, &source),
            }),
        }
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.collection_path())
    }
}

/// Wire body for create/delete: position, kind-specific attribute, and the
/// caller's candidate identifier.
fn entity_payload(entity: &PositionedEntity, candidate_id: &str) -> serde_json::Value {
    let mut body = serde_json::json!({
        "row": entity.row(),
        "column": entity.column(),
        "candidateId": candidate_id,
    });
    match entity {
        PositionedEntity::Anchor { .. } => {}
        PositionedEntity::Marker { color, .. } => {
            body["color"] = serde_json::json!(color);
        }
        PositionedEntity::Vector { direction, .. } => {
            body["direction"] = serde_json::json!(direction);
        }
    }
    body
}

fn transport_detail(attempts: u32, source: &reqwest::Error) -> String {
    format!("transport error after {attempts} attempt(s): {source}")
}

/// Render a failed response as `status NNN[: body]`, with the body capped
/// so a misbehaving remote cannot balloon error messages.
async fn http_error_detail(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        return format!("status {status}");
    }
    if body.len() > MAX_ERROR_BODY_BYTES {
        let capped = String::from_utf8_lossy(&body.as_bytes()[..MAX_ERROR_BODY_BYTES]);
        return format!("status {status}: {capped}...(truncated)");
    }
    format!("status {status}: {body}")
}
