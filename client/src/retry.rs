//! Retry policy for remote megaverse calls.
//!
//! The remote service rate-limits aggressively, and HTTP 429 is the only
//! response worth retrying: every other non-2xx status and every transport
//! failure aborts the call immediately so a bad run fails fast. Retry state
//! is local to a single call; there is no shared budget across calls.
//!
//! Schedule: the first request plus up to 5 retries, exponential backoff
//! starting at 1000ms (first retry waits ~1s, second ~2s, ...), with
//! down-jitter so the sleeps spread out under contention. A sane
//! `Retry-After` seconds header overrides the computed delay.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};

/// Backoff parameters for one logical remote call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries per call beyond the initial request, so a call sends at most
    /// `max_retries + 1` requests.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each further retry.
    pub initial_delay: Duration,
    /// Upper bound on a single backoff sleep.
    pub max_delay: Duration,
    /// Down-jitter factor (0.25 = sleep up to 25% less than computed).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(8),
            jitter_factor: 0.25,
        }
    }
}

impl RetryPolicy {
    /// Compute the sleep before retry number `backoff_step + 1`.
    #[must_use]
    pub fn backoff_delay(&self, backoff_step: u32, headers: &HeaderMap) -> Duration {
        if let Some(delay) = parse_retry_after(headers) {
            return delay;
        }
        let base = self.initial_delay.as_secs_f64() * 2.0_f64.powi(backoff_step as i32);
        let capped = base.min(self.max_delay.as_secs_f64());
        let jitter = 1.0 - rand::random::<f64>() * self.jitter_factor;
        Duration::from_secs_f64(capped * jitter)
    }
}

/// Parse a `Retry-After` header in its seconds form.
///
/// Returns `Some(duration)` only for values in `(0, 60)` seconds; anything
/// else falls back to the exponential schedule.
#[must_use]
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs = headers.get("retry-after")?.to_str().ok()?.parse::<u64>().ok()?;
    let duration = Duration::from_secs(secs);
    (duration > Duration::ZERO && duration < Duration::from_secs(60)).then_some(duration)
}

/// Only a rate-limit response is retryable.
#[must_use]
pub fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}

/// Outcome of a retried call, structurally separating success from the two
/// failure shapes so callers cannot treat an error response as success.
#[derive(Debug)]
pub enum RetryOutcome {
    /// 2xx response.
    Success(Response),
    /// Non-2xx response: either non-retryable, or 429 with the budget spent.
    /// The response is kept for error-body inspection.
    HttpError(Response),
    /// The request never produced a response.
    Transport {
        attempts: u32,
        source: reqwest::Error,
    },
}

/// Send a request, sleeping and re-sending on 429 until the retry budget
/// is spent. `build_request` is called once per attempt.
pub async fn send_with_retry<F>(build_request: F, policy: &RetryPolicy) -> RetryOutcome
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match build_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return RetryOutcome::Success(response);
                }
                // Attempt N has used N - 1 retries.
                if should_retry(status) && attempt <= policy.max_retries {
                    let delay = policy.backoff_delay(attempt - 1, response.headers());
                    tracing::debug!(
                        %status,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "rate limited; backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return RetryOutcome::HttpError(response);
            }
            Err(source) => {
                return RetryOutcome::Transport { attempts: attempt, source };
            }
        }
    }
}
