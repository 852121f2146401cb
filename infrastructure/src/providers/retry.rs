//! Bounded retry for rate-limited calls

use std::future::Future;
use survey_application::RetryPolicy;
use survey_application::ports::provider_client::GatewayError;
use tracing::{debug, warn};

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts.
///
/// Only [`GatewayError::RateLimited`] is retried; the last error is returned
/// unchanged when attempts are exhausted.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() && policy.should_retry(attempt) => {
                let wait = policy.backoff_for(attempt);
                warn!(
                    "{} rate limited (attempt {}/{}), retrying in {:.1}s",
                    label,
                    attempt,
                    policy.max_attempts,
                    wait.as_secs_f64()
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
