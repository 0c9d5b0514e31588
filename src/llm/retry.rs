//! Exponential backoff retry for text generation.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

use crate::error::GeneratorError;

use super::generator::{GenerationRequest, TextGenerator};

/// Configuration: 3 total attempts, base 1s, max 30s.
pub const MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Call the generator, retrying transient failures with backoff.
///
/// Non-retryable errors (bad key, oversized input, ...) are returned
/// immediately. When every attempt fails the last error is wrapped in
/// [`GeneratorError::RetriesExhausted`].
pub async fn generate_with_retry<G: TextGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
) -> Result<String, GeneratorError> {
    retry_with_backoff(
        || generator.generate(request),
        GeneratorError::is_retryable,
        |e| GeneratorError::RetriesExhausted(Box::new(e)),
    )
    .await
}

/// Retry an async operation with exponential backoff.
///
/// `attempt` is called up to `MAX_ATTEMPTS` times while `should_retry`
/// accepts the error. `wrap_exhausted` converts the last error once all
/// attempts are used.
pub async fn retry_with_backoff<T, E, Fut, F, R, W>(
    mut attempt: F,
    should_retry: R,
    wrap_exhausted: W,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    W: FnOnce(E) -> E,
    E: std::fmt::Display,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut attempts = 0;

    loop {
        attempts += 1;

        let error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !should_retry(&error) {
            return Err(error);
        }

        if attempts >= MAX_ATTEMPTS {
            return Err(wrap_exhausted(error));
        }

        warn!("Attempt {}/{} failed: {}", attempts, MAX_ATTEMPTS, error);
        if let Some(wait_duration) = backoff.next_backoff() {
            tokio::time::sleep(wait_duration).await;
        }
    }
}
