use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::warn;

use crate::llm::{ModelBackend, ModelError};

/// Gateway-level failures surfaced to extraction tasks
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("retries exhausted after {attempts} rate-limited attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("model backend error: {0}")]
    Backend(String),
}

/// Raw model output plus call metadata. Discarded after recovery.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub text: String,
    pub latency: Duration,
    pub retried: bool,
}

/// Exponential backoff with jitter, kept separate from the gateway so the
/// retry schedule is testable without sleeping.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Total attempt budget, including the first call
    pub max_attempts: u32,
    /// Delay doubles from this base on each rate-limited attempt
    pub base_delay: Duration,
    /// Uniform random jitter added to every delay
    pub max_jitter: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
        }
    }
}

impl BackoffPolicy {
    /// A policy that never sleeps, for tests
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    /// Delay before retrying after the given zero-based attempt:
    /// base * 2^attempt plus jitter in [0, max_jitter)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        exp + self.max_jitter.mul_f64(rand::random::<f64>())
    }
}

/// Stateless, shareable front door to the model backend.
///
/// Constructed once per process and passed explicitly to every task. Each
/// `invoke` is an independent attempt sequence; nothing carries over
/// between calls.
pub struct ModelGateway {
    backend: Arc<dyn ModelBackend>,
    policy: BackoffPolicy,
}

impl ModelGateway {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            policy: BackoffPolicy::default(),
        }
    }

    pub fn with_policy(backend: Arc<dyn ModelBackend>, policy: BackoffPolicy) -> Self {
        Self { backend, policy }
    }

    /// Send a prompt, retrying rate-limited attempts with backoff.
    ///
    /// Non-retryable backend errors propagate immediately; exhausting the
    /// attempt budget on rate limits yields `RetriesExhausted` carrying the
    /// attempt count.
    pub async fn invoke(&self, prompt: &str) -> Result<ModelResponse, GatewayError> {
        let started = Instant::now();

        for attempt in 0..self.policy.max_attempts {
            match self.backend.complete(prompt).await {
                Ok(text) => {
                    return Ok(ModelResponse {
                        text,
                        latency: started.elapsed(),
                        retried: attempt > 0,
                    });
                }
                Err(ModelError::RateLimited) => {
                    if attempt + 1 < self.policy.max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(ModelError::Backend(msg)) => {
                    return Err(GatewayError::Backend(msg));
                }
            }
        }

        Err(GatewayError::RetriesExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Rate-limits the first `limit_first` calls, then succeeds
    struct ScriptedBackend {
        calls: AtomicU32,
        limit_first: u32,
    }

    impl ScriptedBackend {
        fn new(limit_first: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                limit_first,
            }
        }
    }

    #[async_trait]
    impl ModelBackend for ScriptedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.limit_first {
                Err(ModelError::RateLimited)
            } else {
                Ok("ok".to_string())
            }
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ModelBackend for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::Backend("auth failure".to_string()))
        }
    }

    #[tokio::test]
    async fn test_always_rate_limited_exhausts_budget() {
        let backend = Arc::new(ScriptedBackend::new(u32::MAX));
        let gateway = ModelGateway::with_policy(backend.clone(), BackoffPolicy::immediate(5));

        let err = gateway.invoke("prompt").await.unwrap_err();
        match err {
            GatewayError::RetriesExhausted { attempts } => assert_eq!(attempts, 5),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_single_rate_limit_then_success() {
        let backend = Arc::new(ScriptedBackend::new(1));
        let gateway = ModelGateway::with_policy(backend.clone(), BackoffPolicy::immediate(5));

        let response = gateway.invoke("prompt").await.unwrap();
        assert_eq!(response.text, "ok");
        assert!(response.retried);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clean_success_is_not_marked_retried() {
        let backend = Arc::new(ScriptedBackend::new(0));
        let gateway = ModelGateway::with_policy(backend, BackoffPolicy::immediate(5));

        let response = gateway.invoke("prompt").await.unwrap();
        assert!(!response.retried);
    }

    #[tokio::test]
    async fn test_backend_error_not_retried() {
        let backend = Arc::new(FailingBackend);
        let gateway = ModelGateway::with_policy(backend, BackoffPolicy::immediate(5));

        let err = gateway.invoke("prompt").await.unwrap_err();
        match err {
            GatewayError::Backend(msg) => assert!(msg.contains("auth failure")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = BackoffPolicy {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::ZERO,
        };
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn test_jitter_stays_within_range() {
        let policy = BackoffPolicy {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
        };
        for _ in 0..50 {
            let delay = policy.delay_for(0);
            assert!(delay >= Duration::from_secs(1));
            assert!(delay < Duration::from_secs(2));
        }
    }
}
