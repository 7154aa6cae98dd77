//! Readiness polling for freshly started graph containers

use crate::error::{ContainerError, ContainerResult};
use ga_core::config::ReadinessConfig;
use ga_core::GraphName;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Fixed-interval retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay between checks
    pub interval: Duration,
    /// Total time to keep checking
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Build a policy from the readiness section of the config
    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
        }
    }

    /// Number of checks that fit in the budget (at least one)
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let attempts = self.timeout.as_millis().div_ceil(self.interval.as_millis());
        u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ReadinessConfig::default())
    }
}

/// Poll `is_ready` until it answers `true` or the timeout has elapsed.
///
/// The timeout is a wall-clock deadline: a check still pending when it passes
/// is abandoned. Returns the number of checks it took. Fails with
/// `ContainerStartup` otherwise; the container is not touched.
pub async fn wait_until_ready<F, Fut>(
    name: &GraphName,
    policy: &RetryPolicy,
    mut is_ready: F,
) -> ContainerResult<u32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    log::debug!(
        "Waiting up to {:?} for {} (about {} checks)",
        policy.timeout,
        name,
        policy.max_attempts()
    );
    let deadline = Instant::now() + policy.timeout;
    let mut attempt = 0;
    loop {
        attempt += 1;
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, is_ready()).await {
            Ok(true) => {
                log::info!("Container {} ready after {} check(s)", name, attempt);
                return Ok(attempt);
            }
            Ok(false) => log::debug!("Container {} not ready (check {})", name, attempt),
            Err(_) => log::debug!("Container {} check {} cut off at deadline", name, attempt),
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        tokio::time::sleep(policy.interval.min(deadline - now)).await;
        if Instant::now() >= deadline {
            break;
        }
    }

    Err(ContainerError::ContainerStartup {
        name: name.to_string(),
        waited_secs: policy.timeout.as_secs(),
        attempts: attempt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_policy(attempts: u64) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(attempts),
        }
    }

    #[test]
    fn test_max_attempts() {
        let policy = RetryPolicy {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        };
        assert_eq!(policy.max_attempts(), 60);

        let uneven = RetryPolicy {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(uneven.max_attempts(), 4);

        let zero = RetryPolicy {
            interval: Duration::ZERO,
            timeout: Duration::from_secs(10),
        };
        assert_eq!(zero.max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_third_check() {
        let name = GraphName::parse("blazegraph8885").unwrap();
        let calls = Cell::new(0);
        let attempts = wait_until_ready(&name, &fast_policy(10), || {
            calls.set(calls.get() + 1);
            let ready = calls.get() >= 3;
            async move { ready }
        })
        .await
        .unwrap();

        assert_eq!(attempts, 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_budget() {
        let name = GraphName::parse("agraph10035").unwrap();
        let calls = Cell::new(0);
        let err = wait_until_ready(&name, &fast_policy(5), || {
            calls.set(calls.get() + 1);
            async { false }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), 5);
        assert!(matches!(
            err,
            ContainerError::ContainerStartup { attempts: 5, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_check_cannot_outlast_timeout() {
        let name = GraphName::parse("blazegraph8885").unwrap();
        let policy = RetryPolicy {
            interval: Duration::from_millis(20),
            timeout: Duration::from_millis(100),
        };
        let calls = Cell::new(0);
        let started = Instant::now();

        let err = wait_until_ready(&name, &policy, || {
            calls.set(calls.get() + 1);
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                false
            }
        })
        .await
        .unwrap_err();

        assert_eq!(started.elapsed(), policy.timeout);
        assert_eq!(calls.get(), 1);
        assert!(matches!(
            err,
            ContainerError::ContainerStartup { attempts: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_spaced_by_interval_until_deadline() {
        let name = GraphName::parse("agraph10035").unwrap();
        let policy = RetryPolicy {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        };
        let calls = Cell::new(0);
        let started = Instant::now();

        wait_until_ready(&name, &policy, || {
            calls.set(calls.get() + 1);
            async { false }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), policy.max_attempts());
        assert_eq!(started.elapsed(), policy.timeout);
    }
}
