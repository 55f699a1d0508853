//! Runtime discovery poller.

use std::rc::Rc;

use widget_host::{DiscoveryTimer, FileFieldRuntime, RuntimeProvider};

use crate::{ActivationToken, DiscoveryOptions, FileFieldError};

/// Result of a discovery run that did not time out.
pub enum Discovery {
    /// The runtime became available.
    Found(Rc<dyn FileFieldRuntime>),
    /// The activation was torn down before the runtime was found.
    Cancelled,
}

impl std::fmt::Debug for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(_) => f.write_str("Found(..)"),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// Waits for `provider` to expose the widget runtime.
///
/// Each attempt probes once and then waits `interval_ms`, so the run is bounded by
/// `max_attempts × interval_ms`. The token is checked before every probe and after the final
/// wait; once it is cancelled no further probe or wait is scheduled.
///
/// # Errors
///
/// Returns [`FileFieldError::RuntimeUnavailable`] when every attempt came up empty.
pub async fn discover(
    provider: &dyn RuntimeProvider,
    timer: &dyn DiscoveryTimer,
    options: &DiscoveryOptions,
    token: &ActivationToken,
) -> Result<Discovery, FileFieldError> {
    for _ in 0..options.max_attempts {
        if !token.is_live() {
            return Ok(Discovery::Cancelled);
        }
        if let Some(runtime) = provider.probe() {
            return Ok(Discovery::Found(runtime));
        }
        timer.wait(options.interval_ms).await;
    }

    if !token.is_live() {
        return Ok(Discovery::Cancelled);
    }
    Err(FileFieldError::RuntimeUnavailable {
        runtime: options.runtime_global.clone(),
        attempts: options.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use widget_host::{MemoryDiscoveryTimer, MemoryFileFieldRuntime, MemoryRuntimeProvider};

    use super::*;

    fn options(max_attempts: u32) -> DiscoveryOptions {
        DiscoveryOptions {
            max_attempts,
            ..DiscoveryOptions::default()
        }
    }

    #[test]
    fn runtime_present_on_first_probe_needs_no_wait() {
        let provider =
            MemoryRuntimeProvider::with_runtime(Rc::new(MemoryFileFieldRuntime::default()));
        let timer = MemoryDiscoveryTimer::default();

        let found = block_on(discover(
            &provider,
            &timer,
            &options(50),
            &ActivationToken::new(1),
        ))
        .expect("discover");

        assert!(matches!(found, Discovery::Found(_)));
        assert!(timer.waits().is_empty());
    }

    #[test]
    fn late_runtime_is_found_after_waiting() {
        let provider = MemoryRuntimeProvider::appearing_after(
            3,
            Rc::new(MemoryFileFieldRuntime::default()),
        );
        let timer = MemoryDiscoveryTimer::default();

        let found = block_on(discover(
            &provider,
            &timer,
            &options(50),
            &ActivationToken::new(1),
        ))
        .expect("discover");

        assert!(matches!(found, Discovery::Found(_)));
        assert_eq!(provider.probe_count(), 4);
        assert_eq!(timer.waits(), vec![100, 100, 100]);
    }

    #[test]
    fn single_attempt_times_out_after_one_probe_and_one_interval() {
        let provider = MemoryRuntimeProvider::default();
        let timer = MemoryDiscoveryTimer::default();

        let err = block_on(discover(
            &provider,
            &timer,
            &options(1),
            &ActivationToken::new(1),
        ))
        .expect_err("runtime never appears");

        assert_eq!(
            err,
            FileFieldError::RuntimeUnavailable {
                runtime: "ApperSDK".to_string(),
                attempts: 1,
            }
        );
        assert_eq!(provider.probe_count(), 1);
        assert_eq!(timer.elapsed_ms(), 100);
    }

    #[test]
    fn cancellation_during_wait_stops_further_probes() {
        let provider = MemoryRuntimeProvider::appearing_after(
            1,
            Rc::new(MemoryFileFieldRuntime::default()),
        );
        let timer = MemoryDiscoveryTimer::default();
        let token = ActivationToken::new(1);
        timer.on_wait({
            let token = token.clone();
            move |_| token.cancel()
        });

        let outcome =
            block_on(discover(&provider, &timer, &options(50), &token)).expect("discover");

        assert!(matches!(outcome, Discovery::Cancelled));
        assert_eq!(provider.probe_count(), 1);
        assert_eq!(timer.waits().len(), 1);
    }

    #[test]
    fn cancellation_on_last_wait_reports_no_failure() {
        let provider = MemoryRuntimeProvider::default();
        let timer = MemoryDiscoveryTimer::default();
        let token = ActivationToken::new(1);
        timer.on_wait({
            let token = token.clone();
            move |_| token.cancel()
        });

        let outcome =
            block_on(discover(&provider, &timer, &options(1), &token)).expect("no failure");

        assert!(matches!(outcome, Discovery::Cancelled));
    }
}
