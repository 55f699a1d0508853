//! Runtime discovery seams: where the widget runtime comes from and how the poller waits.

use std::{cell::RefCell, rc::Rc};

use crate::{FileFieldRuntime, WidgetFuture};

/// Source that may or may not currently expose the widget runtime.
pub trait RuntimeProvider {
    /// Returns the runtime if it has been loaded.
    fn probe(&self) -> Option<Rc<dyn FileFieldRuntime>>;
}

/// Scheduler used by the discovery poller between attempts.
pub trait DiscoveryTimer {
    /// Resolves after `interval_ms` milliseconds.
    fn wait(&self, interval_ms: u32) -> WidgetFuture<'_, ()>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider whose runtime never appears.
pub struct NoopRuntimeProvider;

impl RuntimeProvider for NoopRuntimeProvider {
    fn probe(&self) -> Option<Rc<dyn FileFieldRuntime>> {
        None
    }
}

#[derive(Default)]
struct MemoryProviderState {
    runtime: Option<Rc<dyn FileFieldRuntime>>,
    visible_after_probes: u32,
    probes: u32,
}

/// In-memory provider whose runtime is absent or appears after a number of probes.
#[derive(Clone, Default)]
pub struct MemoryRuntimeProvider {
    inner: Rc<RefCell<MemoryProviderState>>,
}

impl MemoryRuntimeProvider {
    /// Provider exposing `runtime` from the first probe.
    pub fn with_runtime(runtime: Rc<dyn FileFieldRuntime>) -> Self {
        Self::appearing_after(0, runtime)
    }

    /// Provider that hides `runtime` for the first `probes` probes.
    pub fn appearing_after(probes: u32, runtime: Rc<dyn FileFieldRuntime>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryProviderState {
                runtime: Some(runtime),
                visible_after_probes: probes,
                probes: 0,
            })),
        }
    }

    /// Returns how many probes have been made.
    pub fn probe_count(&self) -> u32 {
        self.inner.borrow().probes
    }
}

impl RuntimeProvider for MemoryRuntimeProvider {
    fn probe(&self) -> Option<Rc<dyn FileFieldRuntime>> {
        let mut state = self.inner.borrow_mut();
        state.probes += 1;
        if state.probes <= state.visible_after_probes {
            return None;
        }
        state.runtime.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer that resolves immediately.
pub struct ImmediateDiscoveryTimer;

impl DiscoveryTimer for ImmediateDiscoveryTimer {
    fn wait(&self, _interval_ms: u32) -> WidgetFuture<'_, ()> {
        Box::pin(async {})
    }
}

type WaitHook = Box<dyn FnMut(u32)>;

#[derive(Default)]
struct MemoryTimerState {
    waits: Vec<u32>,
    hook: Option<WaitHook>,
}

/// Immediate timer that records each requested wait and can run a hook during it.
#[derive(Clone, Default)]
pub struct MemoryDiscoveryTimer {
    inner: Rc<RefCell<MemoryTimerState>>,
}

impl MemoryDiscoveryTimer {
    /// Runs `hook` with the wait index (starting at 1) each time the poller waits.
    pub fn on_wait(&self, hook: impl FnMut(u32) + 'static) {
        self.inner.borrow_mut().hook = Some(Box::new(hook));
    }

    /// Returns every requested interval in order.
    pub fn waits(&self) -> Vec<u32> {
        self.inner.borrow().waits.clone()
    }

    /// Returns the total simulated wait time.
    pub fn elapsed_ms(&self) -> u64 {
        self.inner.borrow().waits.iter().map(|ms| u64::from(*ms)).sum()
    }
}

impl DiscoveryTimer for MemoryDiscoveryTimer {
    fn wait(&self, interval_ms: u32) -> WidgetFuture<'_, ()> {
        Box::pin(async move {
            let (count, hook) = {
                let mut state = self.inner.borrow_mut();
                state.waits.push(interval_ms);
                (state.waits.len() as u32, state.hook.take())
            };
            if let Some(mut hook) = hook {
                hook(count);
                let mut state = self.inner.borrow_mut();
                if state.hook.is_none() {
                    state.hook = Some(hook);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::MemoryFileFieldRuntime;

    #[test]
    fn noop_provider_never_exposes_a_runtime() {
        assert!(NoopRuntimeProvider.probe().is_none());
        assert!(MemoryRuntimeProvider::default().probe().is_none());
    }

    #[test]
    fn memory_provider_appears_after_configured_probes() {
        let provider =
            MemoryRuntimeProvider::appearing_after(2, Rc::new(MemoryFileFieldRuntime::default()));
        assert!(provider.probe().is_none());
        assert!(provider.probe().is_none());
        assert!(provider.probe().is_some());
        assert_eq!(provider.probe_count(), 3);
    }

    #[test]
    fn memory_timer_records_waits_and_runs_hook() {
        let timer = MemoryDiscoveryTimer::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        timer.on_wait({
            let seen = seen.clone();
            move |index| seen.borrow_mut().push(index)
        });

        block_on(timer.wait(100));
        block_on(timer.wait(100));

        assert_eq!(timer.waits(), vec![100, 100]);
        assert_eq!(timer.elapsed_ms(), 200);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
