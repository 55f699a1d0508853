use std::rc::Rc;

use widget_host::{
    DiscoveryTimer, FileFieldRuntime, ImmediateDiscoveryTimer, NoopRuntimeProvider,
    RuntimeProvider, WidgetFuture,
};

use crate::{BrowserDiscoveryTimer, WebRuntimeProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `widget_host_web` adapters.
pub enum HostStrategy {
    /// Page-global runtime lookup and `setTimeout` waits.
    Browser,
    /// No runtime and immediate waits, for host-less builds.
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "widget-host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "widget-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete runtime provider behind [`RuntimeProvider`].
#[derive(Debug, Clone)]
pub enum RuntimeProviderAdapter {
    /// Page-global lookup.
    Browser(WebRuntimeProvider),
    /// Provider whose runtime never appears.
    Stub(NoopRuntimeProvider),
}

impl RuntimeProvider for RuntimeProviderAdapter {
    fn probe(&self) -> Option<Rc<dyn FileFieldRuntime>> {
        match self {
            Self::Browser(provider) => provider.probe(),
            Self::Stub(provider) => provider.probe(),
        }
    }
}

/// Adapter enum that erases the concrete timer behind [`DiscoveryTimer`].
#[derive(Debug, Clone, Copy)]
pub enum DiscoveryTimerAdapter {
    /// `setTimeout`-backed waits.
    Browser(BrowserDiscoveryTimer),
    /// Immediate waits.
    Stub(ImmediateDiscoveryTimer),
}

impl DiscoveryTimer for DiscoveryTimerAdapter {
    fn wait(&self, interval_ms: u32) -> WidgetFuture<'_, ()> {
        match self {
            Self::Browser(timer) => timer.wait(interval_ms),
            Self::Stub(timer) => timer.wait(interval_ms),
        }
    }
}

/// Builds the runtime provider for the selected strategy, reading `globalThis[global_name]`.
pub fn runtime_provider(global_name: &str) -> RuntimeProviderAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => {
            RuntimeProviderAdapter::Browser(WebRuntimeProvider::new(global_name))
        }
        HostStrategy::Stub => RuntimeProviderAdapter::Stub(NoopRuntimeProvider),
    }
}

/// Builds the discovery timer for the selected strategy.
pub fn discovery_timer() -> DiscoveryTimerAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DiscoveryTimerAdapter::Browser(BrowserDiscoveryTimer),
        HostStrategy::Stub => DiscoveryTimerAdapter::Stub(ImmediateDiscoveryTimer),
    }
}
