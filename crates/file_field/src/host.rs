//! Injected discovery services for the file-field controller.

use std::rc::Rc;

use widget_host::{DiscoveryTimer, RuntimeProvider};
use widget_host_web::{discovery_timer, host_strategy_name, runtime_provider};

use crate::DiscoveryOptions;

#[derive(Clone)]
/// Where the controller finds the widget runtime and how it waits between probes.
pub struct FileFieldHost {
    provider: Rc<dyn RuntimeProvider>,
    timer: Rc<dyn DiscoveryTimer>,
    options: DiscoveryOptions,
    host_strategy_name: &'static str,
}

impl Default for FileFieldHost {
    fn default() -> Self {
        Self::browser(DiscoveryOptions::default())
    }
}

impl FileFieldHost {
    /// Builds a host bundle from explicit services.
    pub fn new(
        provider: Rc<dyn RuntimeProvider>,
        timer: Rc<dyn DiscoveryTimer>,
        options: DiscoveryOptions,
    ) -> Self {
        Self {
            provider,
            timer,
            options,
            host_strategy_name: "injected",
        }
    }

    /// Builds the compile-time selected browser bundle for `options`.
    pub fn browser(options: DiscoveryOptions) -> Self {
        Self {
            provider: Rc::new(runtime_provider(&options.runtime_global)),
            timer: Rc::new(discovery_timer()),
            options,
            host_strategy_name: host_strategy_name(),
        }
    }

    /// Returns the runtime provider.
    pub fn provider(&self) -> Rc<dyn RuntimeProvider> {
        self.provider.clone()
    }

    /// Returns the discovery timer.
    pub fn timer(&self) -> Rc<dyn DiscoveryTimer> {
        self.timer.clone()
    }

    /// Returns the discovery options.
    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }
}
