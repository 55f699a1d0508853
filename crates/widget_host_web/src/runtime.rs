//! Page-global widget runtime adapters.

use std::rc::Rc;

use widget_host::{
    ApiFileRecord, FileFieldRuntime, MountConfig, RuntimeProvider, UiFileRecord, WidgetFuture,
    WidgetIdentity,
};

use crate::bridge;

/// Widget runtime reached through the page's JS namespace.
#[derive(Debug, Clone)]
pub struct WebFileFieldRuntime {
    handle: bridge::RuntimeHandle,
}

impl FileFieldRuntime for WebFileFieldRuntime {
    fn mount<'a>(
        &'a self,
        identity: &'a WidgetIdentity,
        config: &'a MountConfig,
    ) -> WidgetFuture<'a, Result<(), String>> {
        Box::pin(async move { bridge::mount(&self.handle, identity.as_str(), config).await })
    }

    fn unmount(&self, identity: &WidgetIdentity) -> Result<(), String> {
        bridge::unmount(&self.handle, identity.as_str())
    }

    fn update_files(&self, field_key: &str, files: &[UiFileRecord]) -> Result<(), String> {
        bridge::update_files(&self.handle, field_key, files)
    }

    fn clear_field(&self, field_key: &str) -> Result<(), String> {
        bridge::clear_field(&self.handle, field_key)
    }

    fn to_ui_format(&self, files: &[ApiFileRecord]) -> Result<Vec<UiFileRecord>, String> {
        bridge::to_ui_format(&self.handle, files)
    }
}

/// Provider that looks the runtime up on the page global under a configured name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRuntimeProvider {
    global_name: String,
}

impl WebRuntimeProvider {
    /// Creates a provider reading `globalThis[global_name]`.
    pub fn new(global_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
        }
    }

    /// Returns the global the provider reads.
    pub fn global_name(&self) -> &str {
        &self.global_name
    }
}

impl RuntimeProvider for WebRuntimeProvider {
    fn probe(&self) -> Option<Rc<dyn FileFieldRuntime>> {
        let handle = bridge::probe_runtime(&self.global_name)?;
        Some(Rc::new(WebFileFieldRuntime { handle }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn web_provider_finds_nothing_outside_the_browser() {
        let provider = WebRuntimeProvider::new("ApperSDK");
        assert_eq!(provider.global_name(), "ApperSDK");
        assert!(provider.probe().is_none());
    }
}
