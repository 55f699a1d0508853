//! Widget runtime bridge for `widget_host_web` adapters.
//!
//! Callers hold an opaque [`RuntimeHandle`] obtained from [`probe_runtime`]; every operation is
//! routed through `interop`, which picks the wasm or non-wasm implementation.

mod interop;

use widget_host::{ApiFileRecord, MountConfig, UiFileRecord};

pub use interop::RuntimeHandle;

pub fn probe_runtime(global_name: &str) -> Option<RuntimeHandle> {
    interop::probe_runtime(global_name)
}

pub async fn mount(
    handle: &RuntimeHandle,
    identity: &str,
    config: &MountConfig,
) -> Result<(), String> {
    interop::mount(handle, identity, config).await
}

pub fn unmount(handle: &RuntimeHandle, identity: &str) -> Result<(), String> {
    interop::unmount(handle, identity)
}

pub fn update_files(
    handle: &RuntimeHandle,
    field_key: &str,
    files: &[UiFileRecord],
) -> Result<(), String> {
    interop::update_files(handle, field_key, files)
}

pub fn clear_field(handle: &RuntimeHandle, field_key: &str) -> Result<(), String> {
    interop::clear_field(handle, field_key)
}

pub fn to_ui_format(
    handle: &RuntimeHandle,
    files: &[ApiFileRecord],
) -> Result<Vec<UiFileRecord>, String> {
    interop::to_ui_format(handle, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn runtime_is_never_found_outside_wasm() {
        assert!(probe_runtime("ApperSDK").is_none());
        assert!(probe_runtime("").is_none());
    }
}
