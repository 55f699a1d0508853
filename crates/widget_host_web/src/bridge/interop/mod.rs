//! Shared transport interop for the widget runtime bridge.
//!
//! This module routes calls to target-specific implementations while preserving a uniform API
//! for the bridge facade.

use widget_host::{ApiFileRecord, MountConfig, UiFileRecord};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub use imp::RuntimeHandle;

pub fn probe_runtime(global_name: &str) -> Option<RuntimeHandle> {
    imp::probe_runtime(global_name)
}

pub async fn mount(
    handle: &RuntimeHandle,
    identity: &str,
    config: &MountConfig,
) -> Result<(), String> {
    imp::mount(handle, identity, config).await
}

pub fn unmount(handle: &RuntimeHandle, identity: &str) -> Result<(), String> {
    imp::unmount(handle, identity)
}

pub fn update_files(
    handle: &RuntimeHandle,
    field_key: &str,
    files: &[UiFileRecord],
) -> Result<(), String> {
    imp::update_files(handle, field_key, files)
}

pub fn clear_field(handle: &RuntimeHandle, field_key: &str) -> Result<(), String> {
    imp::clear_field(handle, field_key)
}

pub fn to_ui_format(
    handle: &RuntimeHandle,
    files: &[ApiFileRecord],
) -> Result<Vec<UiFileRecord>, String> {
    imp::to_ui_format(handle, files)
}
