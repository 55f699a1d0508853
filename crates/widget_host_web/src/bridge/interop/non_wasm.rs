use super::*;

fn unsupported() -> String {
    "The file field widget runtime is only available when compiled for wasm32".to_string()
}

/// Placeholder handle; no runtime can be discovered outside the browser.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    _private: (),
}

pub fn probe_runtime(_global_name: &str) -> Option<RuntimeHandle> {
    None
}

pub async fn mount(
    _handle: &RuntimeHandle,
    _identity: &str,
    _config: &MountConfig,
) -> Result<(), String> {
    Err(unsupported())
}

pub fn unmount(_handle: &RuntimeHandle, _identity: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn update_files(
    _handle: &RuntimeHandle,
    _field_key: &str,
    _files: &[UiFileRecord],
) -> Result<(), String> {
    Err(unsupported())
}

pub fn clear_field(_handle: &RuntimeHandle, _field_key: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn to_ui_format(
    _handle: &RuntimeHandle,
    _files: &[ApiFileRecord],
) -> Result<Vec<UiFileRecord>, String> {
    Err(unsupported())
}
