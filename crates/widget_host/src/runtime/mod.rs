//! Widget runtime contract consumed by the file-field controller.

pub mod memory;

use std::{future::Future, pin::Pin};

use serde::Serialize;

use crate::{ApiFileRecord, SyncConfig, UiFileRecord, WidgetIdentity};

/// Object-safe boxed future used by widget runtime and discovery seams.
pub type WidgetFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Config handed to [`FileFieldRuntime::mount`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountConfig {
    /// Record field the widget edits.
    pub field_key: String,
    /// Record-store table name.
    pub table_name: String,
    /// Project credential.
    #[serde(rename = "apperProjectId")]
    pub project_id: String,
    /// Public-key credential.
    #[serde(rename = "apperPublicKey")]
    pub public_key: String,
    /// Files to seed the widget with, already in UI shape.
    pub existing_files: Vec<UiFileRecord>,
}

impl MountConfig {
    /// Builds a mount config from the host config and the normalized seed files.
    pub fn from_sync_config(config: &SyncConfig, existing_files: Vec<UiFileRecord>) -> Self {
        Self {
            field_key: config.field_key.clone(),
            table_name: config.table_name.clone(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
            existing_files,
        }
    }
}

/// Externally supplied runtime that renders and manages the file-attachment widget.
///
/// The controller treats it as an opaque sink: everything it knows about the widget's state goes
/// through these five operations.
pub trait FileFieldRuntime {
    /// Mounts the widget into the DOM target named by `identity`.
    fn mount<'a>(
        &'a self,
        identity: &'a WidgetIdentity,
        config: &'a MountConfig,
    ) -> WidgetFuture<'a, Result<(), String>>;

    /// Tears down the widget mounted under `identity`.
    fn unmount(&self, identity: &WidgetIdentity) -> Result<(), String>;

    /// Replaces the files shown for `field_key`.
    fn update_files(&self, field_key: &str, files: &[UiFileRecord]) -> Result<(), String>;

    /// Removes every file shown for `field_key`.
    fn clear_field(&self, field_key: &str) -> Result<(), String>;

    /// Converts API-shape records into the widget's UI shape. Has no side effects.
    fn to_ui_format(&self, files: &[ApiFileRecord]) -> Result<Vec<UiFileRecord>, String>;
}
