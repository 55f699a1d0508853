//! Host-supplied synchronization config.

use serde::{Deserialize, Serialize};

use crate::{FileList, WidgetIdentity};

/// Configuration bundle the host passes on every render.
///
/// Field names follow the host's camelCase JSON so the same value can be handed to the widget
/// runtime. The controller only ever reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Logical element id chosen by the host.
    #[serde(default)]
    pub element_id: String,
    /// Record field the widget edits.
    #[serde(default)]
    pub field_key: String,
    /// Record-store table the field belongs to.
    #[serde(default)]
    pub table_name: String,
    /// Project credential handed to the widget runtime.
    #[serde(default, rename = "apperProjectId")]
    pub project_id: String,
    /// Public-key credential handed to the widget runtime.
    #[serde(default, rename = "apperPublicKey")]
    pub public_key: String,
    /// Files already attached to the record.
    #[serde(default)]
    pub existing_files: FileList,
}

/// Identity-affecting subset of [`SyncConfig`].
///
/// Any change between two keys forces a full unmount and remount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivationKey {
    /// Logical element id.
    pub element_id: String,
    /// Record field key.
    pub field_key: String,
    /// Record-store table name.
    pub table_name: String,
    /// Project credential.
    pub project_id: String,
    /// Public-key credential.
    pub public_key: String,
}

impl SyncConfig {
    /// Derives the widget identity for this config.
    pub fn identity(&self) -> WidgetIdentity {
        WidgetIdentity::for_element(&self.element_id)
    }

    /// Returns the fields whose change requires a fresh activation.
    pub fn activation_key(&self) -> ActivationKey {
        ActivationKey {
            element_id: self.element_id.clone(),
            field_key: self.field_key.clone(),
            table_name: self.table_name.clone(),
            project_id: self.project_id.clone(),
            public_key: self.public_key.clone(),
        }
    }

    /// Returns whether a field key is configured.
    pub fn has_field_key(&self) -> bool {
        !self.field_key.trim().is_empty()
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns an error when the element id is blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.element_id.trim().is_empty() {
            return Err("file field requires a non-empty element id".to_string());
        }
        Ok(())
    }
}
