//! Widget identity keys.

use serde::{Deserialize, Serialize};

/// Prefix applied to the host's logical element id to build the widget mount target.
pub const WIDGET_IDENTITY_PREFIX: &str = "file-uploader-";

/// Derived key naming one embedded widget instance and its DOM mount target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetIdentity(String);

impl WidgetIdentity {
    /// Derives the identity for a host-supplied logical element id.
    pub fn for_element(element_id: &str) -> Self {
        Self(format!("{WIDGET_IDENTITY_PREFIX}{element_id}"))
    }

    /// Returns the DOM id / runtime registry key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WidgetIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
