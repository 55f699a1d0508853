//! Discovery options and host config parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use widget_host::{FileList, SyncConfig};

use crate::FileFieldError;

/// Default number of discovery attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;
/// Default wait between discovery attempts, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 100;
/// Default page global the widget runtime is published under.
pub const DEFAULT_RUNTIME_GLOBAL: &str = "ApperSDK";

/// Tuning for the runtime discovery poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryOptions {
    /// Probes before giving up. Must be at least 1.
    pub max_attempts: u32,
    /// Wait after each unsuccessful probe.
    pub interval_ms: u32,
    /// Page global the runtime is expected under.
    pub runtime_global: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval_ms: DEFAULT_INTERVAL_MS,
            runtime_global: DEFAULT_RUNTIME_GLOBAL.to_string(),
        }
    }
}

impl DiscoveryOptions {
    /// Parses options from JSON text; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FileFieldError::InvalidConfig`] for malformed JSON or invalid values.
    pub fn from_json_str(raw: &str) -> Result<Self, FileFieldError> {
        let options: Self = serde_json::from_str(raw)
            .map_err(|err| FileFieldError::InvalidConfig(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks option ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FileFieldError::InvalidConfig`] when no attempt would be made or the global name
    /// is blank.
    pub fn validate(&self) -> Result<(), FileFieldError> {
        if self.max_attempts == 0 {
            return Err(FileFieldError::InvalidConfig(
                "discovery needs at least one attempt".to_string(),
            ));
        }
        if self.runtime_global.trim().is_empty() {
            return Err(FileFieldError::InvalidConfig(
                "runtime global name is blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses a host config object, tagging `existingFiles` at the boundary.
///
/// # Errors
///
/// Returns [`FileFieldError::InvalidFiles`] for malformed or mixed-shape files and
/// [`FileFieldError::InvalidConfig`] for any other problem.
pub fn parse_sync_config(raw: &Value) -> Result<SyncConfig, FileFieldError> {
    let Value::Object(fields) = raw else {
        return Err(FileFieldError::InvalidConfig(
            "file field config must be an object".to_string(),
        ));
    };
    let mut fields = fields.clone();
    let existing_files = match fields.remove("existingFiles") {
        Some(files) => FileList::from_json(&files)?,
        None => FileList::empty(),
    };
    let mut config: SyncConfig = serde_json::from_value(Value::Object(fields))
        .map_err(|err| FileFieldError::InvalidConfig(err.to_string()))?;
    config.existing_files = existing_files;
    config
        .validate()
        .map_err(FileFieldError::InvalidConfig)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use widget_host::{FileListError, FileShape};

    use super::*;

    #[test]
    fn defaults_poll_apper_sdk_fifty_times_every_100ms() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.max_attempts, 50);
        assert_eq!(options.interval_ms, 100);
        assert_eq!(options.runtime_global, "ApperSDK");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = DiscoveryOptions::from_json_str(r#"{"maxAttempts": 3}"#).expect("options");
        assert_eq!(
            options,
            DiscoveryOptions {
                max_attempts: 3,
                ..DiscoveryOptions::default()
            }
        );
    }

    #[test]
    fn zero_attempts_are_rejected() {
        assert!(matches!(
            DiscoveryOptions::from_json_str(r#"{"maxAttempts": 0}"#),
            Err(FileFieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parse_sync_config_reports_mixed_files_with_index() {
        let err = parse_sync_config(&json!({
            "elementId": "t1",
            "existingFiles": [{"Id": 1}, {"id": "x"}]
        }))
        .expect_err("mixed files");
        assert_eq!(
            err,
            FileFieldError::InvalidFiles(FileListError::MixedShapes {
                index: 1,
                expected: FileShape::Api,
                found: FileShape::Ui,
            })
        );
    }

    #[test]
    fn parse_sync_config_requires_element_id() {
        assert!(matches!(
            parse_sync_config(&json!({"fieldKey": "f"})),
            Err(FileFieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parse_sync_config_accepts_missing_files() {
        let config = parse_sync_config(&json!({"elementId": "t1", "fieldKey": "f"}))
            .expect("config");
        assert!(config.existing_files.is_empty());
        assert_eq!(config.field_key, "f");
    }
}
