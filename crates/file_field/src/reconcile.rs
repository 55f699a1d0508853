//! Reconciliation step: push only real file-list changes into a mounted widget.

use widget_host::{FileFieldRuntime, FileList};

use crate::{normalize::normalize, FileFieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a reconciliation pass did nothing.
pub enum SkipReason {
    /// The widget is not `Ready`.
    NotReady,
    /// No field key is configured.
    NoFieldKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of one reconciliation pass.
pub enum ReconcileOutcome {
    /// Gate closed; nothing compared.
    Skipped(SkipReason),
    /// Incoming list equals the last-applied one.
    Unchanged,
    /// `update_files` pushed this many records.
    Replaced {
        /// Records pushed.
        count: usize,
    },
    /// `clear_field` was called.
    Cleared,
    /// The push failed; the error channel was updated.
    Failed(FileFieldError),
}

impl ReconcileOutcome {
    /// Returns whether the widget received a change.
    pub fn pushed(&self) -> bool {
        matches!(self, Self::Replaced { .. } | Self::Cleared)
    }
}

/// Compares `next` against `last_applied` by full value and pushes the corrective call.
///
/// # Errors
///
/// Returns [`FileFieldError::ReconciliationFailure`] when conversion or the push fails.
pub fn reconcile_files(
    runtime: &dyn FileFieldRuntime,
    field_key: &str,
    last_applied: &FileList,
    next: &FileList,
) -> Result<ReconcileOutcome, FileFieldError> {
    if next == last_applied {
        return Ok(ReconcileOutcome::Unchanged);
    }

    let failure = |message: String| FileFieldError::ReconciliationFailure {
        field_key: field_key.to_string(),
        message,
    };

    let files = normalize(runtime, next).map_err(|err| match err {
        FileFieldError::Conversion { message } => failure(message),
        other => failure(other.to_string()),
    })?;

    if files.is_empty() {
        runtime.clear_field(field_key).map_err(failure)?;
        Ok(ReconcileOutcome::Cleared)
    } else {
        runtime.update_files(field_key, &files).map_err(failure)?;
        Ok(ReconcileOutcome::Replaced { count: files.len() })
    }
}
