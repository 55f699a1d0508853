//! Error channel taxonomy for the file-field controller.

use thiserror::Error;
use widget_host::FileListError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Controller phase a failure happened in, used for diagnostics.
pub enum LifecyclePhase {
    /// Config or input validation.
    Config,
    /// Waiting for the widget runtime.
    Discovery,
    /// Mounting the widget.
    Mount,
    /// Tearing the widget down.
    Unmount,
    /// Pushing file changes into a mounted widget.
    Reconcile,
}

impl LifecyclePhase {
    /// Returns a stable label for log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Discovery => "discovery",
            Self::Mount => "mount",
            Self::Unmount => "unmount",
            Self::Reconcile => "reconcile",
        }
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures raised while discovering, mounting, syncing, or tearing down the widget.
pub enum FileFieldError {
    /// Discovery used up its attempt budget.
    #[error(
        "{runtime} not loaded after {attempts} attempts. Please ensure the SDK script is included before this component."
    )]
    RuntimeUnavailable {
        /// Global name the runtime was expected under.
        runtime: String,
        /// Attempts made.
        attempts: u32,
    },
    /// The widget's mount operation failed.
    #[error("Failed to mount file field: {message}")]
    MountFailure {
        /// Widget identity.
        identity: String,
        /// Runtime-provided reason.
        message: String,
    },
    /// The widget's unmount operation failed. Logged, never surfaced.
    #[error("Failed to unmount file field: {message}")]
    UnmountFailure {
        /// Widget identity.
        identity: String,
        /// Runtime-provided reason.
        message: String,
    },
    /// A post-mount update or clear failed.
    #[error("Failed to update files: {message}")]
    ReconciliationFailure {
        /// Field the push targeted.
        field_key: String,
        /// Runtime-provided reason.
        message: String,
    },
    /// API → UI conversion failed.
    #[error("Failed to convert files: {message}")]
    Conversion {
        /// Runtime-provided reason.
        message: String,
    },
    /// Host-supplied files were malformed or mixed shapes.
    #[error("Invalid existing files: {0}")]
    InvalidFiles(#[from] FileListError),
    /// Host-supplied config was unusable.
    #[error("Invalid file field config: {0}")]
    InvalidConfig(String),
}

impl FileFieldError {
    /// Returns the phase the failure belongs to.
    pub const fn phase(&self) -> LifecyclePhase {
        match self {
            Self::RuntimeUnavailable { .. } => LifecyclePhase::Discovery,
            Self::MountFailure { .. } | Self::Conversion { .. } => LifecyclePhase::Mount,
            Self::UnmountFailure { .. } => LifecyclePhase::Unmount,
            Self::ReconciliationFailure { .. } => LifecyclePhase::Reconcile,
            Self::InvalidFiles(_) | Self::InvalidConfig(_) => LifecyclePhase::Config,
        }
    }

    /// Returns the short message shown in the error affordance.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
