//! Lifecycle and synchronization controller for an embedded file-attachment widget.
//!
//! The widget runtime is a page global loaded by a separate script. This crate waits for it,
//! mounts one widget instance per host element, pushes file-list changes into the live widget,
//! and unmounts it again, reporting every user-visible failure through one error channel.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod component;
pub mod controller;
pub mod discovery;
pub mod error;
mod host;
pub mod lifecycle;
pub mod memo;
pub mod normalize;
pub mod options;
pub mod reconcile;
mod token;

pub use component::{provide_file_field_host, FileField, FileFieldProps};
pub use controller::{ActivationOutcome, FileFieldController, StatusObserver};
pub use discovery::{discover, Discovery};
pub use error::{FileFieldError, LifecyclePhase};
pub use host::FileFieldHost;
pub use lifecycle::{ControllerStatus, FileFieldView, LifecycleState};
pub use memo::{same_list_heuristic, FileListMemo};
pub use normalize::normalize;
pub use options::{
    parse_sync_config, DiscoveryOptions, DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RUNTIME_GLOBAL,
};
pub use reconcile::{reconcile_files, ReconcileOutcome, SkipReason};
pub use token::ActivationToken;
pub use widget_host::{FileList, FileRecord, SyncConfig, WidgetIdentity};
