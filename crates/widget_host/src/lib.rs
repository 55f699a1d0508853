//! Typed contracts shared between the file-field controller and its widget runtime adapters.
//!
//! This crate is the API-first boundary for the embedded file-attachment widget. It exposes the
//! tagged file-record models, the host-supplied sync configuration, the widget runtime contract,
//! and the discovery seams (runtime provider and wait timer). Concrete browser adapters live in
//! `widget_host_web`; in-memory adapters here back baseline tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod discovery;
pub mod files;
pub mod identity;
pub mod runtime;

pub use config::{ActivationKey, SyncConfig};
pub use discovery::{
    DiscoveryTimer, ImmediateDiscoveryTimer, MemoryDiscoveryTimer, MemoryRuntimeProvider,
    NoopRuntimeProvider, RuntimeProvider,
};
pub use files::list::{FileList, FileListError, FileListView};
pub use files::record::{
    ApiFileRecord, FileRecord, FileShape, UiFileRecord, CLIENT_ID_FIELD, SERVER_ID_FIELD,
};
pub use identity::{WidgetIdentity, WIDGET_IDENTITY_PREFIX};
pub use runtime::memory::{MemoryFileFieldRuntime, RuntimeCall, RuntimeOperation};
pub use runtime::{FileFieldRuntime, MountConfig, WidgetFuture};
