//! Browser (`wasm32`) implementations of [`widget_host`] runtime contracts.
//!
//! This crate locates the embedded widget runtime on the page global, drives it through JS
//! interop, and supplies a `setTimeout`-backed discovery timer. Bridge bindings live under
//! `bridge/`, with `bridge::interop` routing to the wasm or non-wasm implementation.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod runtime;
pub mod timer;

pub use adapters::{
    discovery_timer, host_strategy_name, runtime_provider, selected_host_strategy,
    DiscoveryTimerAdapter, HostStrategy, RuntimeProviderAdapter,
};
pub use runtime::{WebFileFieldRuntime, WebRuntimeProvider};
pub use timer::BrowserDiscoveryTimer;
