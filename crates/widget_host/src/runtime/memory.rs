//! In-memory widget runtime that records every call.

use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    future::poll_fn,
    rc::Rc,
    task::{Poll, Waker},
};

use crate::{
    ApiFileRecord, FileFieldRuntime, MountConfig, UiFileRecord, WidgetFuture, WidgetIdentity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Runtime operation selector used to script failures.
pub enum RuntimeOperation {
    /// [`FileFieldRuntime::mount`].
    Mount,
    /// [`FileFieldRuntime::unmount`].
    Unmount,
    /// [`FileFieldRuntime::update_files`].
    UpdateFiles,
    /// [`FileFieldRuntime::clear_field`].
    ClearField,
    /// [`FileFieldRuntime::to_ui_format`].
    ToUiFormat,
}

#[derive(Debug, Clone, PartialEq)]
/// One recorded runtime call.
pub enum RuntimeCall {
    /// Mount request.
    Mount {
        /// Target identity.
        identity: WidgetIdentity,
        /// Config the widget was seeded with.
        config: MountConfig,
    },
    /// Unmount request.
    Unmount {
        /// Target identity.
        identity: WidgetIdentity,
    },
    /// Full file replacement.
    UpdateFiles {
        /// Field key.
        field_key: String,
        /// Files pushed.
        files: Vec<UiFileRecord>,
    },
    /// Field clear.
    ClearField {
        /// Field key.
        field_key: String,
    },
    /// API → UI conversion.
    ToUiFormat {
        /// Number of records converted.
        count: usize,
    },
}

impl RuntimeCall {
    /// Returns the operation this call belongs to.
    pub const fn operation(&self) -> RuntimeOperation {
        match self {
            Self::Mount { .. } => RuntimeOperation::Mount,
            Self::Unmount { .. } => RuntimeOperation::Unmount,
            Self::UpdateFiles { .. } => RuntimeOperation::UpdateFiles,
            Self::ClearField { .. } => RuntimeOperation::ClearField,
            Self::ToUiFormat { .. } => RuntimeOperation::ToUiFormat,
        }
    }
}

type MountHook = Box<dyn FnMut(&WidgetIdentity)>;

#[derive(Default)]
struct HeldMount {
    released: bool,
    waker: Option<Waker>,
}

#[derive(Default)]
struct MemoryRuntimeState {
    calls: Vec<RuntimeCall>,
    failures: HashMap<RuntimeOperation, String>,
    mounted: BTreeSet<String>,
    mount_hook: Option<MountHook>,
    hold_next_mount: bool,
    held_mounts: Vec<Rc<RefCell<HeldMount>>>,
}

/// In-memory [`FileFieldRuntime`] for tests and host-less builds.
///
/// Conversion moves the server `Id` into the client-local `id` field and keeps every other field.
/// Mounting an identity that is already live replaces it, like a re-render into the same target.
#[derive(Clone, Default)]
pub struct MemoryFileFieldRuntime {
    inner: Rc<RefCell<MemoryRuntimeState>>,
}

impl std::fmt::Debug for MemoryFileFieldRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MemoryFileFieldRuntime")
            .field("calls", &state.calls.len())
            .field("mounted", &state.mounted)
            .finish()
    }
}

impl MemoryFileFieldRuntime {
    /// Makes every later call to `operation` fail with `message`.
    pub fn fail_on(&self, operation: RuntimeOperation, message: impl Into<String>) {
        self.inner
            .borrow_mut()
            .failures
            .insert(operation, message.into());
    }

    /// Lets `operation` succeed again.
    pub fn clear_failure(&self, operation: RuntimeOperation) {
        self.inner.borrow_mut().failures.remove(&operation);
    }

    /// Runs `hook` while a mount is in flight, before it resolves.
    pub fn on_mount(&self, hook: impl FnMut(&WidgetIdentity) + 'static) {
        self.inner.borrow_mut().mount_hook = Some(Box::new(hook));
    }

    /// Keeps the next mount pending until [`MemoryFileFieldRuntime::release_held_mounts`].
    pub fn hold_next_mount(&self) {
        self.inner.borrow_mut().hold_next_mount = true;
    }

    /// Lets every held mount resolve.
    pub fn release_held_mounts(&self) {
        let held = std::mem::take(&mut self.inner.borrow_mut().held_mounts);
        for mount in held {
            let waker = {
                let mut mount = mount.borrow_mut();
                mount.released = true;
                mount.waker.take()
            };
            if let Some(waker) = waker {
                waker.wake();
            }
        }
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns how many times `operation` was called.
    pub fn call_count(&self, operation: RuntimeOperation) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Returns the identities currently mounted.
    pub fn mounted_identities(&self) -> Vec<String> {
        self.inner.borrow().mounted.iter().cloned().collect()
    }

    fn record(&self, call: RuntimeCall) -> Result<(), String> {
        let operation = call.operation();
        let mut state = self.inner.borrow_mut();
        state.calls.push(call);
        match state.failures.get(&operation) {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

impl FileFieldRuntime for MemoryFileFieldRuntime {
    fn mount<'a>(
        &'a self,
        identity: &'a WidgetIdentity,
        config: &'a MountConfig,
    ) -> WidgetFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let hook = self.inner.borrow_mut().mount_hook.take();
            if let Some(mut hook) = hook {
                hook(identity);
                let mut state = self.inner.borrow_mut();
                if state.mount_hook.is_none() {
                    state.mount_hook = Some(hook);
                }
            }
            let held = {
                let mut state = self.inner.borrow_mut();
                std::mem::take(&mut state.hold_next_mount).then(|| {
                    let mount = Rc::new(RefCell::new(HeldMount::default()));
                    state.held_mounts.push(mount.clone());
                    mount
                })
            };
            if let Some(held) = held {
                poll_fn(|cx| {
                    let mut held = held.borrow_mut();
                    if held.released {
                        Poll::Ready(())
                    } else {
                        held.waker = Some(cx.waker().clone());
                        Poll::Pending
                    }
                })
                .await;
            }
            self.record(RuntimeCall::Mount {
                identity: identity.clone(),
                config: config.clone(),
            })?;
            self.inner
                .borrow_mut()
                .mounted
                .insert(identity.as_str().to_string());
            Ok(())
        })
    }

    fn unmount(&self, identity: &WidgetIdentity) -> Result<(), String> {
        self.record(RuntimeCall::Unmount {
            identity: identity.clone(),
        })?;
        self.inner.borrow_mut().mounted.remove(identity.as_str());
        Ok(())
    }

    fn update_files(&self, field_key: &str, files: &[UiFileRecord]) -> Result<(), String> {
        self.record(RuntimeCall::UpdateFiles {
            field_key: field_key.to_string(),
            files: files.to_vec(),
        })
    }

    fn clear_field(&self, field_key: &str) -> Result<(), String> {
        self.record(RuntimeCall::ClearField {
            field_key: field_key.to_string(),
        })
    }

    fn to_ui_format(&self, files: &[ApiFileRecord]) -> Result<Vec<UiFileRecord>, String> {
        self.record(RuntimeCall::ToUiFormat { count: files.len() })?;
        Ok(files
            .iter()
            .map(|record| UiFileRecord::from_converted(record.clone().into_fields()))
            .collect())
    }
}
