//! Mount/unmount lifecycle manager for one embedded file-field widget.
//!
//! The controller owns the lifecycle state, the error channel, and the last-applied file
//! snapshot. All runtime calls go through it:
//! 1. [`FileFieldController::activate`] tears down any previous activation, discovers the runtime,
//!    and mounts with the memoized seed files.
//! 2. [`FileFieldController::reconcile`] pushes file changes while `Ready`.
//! 3. [`FileFieldController::teardown`] cancels in-flight work and unmounts a live widget.
//!
//! Everything runs on one thread; `RefCell` borrows are never held across an `.await` or an
//! observer callback.

use std::{cell::RefCell, rc::Rc};

use futures::{channel::oneshot, future::Shared, FutureExt};
use leptos::logging;
use widget_host::{FileFieldRuntime, FileList, MountConfig, SyncConfig, WidgetIdentity};

use crate::{
    discovery::{discover, Discovery},
    normalize::normalize,
    reconcile::{reconcile_files, ReconcileOutcome, SkipReason},
    ActivationToken, ControllerStatus, FileFieldError, FileFieldHost, FileListMemo,
    LifecycleState,
};

/// Callback invoked after every status change.
pub type StatusObserver = Rc<dyn Fn(&ControllerStatus)>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// How one activation ended.
pub enum ActivationOutcome {
    /// The widget is mounted.
    Ready,
    /// Discovery, validation, or mount failed; the error channel carries the message.
    Failed(FileFieldError),
    /// The activation was torn down before it finished.
    Cancelled,
}

struct MountedWidget {
    identity: WidgetIdentity,
    runtime: Rc<dyn FileFieldRuntime>,
}

/// Mount call still awaiting the runtime; resolves once that activation has settled it.
struct PendingMount {
    generation: u64,
    settled: Shared<oneshot::Receiver<()>>,
}

type MountResult = Result<Option<(Rc<dyn FileFieldRuntime>, FileList)>, FileFieldError>;

#[derive(Default)]
struct ControllerInner {
    status: ControllerStatus,
    generation: u64,
    token: Option<ActivationToken>,
    config: SyncConfig,
    pending_mount: Option<PendingMount>,
    mounted: Option<MountedWidget>,
    memo: FileListMemo,
    last_applied: FileList,
}

/// Lifecycle and synchronization controller for one widget slot.
#[derive(Clone)]
pub struct FileFieldController {
    host: FileFieldHost,
    inner: Rc<RefCell<ControllerInner>>,
    observer: Option<StatusObserver>,
}

impl FileFieldController {
    /// Creates an unmounted controller using `host` for discovery.
    pub fn new(host: FileFieldHost) -> Self {
        Self {
            host,
            inner: Rc::new(RefCell::new(ControllerInner::default())),
            observer: None,
        }
    }

    /// Registers a callback run after every status change.
    pub fn with_observer(mut self, observer: impl Fn(&ControllerStatus) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    /// Returns a snapshot of the observable status.
    pub fn status(&self) -> ControllerStatus {
        self.inner.borrow().status.clone()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().status.state
    }

    /// Returns the number of activations started so far.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Returns the file list last pushed into (or seeded to) the widget.
    pub fn last_applied(&self) -> FileList {
        self.inner.borrow().last_applied.clone()
    }

    /// Runs one activation: teardown of the previous one, discovery, then mount.
    ///
    /// Resolves to [`ActivationOutcome::Cancelled`] without touching state when
    /// [`FileFieldController::teardown`] runs while it is in flight. A mount still pending from an
    /// earlier activation is awaited, and unmounted by that activation, before this one mounts.
    pub async fn activate(&self, config: SyncConfig) -> ActivationOutcome {
        self.teardown();

        let identity = config.identity();
        let token = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            let token = ActivationToken::new(inner.generation);
            inner.token = Some(token.clone());
            inner.config = config.clone();
            inner.status.identity = Some(identity.clone());
            inner.memo.memoize(Some(&config.existing_files));
            token
        };
        self.transition(LifecycleState::Initializing, None);
        logging::log!(
            "file field `{identity}` activation {} discovering via {} host",
            token.generation(),
            self.host.host_strategy_name()
        );

        match self.mount_when_available(&config, &identity, &token).await {
            Ok(Some((runtime, seeded))) => {
                {
                    let mut inner = self.inner.borrow_mut();
                    inner.mounted = Some(MountedWidget {
                        identity: identity.clone(),
                        runtime,
                    });
                    inner.last_applied = seeded;
                }
                self.transition(LifecycleState::Ready, None);
                logging::log!(
                    "file field `{identity}` ready (activation {})",
                    token.generation()
                );
                ActivationOutcome::Ready
            }
            Ok(None) => ActivationOutcome::Cancelled,
            Err(err) if token.is_live() => {
                logging::error!("file field `{identity}` {} failed: {err}", err.phase());
                self.transition(LifecycleState::Failed, Some(err.user_message()));
                ActivationOutcome::Failed(err)
            }
            Err(err) => {
                logging::warn!(
                    "file field `{identity}` {} failed after teardown: {err}",
                    err.phase()
                );
                ActivationOutcome::Cancelled
            }
        }
    }

    async fn mount_when_available(
        &self,
        config: &SyncConfig,
        identity: &WidgetIdentity,
        token: &ActivationToken,
    ) -> MountResult {
        config.validate().map_err(FileFieldError::InvalidConfig)?;
        let options = self.host.options();
        options.validate()?;

        let provider = self.host.provider();
        let timer = self.host.timer();
        let runtime = match discover(provider.as_ref(), timer.as_ref(), options, token).await? {
            Discovery::Found(runtime) => runtime,
            Discovery::Cancelled => return Ok(None),
        };
        if !token.is_live() {
            return Ok(None);
        }

        let previous = self
            .inner
            .borrow()
            .pending_mount
            .as_ref()
            .map(|pending| pending.settled.clone());
        if let Some(previous) = previous {
            let _ = previous.await;
            if !token.is_live() {
                return Ok(None);
            }
        }

        let seeded = self.inner.borrow().memo.cached().clone();
        let files = normalize(runtime.as_ref(), &seeded)?;
        let mount_config = MountConfig::from_sync_config(config, files);

        // Later activations wait on `settled` until this mount resolves and, if stale, is unmounted.
        let (_settle, settled) = oneshot::channel::<()>();
        self.inner.borrow_mut().pending_mount = Some(PendingMount {
            generation: token.generation(),
            settled: settled.shared(),
        });
        let mounted = runtime.mount(identity, &mount_config).await;
        {
            let mut inner = self.inner.borrow_mut();
            if inner
                .pending_mount
                .as_ref()
                .is_some_and(|pending| pending.generation == token.generation())
            {
                inner.pending_mount = None;
            }
        }
        mounted.map_err(|message| FileFieldError::MountFailure {
            identity: identity.to_string(),
            message,
        })?;

        if !token.is_live() {
            logging::warn!("file field `{identity}` finished mounting after teardown");
            unmount_quietly(runtime.as_ref(), identity);
            return Ok(None);
        }
        Ok(Some((runtime, seeded)))
    }

    /// Cancels in-flight work, unmounts a live widget, and resets to `Unmounted`.
    ///
    /// Unmount errors are logged and swallowed; teardown always completes.
    pub fn teardown(&self) {
        let (token, mounted, state) = {
            let mut inner = self.inner.borrow_mut();
            inner.memo.reset();
            inner.last_applied = FileList::empty();
            inner.config = SyncConfig::default();
            inner.status.identity = None;
            (inner.token.take(), inner.mounted.take(), inner.status.state)
        };

        if let Some(token) = token {
            token.cancel();
        }
        if let Some(mounted) = mounted {
            unmount_quietly(mounted.runtime.as_ref(), &mounted.identity);
        }
        if state != LifecycleState::Unmounted {
            self.transition(LifecycleState::Unmounted, None);
        }
    }

    /// Runs the identity-stable memoizer over the host's current files.
    pub fn memoize_files(&self, raw: &FileList) -> FileList {
        self.inner.borrow_mut().memo.memoize(Some(raw))
    }

    /// Pushes `files` into the mounted widget if they differ from the last-applied list.
    ///
    /// Failures land on the error channel and leave the lifecycle state at `Ready`.
    pub fn reconcile(&self, files: &FileList) -> ReconcileOutcome {
        let (runtime, identity, field_key, last_applied) = {
            let inner = self.inner.borrow();
            let Some(mounted) = inner.mounted.as_ref() else {
                return ReconcileOutcome::Skipped(SkipReason::NotReady);
            };
            if inner.status.state != LifecycleState::Ready {
                return ReconcileOutcome::Skipped(SkipReason::NotReady);
            }
            if !inner.config.has_field_key() {
                return ReconcileOutcome::Skipped(SkipReason::NoFieldKey);
            }
            (
                mounted.runtime.clone(),
                mounted.identity.clone(),
                inner.config.field_key.clone(),
                inner.last_applied.clone(),
            )
        };

        match reconcile_files(runtime.as_ref(), &field_key, &last_applied, files) {
            Ok(outcome) => {
                if outcome.pushed() {
                    self.inner.borrow_mut().last_applied = files.clone();
                }
                outcome
            }
            Err(err) => {
                logging::error!("file field `{identity}` {} failed: {err}", err.phase());
                self.set_error(err.user_message());
                ReconcileOutcome::Failed(err)
            }
        }
    }

    fn transition(&self, next: LifecycleState, error: Option<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            let current = inner.status.state;
            if !current.can_transition_to(next) {
                logging::error!(
                    "file field ignored invalid transition {} -> {}",
                    current.as_str(),
                    next.as_str()
                );
                return;
            }
            inner.status.state = next;
            inner.status.error = error;
        }
        self.notify();
    }

    fn set_error(&self, message: String) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.status.error.as_deref() == Some(message.as_str()) {
                return;
            }
            inner.status.error = Some(message);
        }
        self.notify();
    }

    fn notify(&self) {
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        let status = self.status();
        observer(&status);
    }
}

fn unmount_quietly(runtime: &dyn FileFieldRuntime, identity: &WidgetIdentity) {
    if let Err(message) = runtime.unmount(identity) {
        let err = FileFieldError::UnmountFailure {
            identity: identity.to_string(),
            message,
        };
        logging::warn!("file field `{identity}` {} failed: {err}", err.phase());
    }
}
