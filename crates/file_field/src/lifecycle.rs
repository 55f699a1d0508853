//! Lifecycle states, the observable controller status, and the derived render model.

use widget_host::WidgetIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lifecycle of one embedded widget instance.
pub enum LifecycleState {
    /// No activation in progress; nothing mounted.
    #[default]
    Unmounted,
    /// Waiting for the runtime or for mount to finish.
    Initializing,
    /// Mounted and accepting file pushes.
    Ready,
    /// Activation failed; terminal until the next activation.
    Failed,
}

impl LifecycleState {
    /// Returns whether `self → next` is an allowed edge.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unmounted, Self::Initializing)
                | (Self::Initializing, Self::Ready)
                | (Self::Initializing, Self::Failed)
                | (Self::Initializing, Self::Unmounted)
                | (Self::Ready, Self::Unmounted)
                | (Self::Failed, Self::Unmounted)
        )
    }

    /// Returns a stable label for log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unmounted => "unmounted",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Observable controller state handed to the host view.
pub struct ControllerStatus {
    /// Current lifecycle state.
    pub state: LifecycleState,
    /// Short message for the error affordance.
    pub error: Option<String>,
    /// Identity of the current activation, if any.
    pub identity: Option<WidgetIdentity>,
}

impl ControllerStatus {
    /// Derives what the host should render.
    pub fn view(&self) -> FileFieldView {
        if let Some(message) = &self.error {
            return FileFieldView::Error(message.clone());
        }
        match self.state {
            LifecycleState::Ready => FileFieldView::Ready,
            _ => FileFieldView::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Render model for the widget region.
pub enum FileFieldView {
    /// Loading affordance inside the mount container.
    Loading,
    /// Widget mounted; the container belongs to the runtime.
    Ready,
    /// Error affordance with a short message.
    Error(String),
}

impl FileFieldView {
    /// Returns whether the loading affordance is shown.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns whether the error affordance replaces the container.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Error(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_documented_edges_are_allowed() {
        use LifecycleState::*;
        assert!(Unmounted.can_transition_to(Initializing));
        assert!(Initializing.can_transition_to(Ready));
        assert!(Failed.can_transition_to(Unmounted));

        assert!(!Unmounted.can_transition_to(Ready));
        assert!(!Initializing.can_transition_to(Initializing));
        assert!(!Ready.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Ready));
    }

    #[test]
    fn error_wins_over_ready() {
        let status = ControllerStatus {
            state: LifecycleState::Ready,
            error: Some("Failed to update files: x".to_string()),
            identity: None,
        };
        assert_eq!(
            status.view(),
            FileFieldView::Error("Failed to update files: x".to_string())
        );
    }

    #[test]
    fn non_ready_states_render_loading() {
        for state in [LifecycleState::Unmounted, LifecycleState::Initializing] {
            let status = ControllerStatus {
                state,
                ..ControllerStatus::default()
            };
            assert!(status.view().is_loading());
        }
    }
}
