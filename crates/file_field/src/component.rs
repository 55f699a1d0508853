//! Leptos view wrapper around [`FileFieldController`].

use leptos::*;
use widget_host::SyncConfig;

use crate::{
    ControllerStatus, FileFieldController, FileFieldHost, FileFieldView, LifecycleState,
};

/// Makes `host` the discovery bundle for every [`FileField`] below the current owner.
pub fn provide_file_field_host(host: FileFieldHost) {
    provide_context(host);
}

/// Embeds the file-attachment widget and keeps it in sync with `config`.
///
/// A change to any part of the activation key (element id, field key, table name, project id,
/// public key) tears the current widget down and mounts a fresh one. Changes to
/// `existingFiles` alone are pushed into the live widget.
#[component]
pub fn FileField(
    /// Host element id; the mount container gets id `file-uploader-{element_id}`.
    #[prop(into)]
    element_id: MaybeSignal<String>,
    /// Field binding and existing files.
    #[prop(into)]
    config: Signal<SyncConfig>,
    /// Discovery services; falls back to context, then to the browser bundle.
    #[prop(optional)]
    host: Option<FileFieldHost>,
) -> impl IntoView {
    let host = host
        .or_else(use_context::<FileFieldHost>)
        .unwrap_or_default();
    let status = create_rw_signal(ControllerStatus::default());
    let controller = FileFieldController::new(host).with_observer(move |next| {
        let _ = status.try_set(next.clone());
    });

    let effective = create_memo(move |_| {
        let mut next = config.get();
        next.element_id = element_id.get();
        next
    });
    let activation_key = create_memo(move |_| effective.with(SyncConfig::activation_key));
    let identity = create_memo(move |_| effective.with(SyncConfig::identity).to_string());

    on_cleanup({
        let controller = controller.clone();
        move || controller.teardown()
    });

    create_effect({
        let controller = controller.clone();
        move |_| {
            let _ = activation_key.get();
            let next = effective.get_untracked();
            let controller = controller.clone();
            spawn_local(async move {
                controller.activate(next).await;
            });
        }
    });

    let stable_files = create_memo({
        let controller = controller.clone();
        move |_| config.with(|config| controller.memoize_files(&config.existing_files))
    });
    let ready = create_memo(move |_| status.with(|status| status.state == LifecycleState::Ready));

    create_effect(move |_| {
        if !ready.get() {
            return;
        }
        let files = stable_files.get();
        controller.reconcile(&files);
    });

    let view_model = create_memo(move |_| status.with(ControllerStatus::view));

    view! {
        <div class="file-field">
            <Show
                when=move || !view_model.with(FileFieldView::is_error)
                fallback=move || view! {
                    <div class="file-field-error" role="alert">
                        <p class="file-field-error-title">"File Upload Error"</p>
                        <p class="file-field-error-message">
                            {move || view_model.with(FileFieldView::message).unwrap_or_default()}
                        </p>
                    </div>
                }
            >
                <div id=move || identity.get() class="file-field-mount">
                    <Show when=move || view_model.with(FileFieldView::is_loading)>
                        <p class="file-field-loading">"Initializing file uploader..."</p>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
