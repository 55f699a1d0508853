//! Format normalizer: turns any tagged file list into the widget's UI shape.

use widget_host::{FileFieldRuntime, FileList, FileListView, UiFileRecord};

use crate::FileFieldError;

/// Returns `files` in UI shape.
///
/// API-shape lists go through [`FileFieldRuntime::to_ui_format`]; UI-shape lists are copied
/// through without calling the runtime. The list's shape was fixed when it was built, so only the
/// tag is consulted here.
///
/// # Errors
///
/// Returns [`FileFieldError::Conversion`] when the runtime conversion fails.
pub fn normalize(
    runtime: &dyn FileFieldRuntime,
    files: &FileList,
) -> Result<Vec<UiFileRecord>, FileFieldError> {
    match files.view() {
        FileListView::Empty => Ok(Vec::new()),
        FileListView::Ui(records) => Ok(records.into_iter().cloned().collect()),
        FileListView::Api(records) => {
            let owned: Vec<_> = records.into_iter().cloned().collect();
            runtime
                .to_ui_format(&owned)
                .map_err(|message| FileFieldError::Conversion { message })
        }
    }
}
