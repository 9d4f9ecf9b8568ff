//! Native open-file dialog (rfd) delivering into a [`FileSelection`].
//!
//! The dialog runs on its own thread so the main loop keeps rendering while
//! it is open; the result lands in the selection and is consumed one file
//! per frame.

use std::thread;

use imgui_shell::{DialogOutcome, FileFilter, FileSelection, ShellError, ShellResult, Stage};
use rfd::AsyncFileDialog;
use tracing::{debug, trace};

/// Native filters as `(label, extensions)`. Filters that only match by
/// wildcard have no native equivalent and are left out; the dialog then
/// shows every file.
pub fn native_filters(filters: &[FileFilter]) -> Vec<(String, Vec<String>)> {
    filters
        .iter()
        .filter_map(|f| {
            let exts = f.extensions();
            (!exts.is_empty()).then(|| (f.label.clone(), exts))
        })
        .collect()
}

fn build_dialog(title: &str, filters: &[(String, Vec<String>)]) -> AsyncFileDialog {
    let mut dialog = AsyncFileDialog::new().set_title(title);
    for (label, exts) in filters {
        dialog = dialog.add_filter(label, exts.as_slice());
    }
    dialog
}

/// Show the native open dialog without blocking the caller.
///
/// The outcome is delivered to `selection` from the dialog thread. Only
/// spawning that thread can fail here.
pub fn open_file_dialog(
    selection: &FileSelection,
    filters: &[FileFilter],
    allow_many: bool,
) -> ShellResult<()> {
    let selection = selection.clone();
    let filters = native_filters(filters);

    thread::Builder::new()
        .name("imgui-shell-file-dialog".into())
        .spawn(move || {
            trace!(allow_many, "rfd async open");
            let dialog = build_dialog("Open", &filters);
            let paths = if allow_many {
                pollster::block_on(dialog.pick_files())
                    .map(|files| files.into_iter().map(|h| h.path().to_path_buf()).collect())
            } else {
                pollster::block_on(dialog.pick_file()).map(|h| vec![h.path().to_path_buf()])
            };

            let outcome = match paths {
                Some(paths) => DialogOutcome::Selected {
                    paths,
                    filter: None,
                },
                None => DialogOutcome::Cancelled,
            };
            let added = selection.deliver(outcome);
            debug!("File dialog closed, {added} file(s) queued");
        })
        .map(|_| ())
        .map_err(|e| ShellError::io(Stage::FileDialog, e))
}
