//! Files picked in a native open dialog.
//!
//! The dialog reports its result through a callback that may run on another
//! thread, while the main loop consumes entries once per frame. Both sides
//! share a [`FileSelection`], a cheaply cloneable handle to an append-only
//! list of paths with a consume cursor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::error::{ShellError, ShellResult, Stage};

/// Selectable entry of the dialog's filter list (e.g. "PNG images" -> `png`).
///
/// `pattern` uses `;` to separate extensions; `*` matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub pattern: String,
}

impl FileFilter {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    /// Plain extensions of the pattern, lowercased, without wildcards or dots.
    pub fn extensions(&self) -> Vec<String> {
        self.pattern
            .split(';')
            .map(|token| token.trim().trim_start_matches('.'))
            .filter(|token| !token.is_empty() && !token.contains(['*', '?']))
            .map(str::to_lowercase)
            .collect()
    }
}

/// The fixed, ordered filter list offered by the file dialog.
pub fn default_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("PNG images", "png"),
        FileFilter::new("JPEG images", "jpg;jpeg"),
        FileFilter::new("Bitmap images", "bmp"),
        FileFilter::new("All files", "*"),
    ]
}

/// Result reported by a file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Paths in the order the dialog returned them, plus the chosen filter.
    Selected {
        paths: Vec<PathBuf>,
        filter: Option<usize>,
    },
    /// The user dismissed the dialog.
    Cancelled,
    /// The dialog could not be shown or failed.
    Failed(String),
}

#[derive(Debug, Default)]
struct SelectionState {
    paths: Vec<PathBuf>,
    cursor: usize,
    last_filter: Option<usize>,
}

/// Thread-safe queue of selected files.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    inner: Arc<Mutex<SelectionState>>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialog completion callback. Returns how many paths were appended.
    ///
    /// An empty list or an empty first entry is a cancellation and appends
    /// nothing.
    pub fn deliver(&self, outcome: DialogOutcome) -> usize {
        match outcome {
            DialogOutcome::Selected { paths, filter } => {
                if paths.first().is_none_or(|p| p.as_os_str().is_empty()) {
                    info!("File dialog cancelled");
                    return 0;
                }
                let mut state = self.inner.lock();
                for path in &paths {
                    info!("Selected file: {}", path.display());
                }
                let added = paths.len();
                state.paths.extend(paths);
                state.last_filter = filter;
                added
            }
            DialogOutcome::Cancelled => {
                info!("File dialog cancelled");
                0
            }
            DialogOutcome::Failed(cause) => {
                let err = ShellError::backend(Stage::FileDialog, cause);
                error!("{err}");
                0
            }
        }
    }

    /// Next unconsumed path, advancing the cursor.
    pub fn take_next(&self) -> Option<PathBuf> {
        let mut state = self.inner.lock();
        let next = state.paths.get(state.cursor).cloned()?;
        state.cursor += 1;
        Some(next)
    }

    /// Number of paths delivered so far, consumed or not.
    pub fn len(&self) -> usize {
        self.inner.lock().paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of paths not yet consumed.
    pub fn pending(&self) -> usize {
        let state = self.inner.lock();
        state.paths.len() - state.cursor
    }

    /// Copy of every delivered path, in delivery order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner.lock().paths.clone()
    }

    /// Filter index reported with the most recent selection.
    pub fn last_filter(&self) -> Option<usize> {
        self.inner.lock().last_filter
    }
}

/// A selected file that was read completely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub len: usize,
    /// Image format sniffed from the contents, if recognised.
    pub format: Option<ImageFormat>,
}

/// Read a selected file in full.
pub fn read_selected(path: &Path) -> ShellResult<LoadedFile> {
    let bytes = std::fs::read(path).map_err(|e| ShellError::io(Stage::ReadSelectedFile, e))?;
    let format = image::guess_format(&bytes).ok();
    Ok(LoadedFile {
        path: path.to_path_buf(),
        len: bytes.len(),
        format,
    })
}

/// Consume at most one pending path and read it. Failures are logged only.
pub(crate) fn consume_one(selection: &FileSelection) -> Option<LoadedFile> {
    let path = selection.take_next()?;
    match read_selected(&path) {
        Ok(loaded) => {
            info!(
                "Loaded {} ({} bytes{})",
                loaded.path.display(),
                loaded.len,
                loaded
                    .format
                    .map(|f| format!(", {f:?}"))
                    .unwrap_or_default()
            );
            Some(loaded)
        }
        Err(e) => {
            warn!("{e} ({})", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_skip_wildcards() {
        let f = FileFilter::new("Images", "PNG; .jpg;*;b?p");
        assert_eq!(f.extensions(), vec!["png".to_owned(), "jpg".to_owned()]);
        assert!(FileFilter::new("All files", "*").extensions().is_empty());
    }

    #[test]
    fn default_filters_are_ordered() {
        let labels: Vec<_> = default_filters().into_iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            ["PNG images", "JPEG images", "Bitmap images", "All files"]
        );
    }

    #[test]
    fn empty_first_entry_is_cancellation() {
        let sel = FileSelection::new();
        let added = sel.deliver(DialogOutcome::Selected {
            paths: vec![PathBuf::new(), PathBuf::from("/tmp/x.png")],
            filter: None,
        });
        assert_eq!(added, 0);
        assert!(sel.is_empty());
    }

    #[test]
    fn cursor_advances_once_per_take() {
        let sel = FileSelection::new();
        sel.deliver(DialogOutcome::Selected {
            paths: vec!["a.png".into(), "b.png".into()],
            filter: Some(0),
        });
        assert_eq!(sel.pending(), 2);
        assert_eq!(sel.take_next(), Some(PathBuf::from("a.png")));
        assert_eq!(sel.pending(), 1);
        assert_eq!(sel.take_next(), Some(PathBuf::from("b.png")));
        assert_eq!(sel.take_next(), None);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.last_filter(), Some(0));
    }

    #[test]
    fn failed_dialog_appends_nothing() {
        let sel = FileSelection::new();
        assert_eq!(sel.deliver(DialogOutcome::Failed(String::new())), 0);
        assert_eq!(sel.deliver(DialogOutcome::Cancelled), 0);
        assert!(sel.is_empty());
    }

    #[test]
    fn missing_file_is_not_fatal() {
        let sel = FileSelection::new();
        sel.deliver(DialogOutcome::Selected {
            paths: vec!["/definitely/not/here.png".into()],
            filter: None,
        });
        assert_eq!(consume_one(&sel), None);
        assert_eq!(sel.pending(), 0);
    }
}
