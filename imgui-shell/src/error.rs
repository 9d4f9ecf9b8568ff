//! Error types for the application shell
//!
//! Every failure is tagged with the [`Stage`] that produced it. The stage
//! decides whether the failure is a setup failure (status becomes
//! [`AppStatus::InitializationError`]) or a runtime failure (status becomes
//! [`AppStatus::RuntimeError`]).

use std::fmt;

use thiserror::Error;

use crate::status::{AppStatus, LifecycleState};

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Text logged when a platform reports a failure without any message.
pub const UNKNOWN_CAUSE: &str = "unknown cause";

/// Named step of the application lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Windowing subsystem initialization.
    InitPlatform,
    /// Primary display content scale query.
    QueryScale,
    /// Window creation.
    CreateWindow,
    /// Renderer, GL context or GPU device creation.
    CreateRenderer,
    /// Vertical sync configuration.
    EnableVsync,
    /// GUI context and backend bindings.
    AttachGui,
    /// Deferred session resources, e.g. a bitmap.
    LoadResources,
    /// Making the window visible.
    ShowWindow,
    /// Building and submitting one frame.
    RenderFrame,
    /// Reading a file picked in the file dialog.
    ReadSelectedFile,
    /// The native file dialog itself.
    FileDialog,
}

impl Stage {
    /// `true` for acquisition steps that run during construction.
    pub fn is_setup(self) -> bool {
        matches!(
            self,
            Stage::InitPlatform
                | Stage::QueryScale
                | Stage::CreateWindow
                | Stage::CreateRenderer
                | Stage::EnableVsync
                | Stage::AttachGui
        )
    }

    /// Status a failure at this stage escalates to.
    pub fn failure_status(self) -> AppStatus {
        if self.is_setup() {
            AppStatus::InitializationError
        } else {
            AppStatus::RuntimeError
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Stage::InitPlatform => "InitPlatform",
            Stage::QueryScale => "QueryScale",
            Stage::CreateWindow => "CreateWindow",
            Stage::CreateRenderer => "CreateRenderer",
            Stage::EnableVsync => "EnableVsync",
            Stage::AttachGui => "AttachGui",
            Stage::LoadResources => "LoadResources",
            Stage::ShowWindow => "ShowWindow",
            Stage::RenderFrame => "RenderFrame",
            Stage::ReadSelectedFile => "ReadSelectedFile",
            Stage::FileDialog => "FileDialog",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the shell and its backends
#[derive(Error, Debug)]
pub enum ShellError {
    /// A windowing, rendering or GUI library call failed
    #[error("{stage}: {cause}")]
    Backend { stage: Stage, cause: String },

    /// A filesystem operation failed
    #[error("{stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    /// `run` was called while the controller was not ready
    #[error("application is not ready to run (state: {state:?})")]
    NotReady { state: LifecycleState },
}

impl ShellError {
    /// Create a backend error. An empty cause is replaced by [`UNKNOWN_CAUSE`].
    pub fn backend(stage: Stage, cause: impl fmt::Display) -> Self {
        let mut cause = cause.to_string();
        if cause.trim().is_empty() {
            cause = UNKNOWN_CAUSE.to_owned();
        }
        Self::Backend { stage, cause }
    }

    /// Create an I/O error for the given stage.
    pub fn io(stage: Stage, source: std::io::Error) -> Self {
        Self::Io { stage, source }
    }

    /// Stage the error belongs to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ShellError::Backend { stage, .. } | ShellError::Io { stage, .. } => Some(*stage),
            ShellError::NotReady { .. } => None,
        }
    }

    /// Status this error escalates the application to.
    pub fn failure_status(&self) -> AppStatus {
        self.stage()
            .map(Stage::failure_status)
            .unwrap_or(AppStatus::RuntimeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn backend_error_formats_stage_and_cause() {
        let err = ShellError::backend(Stage::CreateWindow, "No available video device");
        assert_eq!(err.to_string(), "CreateWindow: No available video device");
        assert_eq!(err.failure_status(), AppStatus::InitializationError);
    }

    #[test]
    fn empty_cause_becomes_unknown() {
        let err = ShellError::backend(Stage::ShowWindow, "");
        assert_eq!(err.to_string(), "ShowWindow: unknown cause");
        assert_eq!(err.failure_status(), AppStatus::RuntimeError);
    }

    #[test]
    fn io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ShellError::io(Stage::ReadSelectedFile, source);
        assert!(err.source().is_some());
        assert_eq!(err.stage(), Some(Stage::ReadSelectedFile));
    }

    #[test]
    fn setup_stages() {
        assert!(Stage::CreateRenderer.is_setup());
        assert!(Stage::AttachGui.is_setup());
        assert!(!Stage::LoadResources.is_setup());
        assert!(!Stage::RenderFrame.is_setup());
    }
}
