//! Application status and lifecycle state.

use std::fmt;
use std::process::ExitCode;

/// Outcome of an application session, read by the caller to decide whether
/// to proceed and which exit code to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AppStatus {
    /// Every step so far succeeded.
    #[default]
    Success = 0,
    /// A setup step failed, e.g. window or renderer creation.
    InitializationError = 1,
    /// An in-loop operation failed, e.g. showing the window or loading an asset.
    RuntimeError = 2,
}

impl AppStatus {
    /// Returns `true` if no failure has been recorded.
    pub fn is_success(self) -> bool {
        self == AppStatus::Success
    }

    /// Numeric process exit code for this status.
    pub fn exit_code(self) -> u8 {
        self as u8
    }

    /// Record a failure. Only the first failure is kept and a failed status
    /// never returns to [`AppStatus::Success`].
    pub(crate) fn escalate(&mut self, to: AppStatus) {
        if *self == AppStatus::Success {
            *self = to;
        }
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppStatus::Success => f.write_str("success"),
            AppStatus::InitializationError => f.write_str("initialization error"),
            AppStatus::RuntimeError => f.write_str("runtime error"),
        }
    }
}

impl From<AppStatus> for ExitCode {
    fn from(status: AppStatus) -> Self {
        ExitCode::from(status.exit_code())
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Acquisition steps are still running.
    Constructing,
    /// Every acquisition step succeeded; `run` may be called.
    Ready,
    /// Inside the event/render loop.
    Running,
    /// The loop ended on a quit or close request.
    Terminated,
    /// A setup or runtime step failed; see the status for which.
    Failed,
}
