//! imgui-shell: the lifecycle controller behind the SDL3 + Dear ImGui demos
//!
//! Goals
//! - One controller for every demo: window, render backend and GUI bindings
//!   are acquired in a fixed order and released in exactly the reverse order
//! - Setup and runtime failures end up in an [`AppStatus`] the caller turns
//!   into a process exit code
//! - Windowing and rendering live behind the [`Platform`] and
//!   [`RenderBackend`] traits, so the lifecycle itself is testable without a
//!   display
//!
//! Quickstart
//! ```ignore
//! use imgui_shell::{Application, ShellConfig};
//!
//! let mut app: Application<MyPlatform, MyBackend> =
//!     Application::new(MyPlatform::default(), ShellConfig::default(), content);
//! if app.status().is_success() {
//!     app.run();
//! }
//! std::process::exit(app.status().exit_code() as i32);
//! ```

mod app;
mod config;
mod error;
pub mod logging;
mod platform;
mod selection;
mod status;

pub use app::Application;
pub use config::{BackendKind, ShellConfig, WindowDesc, effective_scale};
pub use error::{ShellError, ShellResult, Stage, UNKNOWN_CAUSE};
pub use platform::{FrameContext, Platform, PlatformWindow, RenderBackend, ShellEvent, WindowId};
pub use selection::{
    DialogOutcome, FileFilter, FileSelection, LoadedFile, default_filters, read_selected,
};
pub use status::{AppStatus, LifecycleState};

/// Re-exported so callers can match on [`LoadedFile::format`].
pub use image::ImageFormat;
