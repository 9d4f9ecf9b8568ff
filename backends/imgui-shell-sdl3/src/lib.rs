//! SDL3 backends for `imgui-shell`.
//!
//! [`SdlPlatform`] provides the window, event stream and display scale;
//! [`SdlBackend`] presents frames through one of three paths, picked by
//! [`ShellConfig::backend`](imgui_shell::ShellConfig::backend):
//! - `Surface`: blit a bitmap onto the SDL window surface, no GUI
//! - `Renderer`: OpenGL 3.2 core context, drawn with `dear-imgui-glow`
//! - `Gpu`: a `wgpu` device and surface, drawn with `dear-imgui-wgpu`
//!
//! The GUI paths bind Dear ImGui through the official SDL3 platform backend
//! (`dear-imgui-sdl3`).
//!
//! ```no_run
//! use imgui_shell::{BackendKind, FrameContext, ShellConfig};
//! use imgui_shell_sdl3::imgui::Ui;
//!
//! let config = ShellConfig::default().with_backend(BackendKind::Gpu);
//! let code = imgui_shell_sdl3::run_app(
//!     config,
//!     Box::new(|ui: &Ui, _frame: &mut FrameContext<'_>| ui.text("Hello from SDL3")),
//!     None,
//! );
//! std::process::exit(code.exit_code() as i32);
//! ```

mod backend;
#[cfg(feature = "native-dialog")]
pub mod dialog;
mod gpu;
mod gui;
mod platform;
mod renderer;
mod surface;

pub use backend::{SdlBackend, SdlGui};
pub use gpu::WgpuBackend;
pub use gui::{ImguiLayer, UiContent, no_content};
pub use platform::{SdlPlatform, SdlWindow};
pub use renderer::GlowBackend;
pub use surface::BlitBackend;

/// Re-exported for UI content closures.
pub use dear_imgui_rs as imgui;

use imgui_shell::{AppStatus, Application, FileSelection, ShellConfig};

/// The controller driving SDL3.
pub type SdlApp = Application<SdlPlatform, SdlBackend>;

/// Set up, run and tear down one session, returning its final status.
///
/// Teardown happens before this returns, so the status already reflects the
/// whole session.
pub fn run_app(
    config: ShellConfig,
    content: UiContent,
    selection: Option<FileSelection>,
) -> AppStatus {
    let mut app = SdlApp::new(SdlPlatform::new(), config, content);
    if let Some(selection) = selection {
        app = app.with_file_selection(selection);
    }
    if app.status().is_success() {
        app.run();
    }
    let status = app.status();
    drop(app);
    status
}
