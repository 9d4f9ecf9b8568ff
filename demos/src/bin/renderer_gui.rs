//! Two sample windows and the Dear ImGui demo on SDL3 + OpenGL (glow).
//!
//! Run with:
//!   cargo run -p imgui-shell-demos --bin renderer_gui

use std::process::ExitCode;

use imgui_shell::{BackendKind, ShellConfig, logging};

fn main() -> ExitCode {
    logging::init_tracing();
    let config = ShellConfig::default().with_backend(BackendKind::Renderer);
    imgui_shell_sdl3::run_app(config, imgui_shell_demos::sample_windows(), None).into()
}
