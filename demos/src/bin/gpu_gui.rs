//! Two sample windows and the Dear ImGui demo on SDL3 + WGPU.
//!
//! Run with:
//!   cargo run -p imgui-shell-demos --bin gpu_gui

use std::process::ExitCode;

use imgui_shell::{BackendKind, ShellConfig, logging};

fn main() -> ExitCode {
    logging::init_tracing();
    let config = ShellConfig::default()
        .with_backend(BackendKind::Gpu)
        .with_clear_color([0.1, 0.12, 0.15, 1.0]);
    imgui_shell_sdl3::run_app(config, imgui_shell_demos::sample_windows(), None).into()
}
