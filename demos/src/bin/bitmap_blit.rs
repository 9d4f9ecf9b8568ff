//! Blit `assets/sample.bmp` onto the SDL window surface. No GUI.
//!
//! Run from the workspace root with:
//!   cargo run -p imgui-shell-demos --bin bitmap_blit

use std::process::ExitCode;

use imgui_shell::{BackendKind, ShellConfig, logging};

fn main() -> ExitCode {
    logging::init_tracing();
    let config = ShellConfig::default().with_backend(BackendKind::Surface);
    imgui_shell_sdl3::run_app(config, imgui_shell_sdl3::no_content(), None).into()
}
