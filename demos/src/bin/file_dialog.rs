//! Open image files through the native dialog; one selected file is read
//! per frame and reported in the "Files" window.
//!
//! Run with:
//!   cargo run -p imgui-shell-demos --bin file_dialog

use std::process::ExitCode;

use imgui_shell::{BackendKind, FileSelection, ShellConfig, logging};

fn main() -> ExitCode {
    logging::init_tracing();
    let config = ShellConfig::default().with_backend(BackendKind::Renderer);
    let selection = FileSelection::new();
    imgui_shell_sdl3::run_app(
        config,
        imgui_shell_demos::file_dialog_windows(),
        Some(selection),
    )
    .into()
}
