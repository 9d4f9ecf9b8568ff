//! Session content shared by the demo binaries.

use imgui_shell::FrameContext;
use imgui_shell_sdl3::UiContent;
use imgui_shell_sdl3::imgui::{Condition, Ui};
use tracing::info;

fn sample_window(ui: &Ui, title: &str, position: [f32; 2]) {
    ui.window(title)
        .position(position, Condition::FirstUseEver)
        .size([260.0, 110.0], Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("Hello from {title}"));
            if ui.button("Click me") {
                info!("{title}: button clicked");
            }
        });
}

/// "Window A" and "Window B", each with a button that logs clicks, plus
/// the Dear ImGui demo window until it is closed.
pub fn sample_windows() -> UiContent {
    let mut show_demo = true;
    Box::new(move |ui: &Ui, _frame: &mut FrameContext<'_>| {
        sample_window(ui, "Window A", [20.0, 20.0]);
        sample_window(ui, "Window B", [300.0, 20.0]);
        if show_demo {
            ui.show_demo_window(&mut show_demo);
        }
    })
}

/// [`sample_windows`] plus a panel that opens the native file dialog and
/// shows the last file read from the selection.
#[cfg(feature = "native-dialog")]
pub fn file_dialog_windows() -> UiContent {
    use imgui_shell::default_filters;
    use imgui_shell_sdl3::dialog::open_file_dialog;
    use tracing::error;

    let mut samples = sample_windows();
    Box::new(move |ui: &Ui, frame: &mut FrameContext<'_>| {
        samples(ui, frame);

        ui.window("Files")
            .position([20.0, 150.0], Condition::FirstUseEver)
            .size([420.0, 150.0], Condition::FirstUseEver)
            .build(|| {
                match frame.selection {
                    Some(selection) => {
                        if ui.button("Open...") {
                            if let Err(e) = open_file_dialog(selection, &default_filters(), true) {
                                error!("{e}");
                            }
                        }
                        ui.same_line();
                        ui.text(format!(
                            "{} selected, {} pending",
                            selection.len(),
                            selection.pending()
                        ));
                    }
                    None => ui.text_disabled("No file selection attached"),
                }

                ui.separator();
                match frame.loaded {
                    Some(file) => {
                        ui.text(format!("Last loaded: {}", file.path.display()));
                        let format = file
                            .format
                            .map(|f| format!("{f:?}"))
                            .unwrap_or_else(|| "unknown".to_owned());
                        ui.text(format!("{} bytes, format {format}", file.len));
                    }
                    None => ui.text("Nothing loaded yet"),
                }
                ui.text(format!(
                    "Application average {:.3} ms/frame ({:.1} FPS)",
                    1000.0 / ui.io().framerate(),
                    ui.io().framerate()
                ));
            });
    })
}
