//! Seams between the controller and the libraries it drives.
//!
//! A [`Platform`] is the windowing subsystem: it creates windows and yields
//! input events. A [`RenderBackend`] owns whatever presents frames into that
//! window (an immediate renderer, a GPU device, or the window surface) and
//! the GUI bindings attached to it.

use crate::config::{ShellConfig, WindowDesc};
use crate::error::ShellResult;
use crate::selection::{FileSelection, LoadedFile};

/// Platform window identifier.
pub type WindowId = u32;

/// What the controller needs to know about a platform event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The application was asked to quit.
    Quit,
    /// A window asked to be closed.
    CloseRequested(WindowId),
    Minimized(WindowId),
    Restored(WindowId),
    /// Anything else; only the GUI bindings care.
    Other,
}

/// Windowing subsystem.
pub trait Platform {
    /// Raw event type handed to the GUI bindings.
    type Event;
    type Window: PlatformWindow;

    /// Initialize the subsystem.
    fn init(&mut self, config: &ShellConfig) -> ShellResult<()>;

    /// Content scale of the primary display; `0.0` when unknown.
    fn display_content_scale(&self) -> f32;

    fn create_window(&mut self, desc: &WindowDesc) -> ShellResult<Self::Window>;

    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<Self::Event>;

    fn classify(&self, event: &Self::Event) -> ShellEvent;

    /// Shut the subsystem down. Called exactly once, whether or not `init`
    /// succeeded.
    fn shutdown(&mut self);
}

/// Window created by a [`Platform`].
pub trait PlatformWindow {
    fn id(&self) -> WindowId;

    fn show(&mut self) -> ShellResult<()>;
}

/// Per-frame information passed to the backend and on to GUI content.
#[derive(Debug)]
pub struct FrameContext<'a> {
    /// Zero-based index of the frame being rendered.
    pub frame_index: u64,
    /// Effective display content scale.
    pub scale: f32,
    /// Queue the file dialog delivers into, if the session has one.
    pub selection: Option<&'a FileSelection>,
    /// The most recently read selected file.
    pub loaded: Option<&'a LoadedFile>,
}

/// Presents frames into a platform window.
///
/// Resources acquired by [`RenderBackend::create`] are released when the
/// backend is dropped; the GUI bindings are a separate value so they can be
/// released first.
pub trait RenderBackend<P: Platform>: Sized {
    /// GUI context and bindings attached to this backend.
    type Gui;
    /// Session content handed to [`RenderBackend::attach_gui`].
    type Content;

    /// Create the renderer or device for `window`.
    fn create(platform: &mut P, window: &mut P::Window, config: &ShellConfig) -> ShellResult<Self>;

    fn set_vsync(&mut self, platform: &P, enabled: bool) -> ShellResult<()>;

    /// Create the GUI context and bind it to the window and this backend.
    fn attach_gui(
        &mut self,
        window: &P::Window,
        scale: f32,
        config: &ShellConfig,
        content: Self::Content,
    ) -> ShellResult<Self::Gui>;

    /// Deferred session resources, loaded once before the loop starts.
    fn load_resources(&mut self, _gui: &mut Self::Gui) -> ShellResult<()> {
        Ok(())
    }

    /// Forward a raw event to the GUI bindings.
    fn process_event(&mut self, gui: &mut Self::Gui, event: &P::Event);

    /// Build one GUI frame and submit it.
    fn render_frame(
        &mut self,
        gui: &mut Self::Gui,
        window: &mut P::Window,
        frame: &mut FrameContext<'_>,
    ) -> ShellResult<()>;
}
