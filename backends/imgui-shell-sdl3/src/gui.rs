//! Dear ImGui context, SDL3 platform bindings and the user's per-frame UI.

use std::time::Instant;

use dear_imgui_rs::{ConfigFlags, Context, DrawData, Ui};
use dear_imgui_sdl3 as imgui_sdl3_backend;
use imgui_shell::{FrameContext, ShellConfig, ShellError, ShellResult, Stage};
use sdl3_sys::events::SDL_Event;
use tracing::debug;

/// Per-frame UI content. Called between `frame()` and `render()`.
pub type UiContent = Box<dyn FnMut(&Ui, &mut FrameContext<'_>)>;

/// Content that draws nothing.
pub fn no_content() -> UiContent {
    Box::new(|_: &Ui, _: &mut FrameContext<'_>| {})
}

/// Create a context configured for `scale`. The SDL3 platform backend
/// must be initialized on it before [`ImguiLayer::bound`] is called.
pub(crate) fn create_context(scale: f32, config: &ShellConfig) -> ShellResult<Context> {
    let mut context = Context::create();
    context
        .set_ini_filename(config.ini_filename.clone())
        .map_err(|e| ShellError::backend(Stage::AttachGui, e))?;

    if config.keyboard_nav {
        let io = context.io_mut();
        let mut flags = io.config_flags();
        flags.insert(ConfigFlags::NAV_ENABLE_KEYBOARD);
        io.set_config_flags(flags);
    }
    context.style_mut().set_font_scale_dpi(scale);
    Ok(context)
}

/// A Dear ImGui context bound to the SDL3 platform backend and a renderer.
///
/// Teardown order: renderer, platform bindings, context.
pub struct ImguiLayer<R> {
    renderer: Option<R>,
    context: Context,
    content: UiContent,
    last_frame: Instant,
}

impl<R> ImguiLayer<R> {
    /// Wrap a context whose platform bindings are already initialized.
    /// From here on, dropping the layer shuts those bindings down.
    pub(crate) fn bound(context: Context, content: UiContent) -> Self {
        Self {
            renderer: None,
            context,
            content,
            last_frame: Instant::now(),
        }
    }

    pub(crate) fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub(crate) fn set_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    pub(crate) fn process_event(&mut self, event: &SDL_Event) {
        let _ = imgui_sdl3_backend::process_sys_event(event);
    }

    /// Build one frame of UI and hand the draw data to `submit`.
    pub(crate) fn frame<F>(&mut self, frame: &mut FrameContext<'_>, submit: F) -> ShellResult<()>
    where
        F: FnOnce(&mut R, &DrawData) -> ShellResult<()>,
    {
        let Self {
            renderer,
            context,
            content,
            last_frame,
        } = self;

        let now = Instant::now();
        context
            .io_mut()
            .set_delta_time((now - *last_frame).as_secs_f32());
        *last_frame = now;

        imgui_sdl3_backend::sdl3_new_frame(context);
        let ui = context.frame();
        content(ui, frame);
        let draw_data = context.render();

        match renderer.as_mut() {
            Some(renderer) => submit(renderer, draw_data),
            None => Ok(()),
        }
    }
}

impl<R> Drop for ImguiLayer<R> {
    fn drop(&mut self) {
        self.renderer = None;
        imgui_sdl3_backend::shutdown(&mut self.context);
        debug!("Dear ImGui SDL3 bindings shut down");
    }
}
