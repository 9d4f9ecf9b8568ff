//! OpenGL path: GL 3.2 core context on the window, drawn with `dear-imgui-glow`.

use std::ffi::c_void;

use dear_imgui_glow::GlowRenderer;
use dear_imgui_sdl3 as imgui_sdl3_backend;
use glow::HasContext;
use imgui_shell::{FrameContext, ShellConfig, ShellError, ShellResult, Stage};
use sdl3::VideoSubsystem;
use sdl3::video::{GLContext, SwapInterval};

use crate::gui::{ImguiLayer, UiContent, create_context};
use crate::platform::SdlWindow;

pub type GlowLayer = ImguiLayer<GlowRenderer>;

/// # Safety
///
/// Call this only after there is a current OpenGL context for the thread.
unsafe fn load_gl(video: &VideoSubsystem) -> glow::Context {
    unsafe {
        glow::Context::from_loader_function(|name| {
            video
                .gl_get_proc_address(name)
                .map(|f| f as *const c_void)
                .unwrap_or(std::ptr::null())
        })
    }
}

pub struct GlowBackend {
    clear_color: [f32; 4],
    // Handed to the renderer by `attach_gui`.
    gl: Option<glow::Context>,
    gl_context: GLContext,
}

impl GlowBackend {
    pub(crate) fn create(
        video: &VideoSubsystem,
        window: &SdlWindow,
        config: &ShellConfig,
    ) -> ShellResult<Self> {
        let gl_context = window
            .raw()
            .gl_create_context()
            .map_err(|e| ShellError::backend(Stage::CreateRenderer, e))?;
        window
            .raw()
            .gl_make_current(&gl_context)
            .map_err(|e| ShellError::backend(Stage::CreateRenderer, e))?;
        let gl = unsafe { load_gl(video) };
        Ok(Self {
            clear_color: config.clear_color,
            gl: Some(gl),
            gl_context,
        })
    }

    pub(crate) fn set_vsync(&mut self, video: &VideoSubsystem, enabled: bool) -> ShellResult<()> {
        let interval = if enabled {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        video
            .gl_set_swap_interval(interval)
            .map_err(|e| ShellError::backend(Stage::EnableVsync, e))
    }

    pub(crate) fn attach_gui(
        &mut self,
        window: &SdlWindow,
        scale: f32,
        config: &ShellConfig,
        content: UiContent,
    ) -> ShellResult<GlowLayer> {
        let gl = self.gl.take().ok_or_else(|| {
            ShellError::backend(Stage::AttachGui, "GUI is already attached to this context")
        })?;

        let mut context = create_context(scale, config)?;
        imgui_sdl3_backend::init_platform_for_opengl(&mut context, window.raw(), &self.gl_context)
            .map_err(|e| ShellError::backend(Stage::AttachGui, e))?;

        let mut layer = ImguiLayer::bound(context, content);
        let renderer = GlowRenderer::new(gl, layer.context_mut())
            .map_err(|e| ShellError::backend(Stage::AttachGui, e))?;
        layer.set_renderer(renderer);
        Ok(layer)
    }

    pub(crate) fn render_frame(
        &mut self,
        layer: &mut GlowLayer,
        window: &mut SdlWindow,
        frame: &mut FrameContext<'_>,
    ) -> ShellResult<()> {
        let (width, height) = window.size_in_pixels();
        let [r, g, b, a] = self.clear_color;

        layer.frame(frame, |renderer, draw_data| {
            if let Some(gl) = renderer.gl_context() {
                unsafe {
                    gl.viewport(0, 0, width as i32, height as i32);
                    gl.clear_color(r, g, b, a);
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }
            }
            renderer
                .render(draw_data)
                .map_err(|e| ShellError::backend(Stage::RenderFrame, e))
        })?;

        window.raw().gl_swap_window();
        Ok(())
    }
}
