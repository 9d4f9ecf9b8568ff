//! Runtime selection between the three SDL3 render paths.

use imgui_shell::{
    BackendKind, FrameContext, RenderBackend, ShellConfig, ShellError, ShellResult, Stage,
};
use sdl3_sys::events::SDL_Event;

use crate::gpu::{WgpuBackend, WgpuLayer};
use crate::gui::UiContent;
use crate::platform::{SdlPlatform, SdlWindow};
use crate::renderer::{GlowBackend, GlowLayer};
use crate::surface::BlitBackend;

/// GUI bindings attached to an [`SdlBackend`].
pub enum SdlGui {
    /// The surface path draws no GUI.
    None,
    Glow(GlowLayer),
    Wgpu(WgpuLayer),
}

/// The render path chosen by [`ShellConfig::backend`].
pub enum SdlBackend {
    Surface(BlitBackend),
    Glow(GlowBackend),
    Wgpu(WgpuBackend),
}

impl SdlBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            SdlBackend::Surface(_) => BackendKind::Surface,
            SdlBackend::Glow(_) => BackendKind::Renderer,
            SdlBackend::Wgpu(_) => BackendKind::Gpu,
        }
    }
}

fn uninitialized(stage: Stage) -> ShellError {
    ShellError::backend(stage, "video subsystem is not initialized")
}

impl RenderBackend<SdlPlatform> for SdlBackend {
    type Gui = SdlGui;
    type Content = UiContent;

    fn create(
        platform: &mut SdlPlatform,
        window: &mut SdlWindow,
        config: &ShellConfig,
    ) -> ShellResult<Self> {
        match config.backend {
            BackendKind::Surface => BlitBackend::create(window, config).map(SdlBackend::Surface),
            BackendKind::Renderer => {
                let video = platform
                    .video()
                    .ok_or_else(|| uninitialized(Stage::CreateRenderer))?;
                GlowBackend::create(video, window, config).map(SdlBackend::Glow)
            }
            BackendKind::Gpu => WgpuBackend::create(window, config).map(SdlBackend::Wgpu),
        }
    }

    fn set_vsync(&mut self, platform: &SdlPlatform, enabled: bool) -> ShellResult<()> {
        match self {
            SdlBackend::Surface(backend) => backend.set_vsync(enabled),
            SdlBackend::Glow(backend) => {
                let video = platform
                    .video()
                    .ok_or_else(|| uninitialized(Stage::EnableVsync))?;
                backend.set_vsync(video, enabled)
            }
            SdlBackend::Wgpu(backend) => backend.set_vsync(enabled),
        }
    }

    fn attach_gui(
        &mut self,
        window: &SdlWindow,
        scale: f32,
        config: &ShellConfig,
        content: UiContent,
    ) -> ShellResult<SdlGui> {
        match self {
            SdlBackend::Surface(_) => Ok(SdlGui::None),
            SdlBackend::Glow(backend) => backend
                .attach_gui(window, scale, config, content)
                .map(SdlGui::Glow),
            SdlBackend::Wgpu(backend) => backend
                .attach_gui(window, scale, config, content)
                .map(SdlGui::Wgpu),
        }
    }

    fn load_resources(&mut self, _gui: &mut SdlGui) -> ShellResult<()> {
        match self {
            SdlBackend::Surface(backend) => backend.load_resources(),
            SdlBackend::Glow(_) | SdlBackend::Wgpu(_) => Ok(()),
        }
    }

    fn process_event(&mut self, gui: &mut SdlGui, event: &SDL_Event) {
        match gui {
            SdlGui::None => {}
            SdlGui::Glow(layer) => layer.process_event(event),
            SdlGui::Wgpu(layer) => layer.process_event(event),
        }
    }

    fn render_frame(
        &mut self,
        gui: &mut SdlGui,
        window: &mut SdlWindow,
        frame: &mut FrameContext<'_>,
    ) -> ShellResult<()> {
        match (self, gui) {
            (SdlBackend::Surface(backend), _) => backend.render_frame(window, frame),
            (SdlBackend::Glow(backend), SdlGui::Glow(layer)) => {
                backend.render_frame(layer, window, frame)
            }
            (SdlBackend::Wgpu(backend), SdlGui::Wgpu(layer)) => {
                backend.render_frame(layer, window, frame)
            }
            (backend, _) => Err(ShellError::backend(
                Stage::RenderFrame,
                format!("GUI bindings do not match the {:?} backend", backend.kind()),
            )),
        }
    }
}
