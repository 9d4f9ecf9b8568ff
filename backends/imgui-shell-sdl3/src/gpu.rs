//! GPU path: a `wgpu` surface on the SDL3 window, drawn with `dear-imgui-wgpu`.

use dear_imgui_sdl3 as imgui_sdl3_backend;
use dear_imgui_wgpu::{WgpuInitInfo, WgpuRenderer};
use imgui_shell::{FrameContext, ShellConfig, ShellError, ShellResult, Stage};
use pollster::block_on;
use tracing::{debug, trace};
use wgpu::SurfaceError;

use crate::gui::{ImguiLayer, UiContent, create_context};
use crate::platform::SdlWindow;

pub type WgpuLayer = ImguiLayer<WgpuRenderer>;

fn setup_error(e: impl std::fmt::Display) -> ShellError {
    ShellError::backend(Stage::CreateRenderer, e)
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    let preferred_srgb = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    preferred_srgb
        .iter()
        .copied()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())
}

pub struct WgpuBackend {
    clear_color: wgpu::Color,
    present_modes: Vec<wgpu::PresentMode>,
    surface_config: wgpu::SurfaceConfiguration,
    queue: wgpu::Queue,
    device: wgpu::Device,
    surface: wgpu::Surface<'static>,
    // Kept alive for the surface.
    _instance: wgpu::Instance,
}

impl WgpuBackend {
    pub(crate) fn create(window: &SdlWindow, config: &ShellConfig) -> ShellResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        // SAFETY: the window outlives this backend; the controller drops the
        // backend before the window.
        let surface = unsafe {
            let target =
                wgpu::SurfaceTargetUnsafe::from_window(window.raw()).map_err(setup_error)?;
            instance.create_surface_unsafe(target).map_err(setup_error)?
        };

        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(setup_error)?;
        debug!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
            .map_err(setup_error)?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats)
            .ok_or_else(|| setup_error("surface reports no texture formats"))?;

        let (width, height) = window.size_in_pixels();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let [r, g, b, a] = config.clear_color.map(f64::from);
        Ok(Self {
            clear_color: wgpu::Color { r, g, b, a },
            present_modes: caps.present_modes,
            surface_config,
            queue,
            device,
            surface,
            _instance: instance,
        })
    }

    pub(crate) fn set_vsync(&mut self, enabled: bool) -> ShellResult<()> {
        let mode = present_mode(enabled);
        // The Auto* modes always resolve to something supported.
        if mode == wgpu::PresentMode::Fifo && !self.present_modes.contains(&mode) {
            return Err(ShellError::backend(
                Stage::EnableVsync,
                format!("present mode {mode:?} is not supported"),
            ));
        }
        self.surface_config.present_mode = mode;
        self.surface.configure(&self.device, &self.surface_config);
        Ok(())
    }

    pub(crate) fn attach_gui(
        &mut self,
        window: &SdlWindow,
        scale: f32,
        config: &ShellConfig,
        content: UiContent,
    ) -> ShellResult<WgpuLayer> {
        let mut context = create_context(scale, config)?;
        imgui_sdl3_backend::init_for_other(&mut context, window.raw())
            .map_err(|e| ShellError::backend(Stage::AttachGui, e))?;

        let mut layer = ImguiLayer::bound(context, content);
        let init_info = WgpuInitInfo::new(
            self.device.clone(),
            self.queue.clone(),
            self.surface_config.format,
        );
        let renderer = WgpuRenderer::new(init_info, layer.context_mut())
            .map_err(|e| ShellError::backend(Stage::AttachGui, e))?;
        layer.set_renderer(renderer);
        Ok(layer)
    }

    fn resize_to(&mut self, (width, height): (u32, u32)) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) != (self.surface_config.width, self.surface_config.height) {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    pub(crate) fn render_frame(
        &mut self,
        layer: &mut WgpuLayer,
        window: &mut SdlWindow,
        frame: &mut FrameContext<'_>,
    ) -> ShellResult<()> {
        self.resize_to(window.size_in_pixels());

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                trace!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(ShellError::backend(Stage::RenderFrame, e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("imgui_shell_encoder"),
            });

        let clear_color = self.clear_color;
        let (fb_width, fb_height) = (self.surface_config.width, self.surface_config.height);
        layer.frame(frame, |renderer, draw_data| {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("imgui_shell_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            renderer
                .new_frame()
                .map_err(|e| ShellError::backend(Stage::RenderFrame, e))?;
            renderer
                .render_draw_data_with_fb_size(draw_data, &mut rpass, fb_width, fb_height)
                .map_err(|e| ShellError::backend(Stage::RenderFrame, e))
        })?;

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn srgb_formats_are_preferred() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
    }

    #[test]
    fn first_format_is_the_fallback() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Rgba8Unorm];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Rgba16Float));
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn vsync_selects_fifo() {
        assert_eq!(present_mode(true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }
}
