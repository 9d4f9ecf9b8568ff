//! SDL3 windowing subsystem.

use std::ffi::CStr;

use imgui_shell::{
    BackendKind, Platform, PlatformWindow, ShellConfig, ShellError, ShellEvent, ShellResult,
    Stage, WindowDesc, WindowId,
};
use sdl3::event::{Event, WindowEvent};
use sdl3::video::{GLProfile, Window, WindowPos};
use sdl3::{Sdl, VideoSubsystem};
use sdl3_sys::events::SDL_Event;
use tracing::{debug, warn};

/// Last error reported by SDL, empty if there is none.
pub(crate) fn sdl_error() -> String {
    let raw = unsafe { sdl3_sys::error::SDL_GetError() };
    if raw.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
}

/// SDL3 video subsystem plus the raw event stream.
#[derive(Default)]
pub struct SdlPlatform {
    // Dropped before `sdl`.
    video: Option<VideoSubsystem>,
    sdl: Option<Sdl>,
}

impl SdlPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// The video subsystem, once initialized.
    pub fn video(&self) -> Option<&VideoSubsystem> {
        self.video.as_ref()
    }
}

impl Platform for SdlPlatform {
    type Event = SDL_Event;
    type Window = SdlWindow;

    fn init(&mut self, _config: &ShellConfig) -> ShellResult<()> {
        let sdl = sdl3::init().map_err(|e| ShellError::backend(Stage::InitPlatform, e))?;
        let video = sdl
            .video()
            .map_err(|e| ShellError::backend(Stage::InitPlatform, e))?;
        self.sdl = Some(sdl);
        self.video = Some(video);
        Ok(())
    }

    fn display_content_scale(&self) -> f32 {
        let Some(video) = self.video.as_ref() else {
            return 0.0;
        };
        match video.get_primary_display() {
            Ok(display) => display.get_content_scale().unwrap_or(0.0),
            Err(e) => {
                warn!("{}", ShellError::backend(Stage::QueryScale, e));
                0.0
            }
        }
    }

    fn create_window(&mut self, desc: &WindowDesc) -> ShellResult<SdlWindow> {
        let video = self.video.as_ref().ok_or_else(|| {
            ShellError::backend(Stage::CreateWindow, "video subsystem is not initialized")
        })?;

        let mut builder = video.window(&desc.title, desc.width, desc.height);
        if desc.resizable {
            builder.resizable();
        }
        if desc.high_pixel_density {
            builder.high_pixel_density();
        }
        if desc.hidden {
            builder.hidden();
        }
        if desc.backend == BackendKind::Renderer {
            let gl_attr = video.gl_attr();
            gl_attr.set_context_version(3, 2);
            gl_attr.set_context_profile(GLProfile::Core);
            gl_attr.set_depth_size(0);
            builder.opengl();
        }

        let mut window = builder
            .build()
            .map_err(|e| ShellError::backend(Stage::CreateWindow, e))?;
        window.set_position(WindowPos::Centered, WindowPos::Centered);
        debug!("SDL window {} created", window.id());
        Ok(SdlWindow { window })
    }

    fn poll_event(&mut self) -> Option<SDL_Event> {
        dear_imgui_sdl3::sdl3_poll_event_ll()
    }

    fn classify(&self, event: &SDL_Event) -> ShellEvent {
        match Event::from_ll(*event) {
            Event::Quit { .. } => ShellEvent::Quit,
            Event::Window {
                window_id,
                win_event,
                ..
            } => match win_event {
                WindowEvent::CloseRequested => ShellEvent::CloseRequested(window_id),
                WindowEvent::Minimized => ShellEvent::Minimized(window_id),
                WindowEvent::Restored | WindowEvent::Maximized => ShellEvent::Restored(window_id),
                _ => ShellEvent::Other,
            },
            _ => ShellEvent::Other,
        }
    }

    fn shutdown(&mut self) {
        // Dropping the last context handle quits SDL.
        self.video = None;
        self.sdl = None;
    }
}

/// The main SDL3 window.
pub struct SdlWindow {
    window: Window,
}

impl SdlWindow {
    pub fn raw(&self) -> &Window {
        &self.window
    }

    /// Backing framebuffer size in physical pixels.
    pub fn size_in_pixels(&self) -> (u32, u32) {
        self.window.size_in_pixels()
    }
}

impl PlatformWindow for SdlWindow {
    fn id(&self) -> WindowId {
        self.window.id()
    }

    fn show(&mut self) -> ShellResult<()> {
        let shown = unsafe { sdl3_sys::video::SDL_ShowWindow(self.window.raw()) };
        if !shown {
            return Err(ShellError::backend(Stage::ShowWindow, sdl_error()));
        }
        Ok(())
    }
}
