//! Runner configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Rendering path used to present frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// Raw bitmap blitting onto the window surface, no GUI.
    Surface,
    /// Immediate renderer (clear, draw, present) with GUI.
    #[default]
    Renderer,
    /// GPU device with command buffers and render passes, with GUI.
    Gpu,
}

impl BackendKind {
    /// Whether this path attaches Dear ImGui bindings.
    pub fn has_gui(self) -> bool {
        !matches!(self, BackendKind::Surface)
    }
}

/// Basic runner configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub window_title: String,
    /// Logical window size; multiplied by the display content scale.
    pub window_size: (u32, u32),
    pub backend: BackendKind,
    /// Best effort: a failure to enable vsync is only logged.
    pub vsync: bool,
    pub clear_color: [f32; 4],
    /// Enable Dear ImGui keyboard navigation.
    pub keyboard_nav: bool,
    /// Dear ImGui settings file. `None` disables persistence.
    pub ini_filename: Option<PathBuf>,
    /// Bitmap loaded by the surface path before the loop starts.
    pub asset_path: PathBuf,
    /// How long to sleep between polls while the window is minimized.
    pub minimized_poll_interval: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_title: "I am a window :3".to_owned(),
            window_size: (960, 540),
            backend: BackendKind::default(),
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            keyboard_nav: true,
            ini_filename: None,
            asset_path: PathBuf::from("assets/sample.bmp"),
            minimized_poll_interval: Duration::from_millis(10),
        }
    }
}

impl ShellConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            window_title: title.into(),
            window_size: (width, height),
            ..Default::default()
        }
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_asset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.asset_path = path.into();
        self
    }

    pub fn with_ini_filename(mut self, path: Option<PathBuf>) -> Self {
        self.ini_filename = path;
        self
    }

    pub fn with_minimized_poll_interval(mut self, interval: Duration) -> Self {
        self.minimized_poll_interval = interval;
        self
    }

    /// Window description for a display with the given content scale.
    pub fn window_desc(&self, scale: f32) -> WindowDesc {
        let scale = effective_scale(scale);
        let (width, height) = self.window_size;
        WindowDesc {
            title: self.window_title.clone(),
            width: (width as f32 * scale) as u32,
            height: (height as f32 * scale) as u32,
            hidden: true,
            resizable: true,
            high_pixel_density: true,
            backend: self.backend,
        }
    }
}

/// Everything a platform needs to create the main window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub title: String,
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Created hidden and shown once the GUI bindings are attached.
    pub hidden: bool,
    pub resizable: bool,
    pub high_pixel_density: bool,
    /// Lets the platform request e.g. an OpenGL-capable window.
    pub backend: BackendKind,
}

/// Content scale used for sizing. Zero means "unknown" and maps to `1.0`.
pub fn effective_scale(reported: f32) -> f32 {
    if reported.is_finite() && reported > 0.0 {
        reported
    } else {
        1.0
    }
}
