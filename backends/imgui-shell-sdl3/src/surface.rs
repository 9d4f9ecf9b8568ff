//! Window-surface path: blit a bitmap onto the window every frame.

use std::ffi::CString;
use std::path::Path;
use std::ptr::{self, NonNull};

use imgui_shell::{FrameContext, ShellConfig, ShellError, ShellResult, Stage};
use sdl3_sys::surface::{
    SDL_BlitSurface, SDL_DestroySurface, SDL_FillSurfaceRect, SDL_LoadBMP, SDL_MapSurfaceRGBA,
    SDL_Surface,
};
use sdl3_sys::video::{
    SDL_GetWindowSurface, SDL_SetWindowSurfaceVSync, SDL_UpdateWindowSurface, SDL_Window,
};
use tracing::info;

use crate::platform::{SdlWindow, sdl_error};

/// A surface this crate allocated and must free.
struct OwnedSurface(NonNull<SDL_Surface>);

impl OwnedSurface {
    fn load_bmp(path: &Path) -> ShellResult<Self> {
        let c_path = CString::new(path.to_string_lossy().as_bytes()).map_err(|_| {
            ShellError::backend(
                Stage::LoadResources,
                format!("invalid asset path {}", path.display()),
            )
        })?;
        let raw = unsafe { SDL_LoadBMP(c_path.as_ptr()) };
        NonNull::new(raw).map(Self).ok_or_else(|| {
            ShellError::backend(
                Stage::LoadResources,
                format!("{} ({})", sdl_error(), path.display()),
            )
        })
    }

    fn as_ptr(&self) -> *mut SDL_Surface {
        self.0.as_ptr()
    }
}

impl Drop for OwnedSurface {
    fn drop(&mut self) {
        unsafe { SDL_DestroySurface(self.0.as_ptr()) };
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Software path: clear, blit, update. No GUI.
pub struct BlitBackend {
    // Valid until the backend is dropped; the controller drops the backend
    // before the window.
    window: NonNull<SDL_Window>,
    asset_path: std::path::PathBuf,
    clear: [u8; 4],
    bitmap: Option<OwnedSurface>,
}

impl BlitBackend {
    pub(crate) fn create(window: &SdlWindow, config: &ShellConfig) -> ShellResult<Self> {
        let raw = NonNull::new(window.raw().raw())
            .ok_or_else(|| ShellError::backend(Stage::CreateRenderer, "window has no handle"))?;
        // The window owns this surface; it is only checked here.
        let surface = unsafe { SDL_GetWindowSurface(raw.as_ptr()) };
        if surface.is_null() {
            return Err(ShellError::backend(Stage::CreateRenderer, sdl_error()));
        }
        Ok(Self {
            window: raw,
            asset_path: config.asset_path.clone(),
            clear: config.clear_color.map(to_channel),
            bitmap: None,
        })
    }

    pub(crate) fn set_vsync(&mut self, enabled: bool) -> ShellResult<()> {
        let interval = if enabled { 1 } else { 0 };
        if unsafe { SDL_SetWindowSurfaceVSync(self.window.as_ptr(), interval) } {
            Ok(())
        } else {
            Err(ShellError::backend(Stage::EnableVsync, sdl_error()))
        }
    }

    pub(crate) fn load_resources(&mut self) -> ShellResult<()> {
        let bitmap = OwnedSurface::load_bmp(&self.asset_path)?;
        info!("Loaded bitmap {}", self.asset_path.display());
        self.bitmap = Some(bitmap);
        Ok(())
    }

    pub(crate) fn render_frame(
        &mut self,
        window: &mut SdlWindow,
        _frame: &mut FrameContext<'_>,
    ) -> ShellResult<()> {
        let sdl_window = window.raw().raw();
        // Re-fetched every frame; a resize invalidates the previous one.
        let target = unsafe { SDL_GetWindowSurface(sdl_window) };
        if target.is_null() {
            return Err(ShellError::backend(Stage::RenderFrame, sdl_error()));
        }

        let [r, g, b, a] = self.clear;
        let ok = unsafe {
            let color = SDL_MapSurfaceRGBA(target, r, g, b, a);
            SDL_FillSurfaceRect(target, ptr::null(), color)
        };
        if !ok {
            return Err(ShellError::backend(Stage::RenderFrame, sdl_error()));
        }

        if let Some(bitmap) = self.bitmap.as_ref() {
            let ok =
                unsafe { SDL_BlitSurface(bitmap.as_ptr(), ptr::null(), target, ptr::null()) };
            if !ok {
                return Err(ShellError::backend(Stage::RenderFrame, sdl_error()));
            }
        }

        if !unsafe { SDL_UpdateWindowSurface(sdl_window) } {
            return Err(ShellError::backend(Stage::RenderFrame, sdl_error()));
        }
        Ok(())
    }
}
