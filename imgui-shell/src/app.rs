//! The application lifecycle controller.

use std::thread;

use tracing::{debug, error, info, warn};

use crate::config::{ShellConfig, effective_scale};
use crate::error::{ShellError, ShellResult, Stage};
use crate::platform::{FrameContext, Platform, PlatformWindow, RenderBackend, ShellEvent};
use crate::selection::{self, FileSelection, LoadedFile};
use crate::status::{AppStatus, LifecycleState};

/// Owns the window, the render backend and the GUI bindings of one session.
///
/// Construction never fails outright: check [`Application::status`] before
/// calling [`Application::run`], and again afterwards.
pub struct Application<P, B>
where
    P: Platform,
    B: RenderBackend<P>,
{
    status: AppStatus,
    state: LifecycleState,
    config: ShellConfig,
    scale: f32,
    minimized: bool,
    iterations: u64,
    frames: u64,
    selection: Option<FileSelection>,
    loaded: Option<LoadedFile>,
    // Released in this order, the reverse of acquisition.
    gui: Option<B::Gui>,
    backend: Option<B>,
    window: Option<P::Window>,
    platform: P,
    torn_down: bool,
}

impl<P, B> Application<P, B>
where
    P: Platform,
    B: RenderBackend<P>,
{
    /// Run every acquisition step, stopping at the first failure.
    pub fn new(platform: P, config: ShellConfig, content: B::Content) -> Self {
        let mut app = Self {
            status: AppStatus::Success,
            state: LifecycleState::Constructing,
            config,
            scale: 1.0,
            minimized: false,
            iterations: 0,
            frames: 0,
            selection: None,
            loaded: None,
            gui: None,
            backend: None,
            window: None,
            platform,
            torn_down: false,
        };
        match app.acquire(content) {
            Ok(()) => {
                app.state = LifecycleState::Ready;
                info!(
                    "Application ready: {:?} backend, scale {}",
                    app.config.backend, app.scale
                );
            }
            Err(e) => app.fail(e),
        }
        app
    }

    fn acquire(&mut self, content: B::Content) -> ShellResult<()> {
        self.platform.init(&self.config)?;

        self.scale = effective_scale(self.platform.display_content_scale());

        let desc = self.config.window_desc(self.scale);
        debug!("Creating {}x{} window", desc.width, desc.height);
        let window = self.window.insert(self.platform.create_window(&desc)?);

        let backend = self
            .backend
            .insert(B::create(&mut self.platform, window, &self.config)?);

        if let Err(e) = backend.set_vsync(&self.platform, self.config.vsync) {
            warn!("{e}");
        }

        let gui = backend.attach_gui(window, self.scale, &self.config, content)?;
        self.gui = Some(gui);
        Ok(())
    }

    /// Attach the queue a file dialog delivers into. One pending entry is
    /// read per rendered frame.
    pub fn with_file_selection(mut self, selection: FileSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Effective display content scale used for sizing.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Physical window size requested from the platform.
    pub fn window_size(&self) -> (u32, u32) {
        let desc = self.config.window_desc(self.scale);
        (desc.width, desc.height)
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Loop iterations executed by [`Application::run`], rendered or not.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// The most recently read selected file.
    pub fn loaded_file(&self) -> Option<&LoadedFile> {
        self.loaded.as_ref()
    }

    /// Run until the user quits or a runtime failure occurs.
    ///
    /// Must only be called when [`Application::state`] is
    /// [`LifecycleState::Ready`]; otherwise this logs the violation and
    /// returns the current status without doing anything.
    pub fn run(&mut self) -> AppStatus {
        if self.state != LifecycleState::Ready {
            warn!(
                "{}",
                ShellError::NotReady {
                    state: self.state
                }
            );
            return self.status;
        }

        self.state = LifecycleState::Running;
        match self.run_loop() {
            Ok(()) => {
                self.state = LifecycleState::Terminated;
                info!(
                    "Main loop finished after {} iterations ({} frames)",
                    self.iterations, self.frames
                );
            }
            Err(e) => self.fail(e),
        }
        self.status
    }

    fn run_loop(&mut self) -> ShellResult<()> {
        let Self {
            config,
            scale,
            minimized,
            iterations,
            frames,
            selection,
            loaded,
            gui,
            backend,
            window,
            platform,
            ..
        } = self;
        let (Some(gui), Some(backend), Some(window)) =
            (gui.as_mut(), backend.as_mut(), window.as_mut())
        else {
            return Err(ShellError::NotReady {
                state: LifecycleState::Ready,
            });
        };

        backend.load_resources(gui)?;
        window.show()?;

        let window_id = window.id();
        let mut quit = false;
        while !quit {
            *iterations += 1;

            while let Some(event) = platform.poll_event() {
                backend.process_event(gui, &event);
                match platform.classify(&event) {
                    ShellEvent::Quit => quit = true,
                    ShellEvent::CloseRequested(id) if id == window_id => quit = true,
                    ShellEvent::Minimized(id) if id == window_id => *minimized = true,
                    ShellEvent::Restored(id) if id == window_id => *minimized = false,
                    _ => {}
                }
            }

            if *minimized {
                if !config.minimized_poll_interval.is_zero() {
                    thread::sleep(config.minimized_poll_interval);
                }
                continue;
            }

            if let Some(sel) = selection.as_ref() {
                if let Some(file) = selection::consume_one(sel) {
                    *loaded = Some(file);
                }
            }

            let mut frame = FrameContext {
                frame_index: *frames,
                scale: *scale,
                selection: selection.as_ref(),
                loaded: loaded.as_ref(),
            };
            backend.render_frame(gui, window, &mut frame)?;
            *frames += 1;
        }
        Ok(())
    }

    fn fail(&mut self, e: ShellError) {
        error!("{e}");
        self.status.escalate(e.failure_status());
        self.state = LifecycleState::Failed;
    }

    /// Release everything in reverse acquisition order and shut the
    /// platform down. Safe to call at any point; later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if self.gui.take().is_some() {
            debug!("GUI bindings released");
        }
        if self.backend.take().is_some() {
            debug!("Render backend released");
        }
        if self.window.take().is_some() {
            debug!("Window destroyed");
        }
        self.platform.shutdown();

        if self.state == LifecycleState::Ready {
            self.state = LifecycleState::Terminated;
        }
        info!("Finished cleaning up application.");
    }
}

impl<P, B> Drop for Application<P, B>
where
    P: Platform,
    B: RenderBackend<P>,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
