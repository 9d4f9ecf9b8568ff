//! Scripted in-memory platform and backend that journal every call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use imgui_shell::{
    FrameContext, Platform, PlatformWindow, RenderBackend, ShellConfig, ShellError, ShellEvent,
    ShellResult, Stage, WindowDesc, WindowId,
};

pub const MAIN_WINDOW: WindowId = 7;
pub const OTHER_WINDOW: WindowId = 8;

pub type Journal = Rc<RefCell<Vec<String>>>;

/// Step that should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    Init,
    CreateWindow,
    CreateRenderer,
    Vsync,
    AttachGui,
    LoadResources,
    ShowWindow,
    RenderFrame(u64),
}

pub struct ScriptedPlatform {
    pub journal: Journal,
    pub scale: f32,
    pub fail: Option<Fail>,
    batches: VecDeque<Vec<ShellEvent>>,
    pending: VecDeque<ShellEvent>,
}

impl ScriptedPlatform {
    /// One batch of events per loop iteration. Once the script runs out,
    /// a quit event is delivered so every test terminates.
    pub fn new(script: Vec<Vec<ShellEvent>>) -> Self {
        let mut batches: VecDeque<_> = script.into();
        let pending = batches.pop_front().unwrap_or_default().into();
        Self {
            journal: Journal::default(),
            scale: 1.0,
            fail: None,
            batches,
            pending,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn failing_at(mut self, fail: Fail) -> Self {
        self.fail = Some(fail);
        self
    }

    fn record(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }

    fn fails(&self, step: Fail) -> bool {
        self.fail == Some(step)
    }
}

impl Platform for ScriptedPlatform {
    type Event = ShellEvent;
    type Window = ScriptedWindow;

    fn init(&mut self, _config: &ShellConfig) -> ShellResult<()> {
        self.record("init");
        if self.fails(Fail::Init) {
            return Err(ShellError::backend(Stage::InitPlatform, "no video device"));
        }
        Ok(())
    }

    fn display_content_scale(&self) -> f32 {
        self.record("query scale");
        self.scale
    }

    fn create_window(&mut self, desc: &WindowDesc) -> ShellResult<ScriptedWindow> {
        self.record(format!("create window {}x{}", desc.width, desc.height));
        if self.fails(Fail::CreateWindow) {
            return Err(ShellError::backend(Stage::CreateWindow, ""));
        }
        Ok(ScriptedWindow {
            id: MAIN_WINDOW,
            journal: self.journal.clone(),
            fail_show: self.fails(Fail::ShowWindow),
        })
    }

    fn poll_event(&mut self) -> Option<ShellEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        // This iteration's drain is over; stage the next batch.
        self.pending = self
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![ShellEvent::Quit])
            .into();
        None
    }

    fn classify(&self, event: &ShellEvent) -> ShellEvent {
        *event
    }

    fn shutdown(&mut self) {
        self.record("shutdown");
    }
}

pub struct ScriptedWindow {
    id: WindowId,
    journal: Journal,
    fail_show: bool,
}

impl PlatformWindow for ScriptedWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn show(&mut self) -> ShellResult<()> {
        self.journal.borrow_mut().push("show window".into());
        if self.fail_show {
            return Err(ShellError::backend(Stage::ShowWindow, "window is gone"));
        }
        Ok(())
    }
}

impl Drop for ScriptedWindow {
    fn drop(&mut self) {
        self.journal.borrow_mut().push("destroy window".into());
    }
}

pub struct ScriptedBackend {
    journal: Journal,
    fail: Option<Fail>,
}

impl ScriptedBackend {
    fn record(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl Drop for ScriptedBackend {
    fn drop(&mut self) {
        self.record("destroy renderer");
    }
}

pub struct ScriptedGui {
    journal: Journal,
    pub label: &'static str,
}

impl Drop for ScriptedGui {
    fn drop(&mut self) {
        self.journal.borrow_mut().push("release gui".into());
    }
}

impl RenderBackend<ScriptedPlatform> for ScriptedBackend {
    type Gui = ScriptedGui;
    type Content = &'static str;

    fn create(
        platform: &mut ScriptedPlatform,
        _window: &mut ScriptedWindow,
        _config: &ShellConfig,
    ) -> ShellResult<Self> {
        platform.record("create renderer");
        if platform.fails(Fail::CreateRenderer) {
            return Err(ShellError::backend(
                Stage::CreateRenderer,
                "Couldn't find matching render driver",
            ));
        }
        Ok(Self {
            journal: platform.journal.clone(),
            fail: platform.fail,
        })
    }

    fn set_vsync(&mut self, _platform: &ScriptedPlatform, enabled: bool) -> ShellResult<()> {
        self.record(format!("vsync {}", if enabled { "on" } else { "off" }));
        if self.fail == Some(Fail::Vsync) {
            return Err(ShellError::backend(Stage::EnableVsync, "unsupported"));
        }
        Ok(())
    }

    fn attach_gui(
        &mut self,
        _window: &ScriptedWindow,
        scale: f32,
        _config: &ShellConfig,
        content: &'static str,
    ) -> ShellResult<ScriptedGui> {
        self.record(format!("attach gui x{scale}"));
        if self.fail == Some(Fail::AttachGui) {
            return Err(ShellError::backend(Stage::AttachGui, "backend init failed"));
        }
        Ok(ScriptedGui {
            journal: self.journal.clone(),
            label: content,
        })
    }

    fn load_resources(&mut self, _gui: &mut ScriptedGui) -> ShellResult<()> {
        self.record("load resources");
        if self.fail == Some(Fail::LoadResources) {
            return Err(ShellError::backend(
                Stage::LoadResources,
                "Couldn't open assets/sample.bmp",
            ));
        }
        Ok(())
    }

    fn process_event(&mut self, _gui: &mut ScriptedGui, event: &ShellEvent) {
        self.record(format!("gui event {event:?}"));
    }

    fn render_frame(
        &mut self,
        gui: &mut ScriptedGui,
        window: &mut ScriptedWindow,
        frame: &mut FrameContext<'_>,
    ) -> ShellResult<()> {
        let loaded = frame
            .loaded
            .map(|f| format!(" loaded {}", f.len))
            .unwrap_or_default();
        self.record(format!(
            "render {} {} window {}{loaded}",
            frame.frame_index,
            gui.label,
            window.id()
        ));
        if self.fail == Some(Fail::RenderFrame(frame.frame_index)) {
            return Err(ShellError::backend(Stage::RenderFrame, "device lost"));
        }
        Ok(())
    }
}

pub type ScriptedApp = imgui_shell::Application<ScriptedPlatform, ScriptedBackend>;

pub fn config() -> ShellConfig {
    ShellConfig::new(960, 540, "T").with_minimized_poll_interval(std::time::Duration::ZERO)
}

pub fn snapshot(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}
