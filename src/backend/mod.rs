//! Backend selection — window and headless run modes.

pub mod headless;
pub mod window;

use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::LoopHandle;
use tracing::warn;

use crate::engine::{Engine, EngineConfig, Keystroke};
use crate::feedback::FeedbackPlayer;

/// Backend type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Window,
    Headless,
}

/// Which landmark source feeds the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    /// Mouse-driven hand simulator.
    Sim,
    /// Newline-delimited JSON frames on stdin.
    Stdin,
}

/// Options shared by both backends.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub tracker: TrackerKind,
    /// Text the script tracker types in headless mode.
    pub script: String,
    /// Exit after this many seconds.
    pub exit_after: Option<u64>,
    pub mute: bool,
}

/// Parse a "WxH" resolution string. Returns (width, height) or None.
pub fn parse_resolution(s: &str) -> Option<(f32, f32)> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return None;
    }
    let w = parts[0].parse::<u32>().ok()?;
    let h = parts[1].parse::<u32>().ok()?;
    if w > 0 && h > 0 {
        Some((w as f32, h as f32))
    } else {
        None
    }
}

/// State driven by the calloop event loop: the engine plus the
/// collaborators an accepted keystroke touches.
pub struct RuntimeState {
    pub engine: Engine,
    pub feedback: FeedbackPlayer,
    pub running: bool,
    pub loop_handle: LoopHandle<'static, RuntimeState>,
}

impl RuntimeState {
    pub fn new(
        engine: Engine,
        feedback: FeedbackPlayer,
        loop_handle: LoopHandle<'static, RuntimeState>,
    ) -> Self {
        Self {
            engine,
            feedback,
            running: true,
            loop_handle,
        }
    }

    /// Everything that follows an accepted keystroke: sound feedback
    /// and the deferred timer that reopens typing.
    pub fn handle_keystroke(&mut self, keystroke: &Keystroke) {
        self.feedback.play(keystroke.sound);
        self.schedule_cooldown_clear(keystroke.epoch, keystroke.cooldown);
    }

    /// Arm the one-shot timer that closes cooldown window `epoch`.
    /// The timer carries the epoch, so firing late is harmless.
    pub fn schedule_cooldown_clear(&mut self, epoch: u64, after: Duration) {
        let result = self.loop_handle.insert_source(
            Timer::from_duration(after),
            move |_, _, state: &mut RuntimeState| {
                state.engine.clear_cooldown(epoch);
                TimeoutAction::Drop
            },
        );
        if let Err(err) = result {
            warn!("failed to insert cooldown timer: {:?}", err);
            // Better an early unblock than a window stuck shut
            self.engine.clear_cooldown(epoch);
        }
    }
}

/// Run the interaction loop with the selected backend.
pub fn run(backend: BackendType, options: RunOptions, config: EngineConfig) -> anyhow::Result<()> {
    match backend {
        BackendType::Window => window::run(options, config),
        BackendType::Headless => headless::run(options, config),
    }
}

// ── Tests ──────────────────────────────────────────────────
