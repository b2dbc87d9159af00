//! Window backend — interactive typing in a minifb window.
//!
//! Runs the engine against a live tracker and paints every frame into
//! a software framebuffer.  With the sim tracker the mouse stands in
//! for the hand: move to point, hold the left button to pinch.  With
//! the stdin tracker an external landmark process drives the engine
//! and the window just shows the session.

use std::time::{Duration, Instant};

use anyhow::Context;
use calloop::EventLoop;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{info, warn};

use super::{RunOptions, RuntimeState, TrackerKind};
use crate::engine::{Engine, EngineConfig, RenderInstruction};
use crate::feedback::FeedbackPlayer;
use crate::render::Painter;
use crate::tracker::{HandTracker, PointerSim, StdinTracker, TrackerPoll};

enum WindowSource {
    Sim(PointerSim),
    Stdin(StdinTracker),
}

pub fn run(options: RunOptions, config: EngineConfig) -> anyhow::Result<()> {
    let viewport = config.viewport;
    let mut painter = Painter::new(viewport);

    let mut window = Window::new(
        "airtype — pinch to type",
        painter.width(),
        painter.height(),
        WindowOptions::default(),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {}", e))?;
    window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

    let mut event_loop = EventLoop::<RuntimeState>::try_new()?;
    let engine = Engine::new(config);
    let mut state = RuntimeState::new(
        engine,
        FeedbackPlayer::new(options.mute),
        event_loop.handle(),
    );

    let mut source = match options.tracker {
        TrackerKind::Sim => {
            info!("sim tracker: mouse moves the hand, left button pinches");
            WindowSource::Sim(PointerSim::new(viewport))
        }
        TrackerKind::Stdin => WindowSource::Stdin(
            StdinTracker::spawn().context("failed to start the stdin tracker")?,
        ),
    };

    let started = Instant::now();
    let exit_duration = options.exit_after.map(Duration::from_secs);
    let mut last_render = RenderInstruction {
        active_key: None,
        text: String::new(),
        hand: None,
    };
    let mut source_closed = false;

    info!(
        "window backend ready ({}x{})",
        painter.width(),
        painter.height()
    );

    while state.running && window.is_open() && !window.is_key_down(Key::Escape) {
        if let Some(limit) = exit_duration {
            if started.elapsed() >= limit {
                info!("exit timer fired after {}s", limit.as_secs());
                break;
            }
        }

        let poll = match &mut source {
            WindowSource::Sim(sim) => {
                match window.get_mouse_pos(MouseMode::Clamp) {
                    Some((mx, my)) => {
                        sim.set_pointer(mx, my, window.get_mouse_down(MouseButton::Left))
                    }
                    None => sim.clear_pointer(),
                }
                sim.next_frame()
            }
            WindowSource::Stdin(tracker) => tracker.next_frame(),
        };

        match poll {
            TrackerPoll::Frame(frame) => {
                let out = state.engine.process_frame(&frame, Instant::now());
                if let Some(keystroke) = out.keystroke {
                    state.handle_keystroke(&keystroke);
                }
                last_render = out.render;
            }
            // Nothing new; keep showing the previous state
            TrackerPoll::Pending => {}
            TrackerPoll::Closed => {
                if !source_closed {
                    info!("tracker closed; window stays open, ESC quits");
                    source_closed = true;
                }
            }
        }

        let status = format!(
            "{} keys typed | esc quits",
            state.engine.stats().keystrokes
        );
        painter.draw_scene(state.engine.key_slots(), &last_render, &status);
        if let Err(err) = window.update_with_buffer(painter.buffer(), painter.width(), painter.height())
        {
            warn!("frame submission failed: {}", err);
        }

        // Fire any due cooldown timers without blocking the paint loop
        event_loop.dispatch(Some(Duration::ZERO), &mut state)?;
    }

    match &mut source {
        WindowSource::Sim(sim) => sim.stop(),
        WindowSource::Stdin(tracker) => tracker.stop(),
    }

    if !state.engine.text().is_empty() {
        info!("typed text: {:?}", state.engine.text());
    }
    info!(
        "window backend shutting down ({})",
        state.engine.stats().summary()
    );
    Ok(())
}
