//! Headless backend — scripted typing for CI and demos.
//!
//! No window, no tracker hardware: a script tracker replays a typing
//! sequence at camera rate through the same engine, cooldown timer and
//! feedback path the window backend uses, then reports the typed text.

use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use tracing::info;

use super::{RunOptions, RuntimeState};
use crate::engine::{Engine, EngineConfig};
use crate::feedback::FeedbackPlayer;
use crate::tracker::{HandTracker, ScriptTracker, TrackerPoll};

/// Headless pacing configuration.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Interval between script frames in milliseconds (camera rate).
    pub frame_interval_ms: u64,
    /// Poll interval for the outer loop (higher = less CPU).
    pub poll_interval_ms: u64,
    /// Seconds between status log lines.
    pub status_interval_secs: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 33,
            poll_interval_ms: 50,
            status_interval_secs: 10,
        }
    }
}

/// Run the scripted session and log the result.
pub fn run(options: RunOptions, engine_config: EngineConfig) -> anyhow::Result<()> {
    run_with(options, engine_config, HeadlessConfig::default()).map(|_| ())
}

/// Run the scripted session; returns the typed text.
pub fn run_with(
    options: RunOptions,
    engine_config: EngineConfig,
    config: HeadlessConfig,
) -> anyhow::Result<String> {
    let mut event_loop = EventLoop::<RuntimeState>::try_new()?;

    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    let mut tracker = ScriptTracker::typing(&options.script, &engine_config, frame_interval);
    info!(
        "headless run: typing {:?} over {} frames",
        options.script,
        tracker.len()
    );

    let engine = Engine::new(engine_config);
    let mut state = RuntimeState::new(
        engine,
        FeedbackPlayer::new(options.mute),
        event_loop.handle(),
    );

    // Frame pump: one script frame per tick until the script closes
    event_loop
        .handle()
        .insert_source(
            Timer::from_duration(frame_interval),
            move |_, _, state: &mut RuntimeState| match tracker.next_frame() {
                TrackerPoll::Frame(frame) => {
                    let out = state.engine.process_frame(&frame, Instant::now());
                    if let Some(keystroke) = out.keystroke {
                        state.handle_keystroke(&keystroke);
                    }
                    TimeoutAction::ToDuration(frame_interval)
                }
                TrackerPoll::Pending => TimeoutAction::ToDuration(frame_interval),
                TrackerPoll::Closed => {
                    state.running = false;
                    TimeoutAction::Drop
                }
            },
        )
        .map_err(|e| anyhow::anyhow!("failed to insert frame timer: {:?}", e))?;

    let started = Instant::now();
    let exit_duration = options.exit_after.map(Duration::from_secs);
    let mut last_status_log = Instant::now();
    let status_interval = Duration::from_secs(config.status_interval_secs);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    info!(
        "headless backend initialized (poll interval: {}ms), entering event loop",
        config.poll_interval_ms
    );

    while state.running {
        // Exit timer for CI
        if let Some(dur) = exit_duration {
            if started.elapsed() >= dur {
                info!("headless exit timer fired after {}s", dur.as_secs());
                state.running = false;
                break;
            }
        }

        // Periodic status logging
        if last_status_log.elapsed() >= status_interval {
            info!("headless status: {}", state.engine.stats().summary());
            last_status_log = Instant::now();
        }

        event_loop.dispatch(Some(poll_interval), &mut state)?;
    }

    info!("typed text: {:?}", state.engine.text());
    info!(
        "headless backend shutting down ({})",
        state.engine.stats().summary()
    );
    Ok(state.engine.text().to_owned())
}

// ── Tests ──────────────────────────────────────────────────
