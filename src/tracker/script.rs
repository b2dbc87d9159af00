//! Deterministic typing script for headless runs.
//!
//! Expands a target string into a frame sequence: park the pointer
//! over each key, pinch for a few frames, then hold off long enough
//! for the cooldown window to pass.  Driving the engine with the
//! script reproduces the exact text, which is what the headless
//! backend asserts in demos and CI.

use std::time::Duration;

use tracing::{info, warn};

use super::sim::synth_hand;
use super::{HandTracker, TrackerPoll};
use crate::engine::{key_slots, EngineConfig, TrackerFrame, Viewport, KEY_ROWS, SPACE};

/// Frames spent parked over a key before pinching.
const HOVER_FRAMES: usize = 2;
/// Frames the pinch is held.  More than one, because a real pinch
/// always spans several camera frames.
const PRESS_FRAMES: usize = 3;

/// Map a scripted character to its key label.  Letters are folded to
/// uppercase; anything without a key is unsupported.
pub fn label_for_char(ch: char) -> Option<&'static str> {
    if ch == ' ' {
        return Some(SPACE);
    }
    let upper = ch.to_ascii_uppercase();
    KEY_ROWS
        .iter()
        .flat_map(|row| row.iter())
        .copied()
        .find(|label| {
            let mut chars = label.chars();
            chars.next() == Some(upper) && chars.next().is_none()
        })
}

#[derive(Debug, Clone, Copy)]
struct ScriptStep {
    /// Pointer target in display pixels.
    x: f32,
    y: f32,
    pinching: bool,
}

/// Scripted tracker that types a fixed string, then closes.
pub struct ScriptTracker {
    steps: Vec<ScriptStep>,
    cursor: usize,
    viewport: Viewport,
    stopped: bool,
}

impl ScriptTracker {
    /// Build a script that types `text` when polled once per `tick`.
    ///
    /// Characters with no key on the layout are skipped with a
    /// warning.
    pub fn typing(text: &str, config: &EngineConfig, tick: Duration) -> Self {
        let slots = key_slots(&config.layout);
        // Enough released frames after each press for the cooldown
        // window to elapse, plus slack for timer latency
        let settle = (config.cooldown.as_millis() / tick.as_millis().max(1)) as usize + 3;

        let mut steps = Vec::new();
        for ch in text.chars() {
            let label = match label_for_char(ch) {
                Some(label) => label,
                None => {
                    warn!("no key for {:?}, skipping it", ch);
                    continue;
                }
            };
            // The label comes out of the layout table, so a slot
            // always resolves
            let (x, y) = match slots.iter().find(|s| s.def.label == label) {
                Some(slot) => slot.center(),
                None => continue,
            };
            for _ in 0..HOVER_FRAMES {
                steps.push(ScriptStep { x, y, pinching: false });
            }
            for _ in 0..PRESS_FRAMES {
                steps.push(ScriptStep { x, y, pinching: true });
            }
            for _ in 0..settle {
                steps.push(ScriptStep { x, y, pinching: false });
            }
        }
        info!("typing script ready: {:?} over {} frames", text, steps.len());

        Self {
            steps,
            cursor: 0,
            viewport: config.viewport,
            stopped: false,
        }
    }

    /// Total frames in the script.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl HandTracker for ScriptTracker {
    fn next_frame(&mut self) -> TrackerPoll {
        if self.stopped || self.cursor >= self.steps.len() {
            return TrackerPoll::Closed;
        }
        let step = self.steps[self.cursor];
        self.cursor += 1;
        let tip = self.viewport.to_landmark(step.x, step.y);
        TrackerPoll::Frame(TrackerFrame::new(vec![synth_hand(tip, step.pinching)]))
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

// ── Tests ──────────────────────────────────────────────────
