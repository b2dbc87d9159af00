//! Pointer-driven hand simulator.
//!
//! Synthesizes a plausible hand frame from a pointer position so the
//! whole interaction is drivable with no camera or tracker hardware:
//! the index tip follows the pointer and the thumb tip pinches onto it
//! while the button is held.  The window backend feeds it the mouse
//! state each tick.

use super::{HandTracker, TrackerPoll};
use crate::engine::{
    HandFrame, LandmarkId, LandmarkPoint, TrackerFrame, Viewport, LANDMARK_COUNT,
};

/// Landmark offsets from the index tip, normalized units, in landmark
/// index order.  Rough hand proportions, enough for the skeleton
/// overlay to read as a hand.
const HAND_SHAPE: [(f32, f32); LANDMARK_COUNT] = [
    (0.050, 0.180),  // wrist
    (0.070, 0.140),  // thumb cmc
    (0.075, 0.100),  // thumb mcp
    (0.070, 0.060),  // thumb ip
    (0.060, 0.030),  // thumb tip (moves onto the index tip when pinching)
    (0.010, 0.100),  // index mcp
    (0.005, 0.065),  // index pip
    (0.002, 0.030),  // index dip
    (0.000, 0.000),  // index tip = the pointer
    (-0.015, 0.105), // middle mcp
    (-0.020, 0.060), // middle pip
    (-0.022, 0.035), // middle dip
    (-0.025, 0.015), // middle tip
    (-0.040, 0.110), // ring mcp
    (-0.045, 0.070), // ring pip
    (-0.047, 0.050), // ring dip
    (-0.050, 0.030), // ring tip
    (-0.060, 0.120), // pinky mcp
    (-0.065, 0.090), // pinky pip
    (-0.067, 0.070), // pinky dip
    (-0.070, 0.055), // pinky tip
];

/// Build a synthetic hand around an index-tip position in landmark
/// space.  Shared by the pointer simulator and the typing script.
pub(crate) fn synth_hand(tip: LandmarkPoint, pinching: bool) -> HandFrame {
    let mut points = Vec::with_capacity(LANDMARK_COUNT);
    for (i, (dx, dy)) in HAND_SHAPE.iter().enumerate() {
        let point = if pinching && i == LandmarkId::ThumbTip.index() {
            tip
        } else {
            LandmarkPoint::new(tip.x + dx, tip.y + dy, 0.0)
        };
        points.push(point);
    }
    HandFrame::new(points)
}

/// Mouse-driven tracker for the window backend.
pub struct PointerSim {
    viewport: Viewport,
    /// Pointer in display pixels, `None` while outside the window.
    pointer: Option<(f32, f32)>,
    pinching: bool,
    stopped: bool,
}

impl PointerSim {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
            pinching: false,
            stopped: false,
        }
    }

    /// Update from the window's mouse state, display pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32, pinching: bool) {
        self.pointer = Some((x, y));
        self.pinching = pinching;
    }

    /// The pointer left the window; no hand until it returns.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
        self.pinching = false;
    }
}

impl HandTracker for PointerSim {
    fn next_frame(&mut self) -> TrackerPoll {
        if self.stopped {
            return TrackerPoll::Closed;
        }
        let frame = match self.pointer {
            Some((x, y)) => {
                let tip = self.viewport.to_landmark(x, y);
                TrackerFrame::new(vec![synth_hand(tip, self.pinching)])
            }
            // No pointer reads as "no hand detected"
            None => TrackerFrame::default(),
        };
        TrackerPoll::Frame(frame)
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

// ── Tests ──────────────────────────────────────────────────
