//! Pinch detection from fingertip landmarks.
//!
//! A pinch is the single "click" gesture: thumb tip and index tip
//! closer than a fixed fraction of the normalized coordinate range.

use super::landmarks::{HandFrame, LandmarkId, LandmarkPoint};

/// Configuration for the pinch signal.
#[derive(Debug, Clone, Copy)]
pub struct PinchConfig {
    /// Maximum normalized distance between thumb and index tips for a
    /// pinch.  Normalized units, not pixels, so the gesture behaves
    /// the same at any display resolution.
    pub threshold: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self { threshold: 0.05 }
    }
}

/// Pinch signal for one frame.  Recomputed fresh every frame; carries
/// no memory of prior frames.
#[derive(Debug, Clone, Copy)]
pub struct PinchState {
    /// Index fingertip, the pointer for hit testing.
    pub index_tip: LandmarkPoint,
    /// Thumb tip, the other half of the pinch pair.
    pub thumb_tip: LandmarkPoint,
    /// Normalized distance between the two tips.
    pub distance: f32,
    /// Whether the tips are close enough to count as a pinch.
    pub is_pinching: bool,
}

/// Derive the pinch signal from a hand frame.
///
/// Returns `None` when either fingertip landmark is missing from the
/// frame (the tracker did not resolve that joint) — no signal this
/// frame.  The depth component is ignored.
pub fn detect_pinch(frame: &HandFrame, config: &PinchConfig) -> Option<PinchState> {
    let index_tip = *frame.landmark(LandmarkId::IndexTip)?;
    let thumb_tip = *frame.landmark(LandmarkId::ThumbTip)?;

    let distance = planar_distance(&index_tip, &thumb_tip);
    Some(PinchState {
        index_tip,
        thumb_tip,
        distance,
        is_pinching: distance < config.threshold,
    })
}

/// Euclidean distance in the normalized x/y plane.
fn planar_distance(a: &LandmarkPoint, b: &LandmarkPoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn make_frame(index_tip: (f32, f32), thumb_tip: (f32, f32)) -> HandFrame {
    use super::landmarks::LANDMARK_COUNT;

    let mut points = vec![LandmarkPoint::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    points[LandmarkId::IndexTip.index()] = LandmarkPoint::new(index_tip.0, index_tip.1, 0.0);
    points[LandmarkId::ThumbTip.index()] = LandmarkPoint::new(thumb_tip.0, thumb_tip.1, 0.0);
    HandFrame::new(points)
}

// ── Tests ──────────────────────────────────────────────────
