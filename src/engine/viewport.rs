//! Landmark-space to display-space conversion.
//!
//! The camera feed is shown mirrored, so landmark x must be flipped
//! exactly once on its way to the screen.  This module is the only
//! place that flip happens: hit testing and drawing both consume
//! [`DisplayPoint`]s produced here, and nothing downstream mirrors
//! again.

use super::landmarks::LandmarkPoint;

/// A point in mirrored display pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Display surface dimensions and the normalized-to-pixel mapping.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Display width in pixels.
    pub width: f32,
    /// Display height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a normalized landmark to display pixels, applying the
    /// mirror flip on x.  The single mirroring step in the system.
    pub fn to_display(&self, p: &LandmarkPoint) -> DisplayPoint {
        DisplayPoint {
            x: (1.0 - p.x) * self.width,
            y: p.y * self.height,
        }
    }

    /// Inverse mapping: display pixels back to normalized landmark
    /// coordinates.  Used by the simulated trackers to place a
    /// synthetic fingertip over a display position.
    pub fn to_landmark(&self, x: f32, y: f32) -> LandmarkPoint {
        LandmarkPoint {
            x: 1.0 - x / self.width,
            y: y / self.height,
            z: 0.0,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_flip() {
        let vp = Viewport::default();

        // A landmark on the camera's right edge lands on the display's left
        let right = LandmarkPoint::new(1.0, 0.5, 0.0);
        let d = vp.to_display(&right);
        assert_eq!(d.x, 0.0);
        assert_eq!(d.y, 270.0);

        let left = LandmarkPoint::new(0.0, 0.0, 0.0);
        let d = vp.to_display(&left);
        assert_eq!(d.x, 960.0);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn test_center_is_fixed_point() {
        let vp = Viewport::default();
        let center = LandmarkPoint::new(0.5, 0.5, 0.0);
        let d = vp.to_display(&center);
        assert_eq!(d.x, 480.0);
        assert_eq!(d.y, 270.0);
    }

    #[test]
    fn test_to_landmark_inverts_to_display() {
        let vp = Viewport::default();
        let p = LandmarkPoint::new(0.25, 0.75, 0.0);
        let d = vp.to_display(&p);
        let back = vp.to_landmark(d.x, d.y);
        assert!((back.x - p.x).abs() < 1e-6, "x: {} vs {}", back.x, p.x);
        assert!((back.y - p.y).abs() < 1e-6, "y: {} vs {}", back.y, p.y);
    }
}
