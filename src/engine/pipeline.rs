//! Frame orchestrator: landmarks in, keystrokes and render state out.
//!
//! `Engine::process_frame` runs the whole per-frame pipeline — pinch
//! detection, cooldown gating, hit testing, text mutation — and hands
//! back a render instruction plus an optional accepted keystroke.  The
//! engine is synchronous and single-threaded; the only outside party
//! that touches its state between frames is the deferred cooldown
//! timer, which goes through `clear_cooldown` with the epoch it was
//! armed with.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::cooldown::CooldownState;
use super::hit_test::closest_key;
use super::landmarks::{HandFrame, TrackerFrame};
use super::layout::{key_slots, KeySlot, LayoutParams, BACKSPACE, SPACE};
use super::pinch::{detect_pinch, PinchConfig, PinchState};
use super::text_buffer::TextBuffer;
use super::viewport::{DisplayPoint, Viewport};

// ── Configuration ──────────────────────────────────────────

/// Tunable parameters for the whole engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub pinch: PinchConfig,
    pub layout: LayoutParams,
    pub viewport: Viewport,
    /// Maximum pointer-to-key-center distance for a hit, display pixels.
    pub detect_threshold_px: f32,
    /// Length of the post-keystroke cooldown window.
    pub cooldown: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pinch: PinchConfig::default(),
            layout: LayoutParams::default(),
            viewport: Viewport::default(),
            detect_threshold_px: 30.0,
            cooldown: Duration::from_millis(1000),
        }
    }
}

// ── Output types ───────────────────────────────────────────

/// Which feedback sound an accepted keystroke should trigger.
/// Playback mechanics live elsewhere; the engine only picks the
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCategory {
    /// Any letter or punctuation key.
    Keypress,
    Space,
    Backspace,
}

impl SoundCategory {
    pub fn for_label(label: &str) -> Self {
        match label {
            SPACE => Self::Space,
            BACKSPACE => Self::Backspace,
            _ => Self::Keypress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keypress => "keypress",
            Self::Space => "space",
            Self::Backspace => "backspace",
        }
    }
}

/// One accepted keystroke, ready for feedback and timer scheduling.
#[derive(Debug, Clone, Copy)]
pub struct Keystroke {
    pub label: &'static str,
    pub sound: SoundCategory,
    /// Cooldown epoch armed by this keystroke; hand it back via
    /// `Engine::clear_cooldown` when the window elapses.
    pub epoch: u64,
    /// How long to wait before clearing.
    pub cooldown: Duration,
}

/// Thumb/index tip pair in display space, for fingertip markers and
/// the pinch line.
#[derive(Debug, Clone, Copy)]
pub struct TipPair {
    pub index: DisplayPoint,
    pub thumb: DisplayPoint,
    pub pinching: bool,
}

/// The tracked hand mapped to display space, for skeleton drawing.
#[derive(Debug, Clone)]
pub struct HandOverlay {
    /// All resolved landmarks, in hand-frame order.
    pub points: Vec<DisplayPoint>,
    /// `None` when either fingertip was missing this frame.
    pub tips: Option<TipPair>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderInstruction {
    /// Key to highlight; always the one that armed the current
    /// cooldown window.
    pub active_key: Option<&'static str>,
    /// Current text buffer contents.
    pub text: String,
    /// `None` when no hand was detected this frame.
    pub hand: Option<HandOverlay>,
}

/// Result of processing one tracker frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub render: RenderInstruction,
    /// Present only on the frame that accepted a keystroke.
    pub keystroke: Option<Keystroke>,
}

// ── Session counters ───────────────────────────────────────

/// Running interaction counters, reported at session end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub frames: u64,
    pub hand_frames: u64,
    pub pinch_frames: u64,
    pub keystrokes: u64,
    /// Pinching frames rejected because a cooldown window was open.
    pub cooldown_blocks: u64,
    /// Pinching frames whose pointer was out of range of every key.
    pub missed_hits: u64,
    /// Hand frames missing a fingertip landmark, so no pinch signal.
    pub incomplete_hands: u64,
}

impl SessionStats {
    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    pub fn record_hand(&mut self) {
        self.hand_frames += 1;
    }

    pub fn record_pinch(&mut self) {
        self.pinch_frames += 1;
    }

    pub fn record_keystroke(&mut self) {
        self.keystrokes += 1;
    }

    pub fn record_cooldown_block(&mut self) {
        self.cooldown_blocks += 1;
    }

    pub fn record_miss(&mut self) {
        self.missed_hits += 1;
    }

    pub fn record_incomplete_hand(&mut self) {
        self.incomplete_hands += 1;
    }

    pub fn summary(&self) -> String {
        format!(
            "{} frames ({} with a hand), {} pinching, {} keystrokes, {} blocked by cooldown, {} out of range, {} missing fingertips",
            self.frames,
            self.hand_frames,
            self.pinch_frames,
            self.keystrokes,
            self.cooldown_blocks,
            self.missed_hits,
            self.incomplete_hands
        )
    }
}

// ── Engine ─────────────────────────────────────────────────

/// The gesture-to-keystroke engine.
pub struct Engine {
    config: EngineConfig,
    slots: Vec<KeySlot>,
    cooldown: CooldownState,
    text: TextBuffer,
    stats: SessionStats,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let slots = key_slots(&config.layout);
        info!(
            "engine ready: {} keys, {:.0}px hit threshold, {}ms cooldown",
            slots.len(),
            config.detect_threshold_px,
            config.cooldown.as_millis()
        );
        Self {
            cooldown: CooldownState::new(config.cooldown),
            slots,
            text: TextBuffer::new(),
            stats: SessionStats::default(),
            config,
        }
    }

    /// Run the pipeline for one tracker frame.
    ///
    /// Never fails: missing or partial landmark data degrades to a
    /// render-only tick.
    pub fn process_frame(&mut self, frame: &TrackerFrame, now: Instant) -> FrameOutput {
        self.stats.record_frame();

        // ── Step 1: first hand only; none means render-only tick ──
        let hand = match frame.first_hand() {
            Some(hand) => hand,
            None => return self.output(None, None),
        };
        self.stats.record_hand();

        // ── Step 2: pinch signal ──────────────────────────────────
        let pinch = detect_pinch(hand, &self.config.pinch);
        if pinch.is_none() {
            self.stats.record_incomplete_hand();
            trace!("fingertip landmark missing, no pinch signal this frame");
        }
        let overlay = self.overlay_for(hand, pinch.as_ref());
        let pinch = match pinch {
            Some(pinch) if pinch.is_pinching => pinch,
            _ => return self.output(Some(overlay), None),
        };
        self.stats.record_pinch();

        // ── Step 3: global cooldown gate ──────────────────────────
        if !self.cooldown.is_idle() {
            self.stats.record_cooldown_block();
            trace!("pinch during cooldown, candidate rejected");
            return self.output(Some(overlay), None);
        }

        // ── Step 4: hit test in display space ─────────────────────
        let pointer = self.config.viewport.to_display(&pinch.index_tip);
        let label = match closest_key(pointer, &self.slots, self.config.detect_threshold_px) {
            Some(label) => label,
            None => {
                self.stats.record_miss();
                trace!(
                    "pinch at ({:.0},{:.0}) out of range of every key",
                    pointer.x,
                    pointer.y
                );
                return self.output(Some(overlay), None);
            }
        };

        // ── Step 5: accept the keystroke ──────────────────────────
        let epoch = self.cooldown.arm(label, now);
        self.text.apply(label);
        let sound = SoundCategory::for_label(label);
        self.stats.record_keystroke();
        info!("accepted {} (sound {}, epoch {})", label, sound.as_str(), epoch);

        let keystroke = Keystroke {
            label,
            sound,
            epoch,
            cooldown: self.cooldown.hold,
        };

        // ── Step 6: render instruction ────────────────────────────
        self.output(Some(overlay), Some(keystroke))
    }

    /// Deferred-timer entry point: close the cooldown window `epoch`.
    /// A stale epoch is ignored, so a late timer cannot clobber a
    /// newer window.
    pub fn clear_cooldown(&mut self, epoch: u64) -> bool {
        self.cooldown.clear(epoch)
    }

    fn overlay_for(&self, hand: &HandFrame, pinch: Option<&PinchState>) -> HandOverlay {
        let viewport = self.config.viewport;
        let points = hand
            .points()
            .iter()
            .map(|p| viewport.to_display(p))
            .collect();
        let tips = pinch.map(|p| TipPair {
            index: viewport.to_display(&p.index_tip),
            thumb: viewport.to_display(&p.thumb_tip),
            pinching: p.is_pinching,
        });
        HandOverlay { points, tips }
    }

    fn output(&self, hand: Option<HandOverlay>, keystroke: Option<Keystroke>) -> FrameOutput {
        FrameOutput {
            render: RenderInstruction {
                active_key: self.cooldown.last_key(),
                text: self.text.as_str().to_owned(),
                hand,
            },
            keystroke,
        }
    }

    // ── Accessors ──────────────────────────────────────────

    /// Static key geometry, computed once at construction.
    pub fn key_slots(&self) -> &[KeySlot] {
        &self.slots
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Key currently highlighted (the one that armed the open
    /// cooldown window).
    pub fn active_key(&self) -> Option<&'static str> {
        self.cooldown.last_key()
    }

    pub fn cooldown_idle(&self) -> bool {
        self.cooldown.is_idle()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Drop all session state.  The cooldown epoch survives so an
    /// in-flight timer stays harmless.
    pub fn reset(&mut self) {
        self.text.clear();
        self.cooldown.reset();
        self.stats = SessionStats::default();
        debug!("engine reset");
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::landmarks::{LandmarkId, LandmarkPoint, LANDMARK_COUNT};

    fn make_engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    fn make_hand(index_tip: LandmarkPoint, thumb_tip: LandmarkPoint) -> HandFrame {
        let mut points = vec![LandmarkPoint::default(); LANDMARK_COUNT];
        points[LandmarkId::IndexTip.index()] = index_tip;
        points[LandmarkId::ThumbTip.index()] = thumb_tip;
        HandFrame::new(points)
    }

    /// Frame whose index tip sits at the given display position, with
    /// the thumb either pinched onto it or held apart.
    fn frame_at(engine: &Engine, x: f32, y: f32, pinching: bool) -> TrackerFrame {
        let tip = engine.viewport().to_landmark(x, y);
        let thumb = if pinching {
            tip
        } else {
            LandmarkPoint::new(tip.x + 0.2, tip.y, 0.0)
        };
        TrackerFrame::new(vec![make_hand(tip, thumb)])
    }

    /// Frame whose pointer sits exactly on the center of `label`.
    fn frame_over(engine: &Engine, label: &str, pinching: bool) -> TrackerFrame {
        let slot = engine
            .key_slots()
            .iter()
            .find(|s| s.def.label == label)
            .unwrap_or_else(|| panic!("no key slot for {}", label));
        let (cx, cy) = slot.center();
        frame_at(engine, cx, cy, pinching)
    }

    #[test]
    fn test_pinch_over_key_accepts_keystroke() {
        let mut engine = make_engine();
        let frame = frame_over(&engine, "A", true);
        let out = engine.process_frame(&frame, Instant::now());

        let keystroke = out.keystroke.expect("keystroke accepted");
        assert_eq!(keystroke.label, "A");
        assert_eq!(keystroke.sound, SoundCategory::Keypress);
        assert_eq!(keystroke.epoch, 1);
        assert_eq!(keystroke.cooldown, Duration::from_millis(1000));

        assert_eq!(engine.text(), "A");
        assert!(!engine.cooldown_idle());
        assert_eq!(out.render.active_key, Some("A"));
        assert_eq!(out.render.text, "A");
    }

    #[test]
    fn test_hover_without_pinch_is_inert() {
        let mut engine = make_engine();
        let frame = frame_over(&engine, "A", false);
        let out = engine.process_frame(&frame, Instant::now());

        assert!(out.keystroke.is_none());
        assert_eq!(engine.text(), "");
        assert!(engine.cooldown_idle());
        assert_eq!(engine.stats().pinch_frames, 0);
        // The hand still gets an overlay for drawing
        let hand = out.render.hand.expect("overlay present");
        assert_eq!(hand.points.len(), LANDMARK_COUNT);
        let tips = hand.tips.expect("tips resolved");
        assert!(!tips.pinching);
    }

    #[test]
    fn test_held_pinch_fires_exactly_once() {
        let mut engine = make_engine();
        let start = Instant::now();

        // A pinch held across 10 frames at ~30fps, well inside the
        // cooldown window
        let mut accepted = 0;
        for i in 0..10 {
            let frame = frame_over(&engine, "A", true);
            let now = start + Duration::from_millis(33 * i);
            if engine.process_frame(&frame, now).keystroke.is_some() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1, "Expected one keystroke, got {:?}", accepted);
        assert_eq!(engine.text(), "A");
        assert_eq!(engine.stats().keystrokes, 1);
        assert_eq!(engine.stats().cooldown_blocks, 9);
    }

    #[test]
    fn test_cleared_cooldown_accepts_again() {
        let mut engine = make_engine();
        let frame = frame_over(&engine, "A", true);

        let first = engine.process_frame(&frame, Instant::now());
        let epoch = first.keystroke.expect("first keystroke").epoch;

        assert!(engine.clear_cooldown(epoch));
        assert!(engine.cooldown_idle());

        let second = engine.process_frame(&frame, Instant::now());
        assert!(second.keystroke.is_some());
        assert_eq!(engine.text(), "AA");
    }

    #[test]
    fn test_stale_timer_cannot_clear_newer_window() {
        let mut engine = make_engine();

        let first = engine
            .process_frame(&frame_over(&engine, "A", true), Instant::now())
            .keystroke
            .expect("first keystroke");
        engine.clear_cooldown(first.epoch);

        let second = engine
            .process_frame(&frame_over(&engine, "B", true), Instant::now())
            .keystroke
            .expect("second keystroke");

        // The first window's timer fires late
        assert!(!engine.clear_cooldown(first.epoch));
        assert!(!engine.cooldown_idle());
        assert_eq!(engine.active_key(), Some("B"));

        assert!(engine.clear_cooldown(second.epoch));
        assert!(engine.cooldown_idle());
    }

    #[test]
    fn test_space_center_scenario() {
        let mut engine = make_engine();
        // Exact center of the space bar
        let frame = frame_at(&engine, 360.0, 305.0, true);
        let out = engine.process_frame(&frame, Instant::now());

        let keystroke = out.keystroke.expect("space accepted");
        assert_eq!(keystroke.label, SPACE);
        assert_eq!(keystroke.sound, SoundCategory::Space);
        assert_eq!(engine.text(), " ");
        assert!(!engine.cooldown_idle());
    }

    #[test]
    fn test_backspace_sound_and_edit() {
        let mut engine = make_engine();

        let typed = engine
            .process_frame(&frame_over(&engine, "A", true), Instant::now())
            .keystroke
            .expect("letter accepted");
        engine.clear_cooldown(typed.epoch);

        let erased = engine
            .process_frame(&frame_over(&engine, BACKSPACE, true), Instant::now())
            .keystroke
            .expect("backspace accepted");
        assert_eq!(erased.sound, SoundCategory::Backspace);
        assert_eq!(engine.text(), "");
    }

    #[test]
    fn test_second_hand_is_ignored() {
        let mut engine = make_engine();

        // First hand hovers without pinching; second hand pinches
        // right over a key
        let first = frame_over(&engine, "A", false).hands[0].clone();
        let second = frame_over(&engine, "B", true).hands[0].clone();
        let frame = TrackerFrame::new(vec![first, second]);

        let out = engine.process_frame(&frame, Instant::now());
        assert!(out.keystroke.is_none(), "second hand must not type");
        assert_eq!(engine.text(), "");
    }

    #[test]
    fn test_no_hand_is_render_only() {
        let mut engine = make_engine();
        let out = engine.process_frame(&TrackerFrame::new(Vec::new()), Instant::now());

        assert!(out.keystroke.is_none());
        assert!(out.render.hand.is_none());
        assert_eq!(out.render.text, "");
        assert_eq!(engine.stats().frames, 1);
        assert_eq!(engine.stats().hand_frames, 0);
    }

    #[test]
    fn test_incomplete_hand_skips_gesture() {
        let mut engine = make_engine();
        // Only three landmarks resolved; no fingertips
        let hand = HandFrame::new(vec![LandmarkPoint::default(); 3]);
        let out = engine.process_frame(&TrackerFrame::new(vec![hand]), Instant::now());

        assert!(out.keystroke.is_none());
        let overlay = out.render.hand.expect("partial overlay still drawn");
        assert_eq!(overlay.points.len(), 3);
        assert!(overlay.tips.is_none());
        assert_eq!(engine.stats().incomplete_hands, 1);
        assert_eq!(engine.stats().pinch_frames, 0);
    }

    #[test]
    fn test_pinch_out_of_range_is_a_miss() {
        let mut engine = make_engine();
        let frame = frame_at(&engine, 50.0, 50.0, true);
        let out = engine.process_frame(&frame, Instant::now());

        assert!(out.keystroke.is_none());
        assert!(engine.cooldown_idle());
        assert_eq!(engine.stats().missed_hits, 1);
        assert_eq!(engine.stats().pinch_frames, 1);
    }

    #[test]
    fn test_sentence_round_trip() {
        let mut engine = make_engine();

        for label in ["H", "I", SPACE, "T", "H", "E", "R", "E"] {
            let out = engine.process_frame(&frame_over(&engine, label, true), Instant::now());
            let keystroke = out.keystroke.unwrap_or_else(|| panic!("{} not accepted", label));
            assert_eq!(keystroke.label, label);
            engine.clear_cooldown(keystroke.epoch);
        }

        assert_eq!(engine.text(), "HI THERE");
        assert_eq!(engine.stats().keystrokes, 8);
    }

    #[test]
    fn test_sound_category_table() {
        assert_eq!(SoundCategory::for_label("A"), SoundCategory::Keypress);
        assert_eq!(SoundCategory::for_label(";"), SoundCategory::Keypress);
        assert_eq!(SoundCategory::for_label(SPACE), SoundCategory::Space);
        assert_eq!(SoundCategory::for_label(BACKSPACE), SoundCategory::Backspace);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut engine = make_engine();
        let out = engine.process_frame(&frame_over(&engine, "A", true), Instant::now());
        let epoch = out.keystroke.expect("keystroke").epoch;

        engine.reset();
        assert_eq!(engine.text(), "");
        assert!(engine.cooldown_idle());
        assert_eq!(engine.stats().frames, 0);
        // The orphaned timer's clear stays a no-op
        assert!(!engine.clear_cooldown(epoch));
    }

    #[test]
    fn test_summary_reports_counts() {
        let mut engine = make_engine();
        engine.process_frame(&frame_over(&engine, "A", true), Instant::now());
        let summary = engine.stats().summary();
        assert!(summary.contains("1 keystrokes"), "got {:?}", summary);
    }
}
