//! Gesture-to-keystroke engine.
//!
//! Turns per-frame hand landmarks into discrete virtual keystrokes:
//! pinch detection over the thumb/index fingertip pair, hit testing
//! against the static keyboard layout, a global cooldown so a held
//! pinch fires once, and the text buffer those keystrokes edit.  The
//! [`pipeline::Engine`] orchestrator ties the pieces together, one
//! tracker frame per tick.

pub mod cooldown;
pub mod landmarks;
pub mod layout;
pub mod pinch;
pub mod pipeline;
pub mod text_buffer;
pub mod viewport;

pub use cooldown::{CooldownPhase, CooldownState};
pub use hit_test::closest_key;
pub use landmarks::{
    HandFrame, LandmarkId, LandmarkPoint, TrackerFrame, HAND_CONNECTIONS, LANDMARK_COUNT,
};
pub use layout::{key_slots, KeyDef, KeySlot, KeyWidth, LayoutParams, BACKSPACE, KEY_ROWS, SPACE};
pub use pinch::{detect_pinch, PinchConfig, PinchState};
pub use pipeline::{
    Engine, EngineConfig, FrameOutput, HandOverlay, Keystroke, RenderInstruction, SessionStats,
    SoundCategory, TipPair,
};
pub use text_buffer::TextBuffer;
pub use viewport::{DisplayPoint, Viewport};
