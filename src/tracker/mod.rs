//! Landmark frame providers.
//!
//! The engine consumes frames through the [`HandTracker`] capability,
//! which exposes exactly the two operations the core depends on:
//! deliver the next frame, stop delivering.  Three providers ship: a
//! pointer-driven simulator for the window backend, a deterministic
//! typing script for headless runs, and a stdin adapter fed by an
//! external tracking process.

pub mod script;
pub mod sim;
pub mod stdio;

pub use script::ScriptTracker;
pub use sim::PointerSim;
pub use stdio::StdinTracker;

use crate::engine::TrackerFrame;

/// One poll of a tracker.
#[derive(Debug, Clone)]
pub enum TrackerPoll {
    /// A fresh frame to process.
    Frame(TrackerFrame),
    /// Nothing new this tick; keep rendering the previous state.
    Pending,
    /// The source has ended and will never deliver again.
    Closed,
}

/// Capability interface over a landmark source.
pub trait HandTracker {
    /// Deliver the next frame, if one is available.
    fn next_frame(&mut self) -> TrackerPoll;

    /// Stop delivering; subsequent polls return [`TrackerPoll::Closed`].
    fn stop(&mut self);
}
