//! Stdin adapter for an external tracking process.
//!
//! Reads newline-delimited JSON frames on a reader thread and forwards
//! them over a channel.  Polling drains the channel to the most recent
//! frame, so a consumer that falls behind never types from stale
//! coordinates.  Wire format, one frame per line:
//!
//! ```text
//! {"hands": [[[x, y, z], ... 21 points], ... per hand]}
//! ```
//!
//! A malformed line is skipped with a warning; EOF closes the source.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{HandTracker, TrackerPoll};
use crate::engine::{HandFrame, LandmarkPoint, TrackerFrame};

/// One deserialized stdin line.
#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    hands: Vec<Vec<[f32; 3]>>,
}

impl WireFrame {
    fn into_frame(self) -> TrackerFrame {
        let hands = self
            .hands
            .into_iter()
            .map(|points| {
                HandFrame::new(
                    points
                        .into_iter()
                        .map(|[x, y, z]| LandmarkPoint::new(x, y, z))
                        .collect(),
                )
            })
            .collect();
        TrackerFrame::new(hands)
    }
}

/// Tracker fed by a landmark process piping into our stdin.
pub struct StdinTracker {
    frames: Receiver<TrackerFrame>,
    closed: bool,
}

impl StdinTracker {
    /// Start the reader thread.  It runs until EOF, a read error, or
    /// the tracker is dropped.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("tracker-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            warn!("stdin read failed: {}", err);
                            break;
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<WireFrame>(&line) {
                        Ok(wire) => {
                            if tx.send(wire.into_frame()).is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!("malformed frame skipped: {}", err),
                    }
                }
                debug!("stdin tracker reader finished");
            })?;
        Ok(Self::from_receiver(rx))
    }

    fn from_receiver(frames: Receiver<TrackerFrame>) -> Self {
        Self {
            frames,
            closed: false,
        }
    }
}

impl HandTracker for StdinTracker {
    fn next_frame(&mut self) -> TrackerPoll {
        if self.closed {
            return TrackerPoll::Closed;
        }
        let mut latest = None;
        loop {
            match self.frames.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if latest.is_none() {
                        self.closed = true;
                        return TrackerPoll::Closed;
                    }
                    // Deliver the final frame; the next poll closes
                    break;
                }
            }
        }
        match latest {
            Some(frame) => TrackerPoll::Frame(frame),
            None => TrackerPoll::Pending,
        }
    }

    fn stop(&mut self) {
        // The reader exits on EOF or once the tracker is dropped and
        // its next send fails
        self.closed = true;
    }
}

// ── Tests ──────────────────────────────────────────────────
