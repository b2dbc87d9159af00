//! Keystroke sound feedback.
//!
//! The engine only names a sound category; playback happens here, on a
//! dedicated audio thread.  Each accepted keystroke fires a short
//! synthesized tone, one pitch per category.  Playback failures are
//! logged and dropped — sound must never block typing.

use std::f32::consts::PI;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, Sink, Source};
use tracing::{debug, warn};

use crate::engine::SoundCategory;

enum AudioCommand {
    Play(SoundCategory),
    Shutdown,
}

/// Handle to the audio thread.  `play` is fire-and-forget.
pub struct FeedbackPlayer {
    tx: Option<Sender<AudioCommand>>,
}

impl FeedbackPlayer {
    /// Start the audio thread, or an inert player when muted.
    pub fn new(muted: bool) -> Self {
        if muted {
            debug!("audio feedback muted");
            return Self { tx: None };
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        // Dedicated thread: the rodio output stream is not Send
        let spawned = thread::Builder::new()
            .name("audio-feedback".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        warn!("no audio output, feedback disabled: {}", err);
                        return;
                    }
                };
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play(category) => match Sink::try_new(&handle) {
                            Ok(sink) => {
                                sink.append(KeyTone::for_category(category));
                                sink.detach();
                            }
                            Err(err) => warn!("key sound failed to start: {}", err),
                        },
                        AudioCommand::Shutdown => break,
                    }
                }
            });

        match spawned {
            Ok(_) => Self { tx: Some(tx) },
            Err(err) => {
                warn!("audio thread failed to start: {}", err);
                Self { tx: None }
            }
        }
    }

    /// Fire the sound for an accepted keystroke.
    pub fn play(&self, category: SoundCategory) {
        if let Some(tx) = &self.tx {
            if tx.send(AudioCommand::Play(category)).is_err() {
                debug!("audio thread gone, {} sound dropped", category.as_str());
            }
        }
    }
}

impl Drop for FeedbackPlayer {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(AudioCommand::Shutdown);
        }
    }
}

// ── Tone synthesis ─────────────────────────────────────────

/// Short decaying sine burst, one pitch per sound category.
pub struct KeyTone {
    freq: f32,
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl KeyTone {
    pub fn for_category(category: SoundCategory) -> Self {
        // Distinct pitches so the ear can tell an edit from a letter
        let (freq, millis) = match category {
            SoundCategory::Keypress => (880.0, 60),
            SoundCategory::Backspace => (660.0, 70),
            SoundCategory::Space => (440.0, 90),
        };
        Self::new(freq, Duration::from_millis(millis))
    }

    pub fn new(freq: f32, length: Duration) -> Self {
        let sample_rate = 44100;
        let total_samples = (sample_rate as f32 * length.as_secs_f32()) as usize;
        Self {
            freq,
            sample_rate,
            num_sample: 0,
            total_samples,
        }
    }
}

impl Iterator for KeyTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        let t = self.num_sample as f32 / self.sample_rate as f32;
        self.num_sample += 1;

        // Linear fade-out keeps the click from ringing
        let envelope = 1.0 - self.num_sample as f32 / self.total_samples as f32;
        Some((2.0 * PI * self.freq * t).sin() * envelope * 0.2)
    }
}

impl Source for KeyTone {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.num_sample))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / self.sample_rate as f32,
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────
