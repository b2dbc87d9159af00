//! Keystroke cooldown state machine.
//!
//! One accepted keystroke arms a global rate-limit window during which
//! every further candidate is rejected, whichever key it is.  The
//! transition back to Idle is driven by a deferred timer rather than
//! per-frame polling: `arm` hands the caller an epoch, the timer calls
//! `clear` with that epoch, and a clear whose epoch has gone stale
//! does nothing, so a late timer can never clobber a newer window.

use std::time::{Duration, Instant};

use tracing::debug;

// ── Phase ──────────────────────────────────────────────────

/// Phase of the cooldown machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownPhase {
    /// Ready to accept a keystroke.
    Idle,
    /// A keystroke fired; candidates are rejected until the timer
    /// clears this window.
    Active {
        /// The key that armed the window, kept for highlighting.
        key: &'static str,
        /// When the window is due to end.
        expiry: Instant,
    },
}

// ── State ──────────────────────────────────────────────────

/// Global keystroke rate limiter.
#[derive(Debug, Clone)]
pub struct CooldownState {
    phase: CooldownPhase,
    /// Monotonic count of accepted keystrokes; identifies the current
    /// window for stale-timer detection.
    epoch: u64,
    /// Length of one cooldown window.
    pub hold: Duration,
}

impl Default for CooldownState {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl CooldownState {
    pub fn new(hold: Duration) -> Self {
        Self {
            phase: CooldownPhase::Idle,
            epoch: 0,
            hold,
        }
    }

    /// Arm the window for an accepted keystroke.  Returns the new
    /// epoch; the caller schedules a deferred `clear` carrying it.
    ///
    /// The orchestrator only accepts keystrokes while Idle, so arming
    /// always opens a fresh window.
    pub fn arm(&mut self, key: &'static str, now: Instant) -> u64 {
        self.epoch += 1;
        self.phase = CooldownPhase::Active {
            key,
            expiry: now + self.hold,
        };
        debug!("cooldown armed for {} (epoch {})", key, self.epoch);
        self.epoch
    }

    /// Timer callback: return to Idle if `epoch` still names the
    /// current window.  Returns whether a transition happened.
    pub fn clear(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            debug!(
                "stale cooldown clear ignored (epoch {} != current {})",
                epoch, self.epoch
            );
            return false;
        }
        match self.phase {
            CooldownPhase::Active { key, .. } => {
                debug!("cooldown cleared after {} (epoch {})", key, epoch);
                self.phase = CooldownPhase::Idle;
                true
            }
            CooldownPhase::Idle => false,
        }
    }

    /// Whether a new keystroke may be accepted.
    pub fn is_idle(&self) -> bool {
        self.phase == CooldownPhase::Idle
    }

    /// The key that armed the current window, for highlighting.
    /// `None` while Idle.
    pub fn last_key(&self) -> Option<&'static str> {
        match self.phase {
            CooldownPhase::Active { key, .. } => Some(key),
            CooldownPhase::Idle => None,
        }
    }

    /// Current epoch (the most recently armed window).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> CooldownPhase {
        self.phase
    }

    /// Drop any active window without touching the epoch.  An
    /// in-flight timer for the dropped window becomes a no-op clear.
    pub fn reset(&mut self) {
        self.phase = CooldownPhase::Idle;
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_idle() {
        let cooldown = CooldownState::default();
        assert!(cooldown.is_idle());
        assert_eq!(cooldown.last_key(), None);
        assert_eq!(cooldown.epoch(), 0);
    }

    #[test]
    fn test_arm_blocks_and_tracks_key() {
        let mut cooldown = CooldownState::default();
        let now = Instant::now();

        let epoch = cooldown.arm("A", now);
        assert_eq!(epoch, 1);
        assert!(!cooldown.is_idle());
        assert_eq!(cooldown.last_key(), Some("A"));

        match cooldown.phase() {
            CooldownPhase::Active { key, expiry } => {
                assert_eq!(key, "A");
                assert_eq!(expiry, now + Duration::from_millis(1000));
            }
            phase => panic!("Expected Active, got {:?}", phase),
        }
    }

    #[test]
    fn test_clear_current_epoch() {
        let mut cooldown = CooldownState::default();
        let epoch = cooldown.arm("A", Instant::now());

        assert!(cooldown.clear(epoch));
        assert!(cooldown.is_idle());
        assert_eq!(cooldown.last_key(), None);

        // Second clear of the same epoch: already idle, no transition
        assert!(!cooldown.clear(epoch));
    }

    #[test]
    fn test_stale_clear_is_ignored() {
        let mut cooldown = CooldownState::default();
        let now = Instant::now();

        let first = cooldown.arm("A", now);
        cooldown.clear(first);

        // New window; the old timer fires late
        let second = cooldown.arm("B", now + Duration::from_millis(1500));
        assert!(!cooldown.clear(first), "stale epoch must not clear");
        assert!(!cooldown.is_idle());
        assert_eq!(cooldown.last_key(), Some("B"));

        assert!(cooldown.clear(second));
        assert!(cooldown.is_idle());
    }

    #[test]
    fn test_epoch_increments_per_keystroke() {
        let mut cooldown = CooldownState::default();
        let now = Instant::now();
        assert_eq!(cooldown.arm("A", now), 1);
        cooldown.clear(1);
        assert_eq!(cooldown.arm("B", now), 2);
        cooldown.clear(2);
        assert_eq!(cooldown.arm("SPACE", now), 3);
    }

    #[test]
    fn test_reset_keeps_epoch() {
        let mut cooldown = CooldownState::default();
        let epoch = cooldown.arm("A", Instant::now());
        cooldown.reset();
        assert!(cooldown.is_idle());
        assert_eq!(cooldown.epoch(), epoch);
        // The orphaned timer's clear is harmless
        assert!(!cooldown.clear(epoch));
    }

    #[test]
    fn test_custom_hold() {
        let mut cooldown = CooldownState::new(Duration::from_millis(250));
        let now = Instant::now();
        cooldown.arm("Q", now);
        match cooldown.phase() {
            CooldownPhase::Active { expiry, .. } => {
                assert_eq!(expiry, now + Duration::from_millis(250));
            }
            phase => panic!("Expected Active, got {:?}", phase),
        }
    }
}
