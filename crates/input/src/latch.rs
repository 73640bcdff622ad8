//! Soft-drop latch for terminals without key-release events.
//!
//! Holding a key produces a stream of press/repeat events. If the terminal never
//! reports the release, soft drop would stay on forever; the latch turns it off
//! once no down event has arrived for the grace period.

use crate::types::{Intent, SOFT_DROP_GRACE_MS};

#[derive(Debug, Clone)]
pub struct SoftDropLatch {
    held: bool,
    remaining_ms: u32,
    grace_ms: u32,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self::with_grace_ms(SOFT_DROP_GRACE_MS)
    }

    pub fn with_grace_ms(grace_ms: u32) -> Self {
        Self {
            held: false,
            remaining_ms: 0,
            grace_ms,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Feed an intent coming from the key map. Returns the intent to forward, if any.
    ///
    /// Repeated `SoftDropOn` while already held only refreshes the grace period.
    pub fn observe(&mut self, intent: Intent) -> Option<Intent> {
        match intent {
            Intent::SoftDropOn => {
                self.remaining_ms = self.grace_ms;
                if self.held {
                    None
                } else {
                    self.held = true;
                    Some(Intent::SoftDropOn)
                }
            }
            Intent::SoftDropOff => {
                if self.held {
                    self.held = false;
                    self.remaining_ms = 0;
                    Some(Intent::SoftDropOff)
                } else {
                    None
                }
            }
            other => Some(other),
        }
    }

    /// Advance time. Emits `SoftDropOff` when the grace period runs out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Intent> {
        if !self.held {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.held = false;
            return Some(Intent::SoftDropOff);
        }
        None
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}
