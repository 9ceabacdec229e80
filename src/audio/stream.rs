//! Playback cursor shared between the game loop and the device callback
//!
//! The device callback runs on a host thread. Both sides go through the one
//! mutex in [`StreamFeed`]: the game loop starts, cancels and polls playback,
//! the callback copies bytes out and advances the cursor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::Sample;

/// Playback bookkeeping guarded by the feed lock
#[derive(Debug, Default)]
pub struct PlaybackState {
    active: Option<Sample>,
    data: Option<Arc<[u8]>>,
    cursor: usize,
    remaining: usize,
}

impl PlaybackState {
    /// Make `sample` active from its first byte
    pub fn start(&mut self, sample: Sample, data: Arc<[u8]>) {
        self.active = Some(sample);
        self.cursor = 0;
        self.remaining = data.len();
        self.data = Some(data);
    }

    /// Forget the active sample
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Copy up to `out.len()` bytes at the cursor into `out`.
    /// Returns how many bytes were written; the rest of `out` is untouched.
    pub fn fill(&mut self, out: &mut [u8]) -> usize {
        let Some(data) = &self.data else { return 0 };
        let len = out.len().min(self.remaining);
        if len == 0 {
            return 0;
        }

        out[..len].copy_from_slice(&data[self.cursor..self.cursor + len]);
        self.cursor += len;
        self.remaining -= len;
        len
    }

    pub fn snapshot(&self) -> AudioState {
        AudioState {
            active: self.active,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

/// Read-only copy of the playback bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioState {
    pub active: Option<Sample>,
    pub cursor: usize,
    pub remaining: usize,
}

impl AudioState {
    /// Active and fully consumed by the device
    pub fn is_drained(&self) -> bool {
        self.active.is_some() && self.remaining == 0
    }
}

/// Cloneable, lock-guarded handle to the playback state.
/// One clone lives in the trigger, one in the device callback.
#[derive(Debug, Clone, Default)]
pub struct StreamFeed {
    inner: Arc<Mutex<PlaybackState>>,
}

impl StreamFeed {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackState> {
        // No method leaves the state half-written, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Device side: serve one buffer request
    pub fn fill(&self, out: &mut [u8]) -> usize {
        self.lock().fill(out)
    }

    /// Run `f` with the state locked
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackState) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> AudioState {
        self.lock().snapshot()
    }
}
