//! Live parameters shared between the loops
//!
//! Each scalar has exactly one writer (the config sampler), so plain relaxed
//! atomics are enough. Readers may see a value one sampler period old.

use core::sync::atomic::{AtomicI32, AtomicU16, Ordering};

use crate::{
    ChannelId,
    config::{DEFAULT_SPEED, DEFAULT_THRESHOLD},
    pool::SharedPool,
};

/// Global wave speed and per-channel hit thresholds
#[derive(Debug)]
pub struct Tunables<const CHANNELS: usize> {
    speed: AtomicI32,
    thresholds: [AtomicU16; CHANNELS],
}

impl<const CHANNELS: usize> Tunables<CHANNELS> {
    /// Create tunables with the board defaults
    pub const fn new() -> Self {
        Self::with_values(DEFAULT_SPEED, DEFAULT_THRESHOLD)
    }

    /// Create tunables with the given speed and the same threshold on every channel
    pub const fn with_values(speed: i32, threshold: u16) -> Self {
        let mut thresholds = [const { AtomicU16::new(0) }; CHANNELS];
        let mut i = 0;
        while i < CHANNELS {
            thresholds[i] = AtomicU16::new(threshold);
            i += 1;
        }
        Self {
            speed: AtomicI32::new(speed),
            thresholds,
        }
    }

    /// Current wave speed in sub-pixels per tick
    pub fn speed(&self) -> i32 {
        self.speed.load(Ordering::Relaxed)
    }

    /// Store a new speed
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_speed(&self, speed: i32) -> bool {
        self.speed.swap(speed, Ordering::Relaxed) != speed
    }

    /// Current threshold of a channel
    ///
    /// Unknown channels report `u16::MAX`, which no reading can exceed.
    pub fn threshold(&self, channel: ChannelId) -> u16 {
        self.thresholds
            .get(channel.index())
            .map_or(u16::MAX, |t| t.load(Ordering::Relaxed))
    }

    /// Store a new threshold for a channel
    ///
    /// Returns `true` if the stored value changed. Unknown channels are ignored.
    pub fn set_threshold(&self, channel: ChannelId, threshold: u16) -> bool {
        self.thresholds
            .get(channel.index())
            .is_some_and(|t| t.swap(threshold, Ordering::Relaxed) != threshold)
    }
}

impl<const CHANNELS: usize> Default for Tunables<CHANNELS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the three loops share
///
/// Meant to live in a `static` so every loop can borrow it for `'static`.
pub struct SharedState<const CHANNELS: usize, const CAPACITY: usize> {
    pub tunables: Tunables<CHANNELS>,
    pub pool: SharedPool<CAPACITY>,
}

impl<const CHANNELS: usize, const CAPACITY: usize> SharedState<CHANNELS, CAPACITY> {
    pub const fn new() -> Self {
        Self {
            tunables: Tunables::new(),
            pool: SharedPool::new(),
        }
    }
}

impl<const CHANNELS: usize, const CAPACITY: usize> Default for SharedState<CHANNELS, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}
