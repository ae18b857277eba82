//! Fixed-capacity pool of traveling waves
//!
//! Slots are never allocated or freed, only activated and retired. Spawning
//! claims the first inactive slot; advancing walks every slot and skips the
//! inactive ones.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    ChannelId, HitSink,
    color::{BLACK, Rgb, add_colors, channel_color},
    config::SUBPIXEL_FACTOR,
};

/// Index of a slot in a [`WavePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHandle(pub usize);

impl WaveHandle {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One traveling pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    active: bool,
    start: i32,
    progress: i32,
    channel: ChannelId,
}

impl Wave {
    /// Empty slot
    pub const INACTIVE: Self = Self {
        active: false,
        start: 0,
        progress: 0,
        channel: ChannelId(0),
    };

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Channel that spawned the wave
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Fixed-point progress, in sub-pixels
    pub const fn progress(&self) -> i32 {
        self.progress
    }

    /// Pixel the wave currently covers
    ///
    /// May be outside the strip; such a wave is retired on the next advance.
    pub const fn position(&self) -> i32 {
        self.start + self.progress / SUBPIXEL_FACTOR
    }

    const fn is_at_start(&self, channel: ChannelId) -> bool {
        self.active && self.progress / SUBPIXEL_FACTOR == 0 && self.channel.0 == channel.0
    }
}

/// Result of a spawn request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A slot was activated
    Spawned(WaveHandle),
    /// A wave of the same channel is still at the start position
    Duplicate,
    /// Every slot is active; the hit was dropped
    Dropped,
}

/// Diagnostic counters, saturating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub spawned: u32,
    pub duplicates: u32,
    pub dropped: u32,
    pub retired: u32,
}

/// Fixed-capacity wave storage
#[derive(Debug)]
pub struct WavePool<const CAPACITY: usize> {
    slots: [Wave; CAPACITY],
    stats: PoolStats,
}

impl<const CAPACITY: usize> WavePool<CAPACITY> {
    pub const fn new() -> Self {
        Self {
            slots: [Wave::INACTIVE; CAPACITY],
            stats: PoolStats {
                spawned: 0,
                duplicates: 0,
                dropped: 0,
                retired: 0,
            },
        }
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Start a new wave for `channel`
    ///
    /// Declines if the channel already has a wave sitting at the start
    /// position, and drops the request if no slot is free. Active slots are
    /// never overwritten.
    pub fn spawn(&mut self, channel: ChannelId) -> SpawnOutcome {
        if self.slots.iter().any(|wave| wave.is_at_start(channel)) {
            self.stats.duplicates = self.stats.duplicates.saturating_add(1);
            return SpawnOutcome::Duplicate;
        }

        let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, wave)| !wave.active)
        else {
            self.stats.dropped = self.stats.dropped.saturating_add(1);
            log!("wave pool exhausted, dropping hit on drum {}", channel.0);
            return SpawnOutcome::Dropped;
        };

        *slot = Wave {
            active: true,
            start: 0,
            progress: 0,
            channel,
        };
        self.stats.spawned = self.stats.spawned.saturating_add(1);
        SpawnOutcome::Spawned(WaveHandle(index))
    }

    /// Render every active wave into `frame` and move it by `speed`
    ///
    /// The frame is cleared first, so with no active waves the output is all
    /// black. Waves outside the frame are retired instead of drawn.
    pub fn advance(&mut self, speed: i32, frame: &mut [Rgb]) {
        frame.fill(BLACK);

        for wave in self.slots.iter_mut().filter(|wave| wave.active) {
            let pixel = usize::try_from(wave.position())
                .ok()
                .filter(|pos| *pos < frame.len());
            match pixel {
                Some(pos) => {
                    frame[pos] = add_colors(frame[pos], channel_color(wave.channel));
                    wave.progress = wave.progress.saturating_add(speed);
                }
                None => {
                    wave.active = false;
                    self.stats.retired = self.stats.retired.saturating_add(1);
                }
            }
        }
    }

    /// Look at a slot
    pub fn get(&self, handle: WaveHandle) -> Option<&Wave> {
        self.slots.get(handle.index())
    }

    /// Iterate over active waves
    pub fn active(&self) -> impl Iterator<Item = &Wave> {
        self.slots.iter().filter(|wave| wave.active)
    }

    /// Number of active waves
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub const fn stats(&self) -> PoolStats {
        self.stats
    }
}

impl<const CAPACITY: usize> Default for WavePool<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wave pool guarded by a critical section
///
/// Spawn and a whole advance pass each run inside one critical section, so a
/// slot is never observed half-activated.
pub struct SharedPool<const CAPACITY: usize> {
    inner: Mutex<RefCell<WavePool<CAPACITY>>>,
}

impl<const CAPACITY: usize> SharedPool<CAPACITY> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(WavePool::new())),
        }
    }

    /// Run `f` with exclusive access to the pool
    pub fn with<R>(&self, f: impl FnOnce(&mut WavePool<CAPACITY>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow(cs).borrow_mut()))
    }

    pub fn spawn(&self, channel: ChannelId) -> SpawnOutcome {
        self.with(|pool| pool.spawn(channel))
    }

    pub fn advance(&self, speed: i32, frame: &mut [Rgb]) {
        self.with(|pool| pool.advance(speed, frame));
    }

    pub fn active_count(&self) -> usize {
        self.with(|pool| pool.active_count())
    }

    pub fn stats(&self) -> PoolStats {
        self.with(|pool| pool.stats())
    }
}

impl<const CAPACITY: usize> Default for SharedPool<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> HitSink for SharedPool<CAPACITY> {
    fn on_hit(&self, channel: ChannelId) {
        let _ = self.spawn(channel);
    }
}
