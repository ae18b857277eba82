//! Piezo hit detection
//!
//! Raw sensor samples are averaged in small windows. An averaged reading
//! above the channel threshold only counts as a hit after enough consecutive
//! high readings, and never sooner than the cooldown after the previous hit.
//! The first gate rejects single electrical spikes, the second rejects the
//! mechanical bounce of one strike.

use embassy_time::{Duration, Instant};

use crate::{
    AnalogInput, ChannelId, HitSink,
    config::{DetectorConfig, MAX_CHANNELS},
    math::mean,
    tunables::Tunables,
};

/// Debounce state of one channel
#[derive(Debug, Clone, Copy)]
pub struct HitGate {
    consecutive: u8,
    last_hit: Instant,
}

impl HitGate {
    /// The last hit is treated as having happened at boot
    pub const fn new() -> Self {
        Self {
            consecutive: 0,
            last_hit: Instant::from_ticks(0),
        }
    }

    /// Feed one averaged reading
    ///
    /// Returns `true` when the reading completes an accepted hit.
    pub fn observe(
        &mut self,
        reading: u16,
        threshold: u16,
        now: Instant,
        config: &DetectorConfig,
    ) -> bool {
        if reading <= threshold {
            self.consecutive = 0;
            return false;
        }

        self.consecutive = self.consecutive.saturating_add(1);
        if self.consecutive < config.min_consecutive {
            return false;
        }
        if now.saturating_duration_since(self.last_hit) < config.cooldown {
            return false;
        }

        self.last_hit = now;
        self.consecutive = 0;
        true
    }

    /// Readings above threshold seen in a row
    pub const fn consecutive(&self) -> u8 {
        self.consecutive
    }

    /// Time of the last accepted hit
    pub const fn last_hit(&self) -> Instant {
        self.last_hit
    }
}

impl Default for HitGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Running sum of raw samples
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleWindow {
    sum: u32,
    count: u8,
}

impl SampleWindow {
    pub const fn new() -> Self {
        Self { sum: 0, count: 0 }
    }

    /// Add a sample
    ///
    /// Once `size` samples are collected, returns their mean and starts a new
    /// window.
    pub fn push(&mut self, sample: u16, size: u8) -> Option<u16> {
        self.sum = self.sum.saturating_add(u32::from(sample));
        self.count = self.count.saturating_add(1);
        if self.count < size.max(1) {
            return None;
        }

        let reading = mean(self.sum, self.count);
        *self = Self::new();
        Some(reading)
    }
}

/// Polls every sensor channel and reports accepted hits to a [`HitSink`]
pub struct HitDetector<'a, S: HitSink, const CHANNELS: usize> {
    config: DetectorConfig,
    sensor_pins: [u8; CHANNELS],
    tunables: &'a Tunables<CHANNELS>,
    sink: &'a S,

    gates: [HitGate; CHANNELS],
    windows: [SampleWindow; CHANNELS],
    hits: [u32; CHANNELS],
}

impl<'a, S: HitSink, const CHANNELS: usize> HitDetector<'a, S, CHANNELS> {
    pub fn new(
        tunables: &'a Tunables<CHANNELS>,
        sink: &'a S,
        sensor_pins: [u8; CHANNELS],
        config: DetectorConfig,
    ) -> Self {
        const { assert!(CHANNELS <= MAX_CHANNELS, "too many channels for ChannelId") };
        Self {
            config,
            sensor_pins,
            tunables,
            sink,
            gates: [HitGate::new(); CHANNELS],
            windows: [SampleWindow::new(); CHANNELS],
            hits: [0; CHANNELS],
        }
    }

    /// Take one raw sample from every channel
    ///
    /// Channels whose sample window fills up on this tick are evaluated
    /// against their current threshold. Returns how long to wait before the
    /// next call.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick<A: AnalogInput>(&mut self, now: Instant, input: &mut A) -> Duration {
        for index in 0..CHANNELS {
            let sample = input.read(self.sensor_pins[index]);
            let Some(reading) = self.windows[index].push(sample, self.config.samples) else {
                continue;
            };

            let channel = ChannelId(index as u8);
            let threshold = self.tunables.threshold(channel);
            if self.gates[index].observe(reading, threshold, now, &self.config) {
                log!("Drum {} hit with value: {}", index, reading);
                self.hits[index] = self.hits[index].saturating_add(1);
                self.sink.on_hit(channel);
            }
        }

        self.config.sample_interval
    }

    /// Debounce state of a channel
    pub fn gate(&self, channel: ChannelId) -> Option<&HitGate> {
        self.gates.get(channel.index())
    }

    /// Accepted hits on a channel since start
    pub fn hits(&self, channel: ChannelId) -> u32 {
        self.hits.get(channel.index()).copied().unwrap_or(0)
    }

}
