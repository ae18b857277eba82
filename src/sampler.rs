//! Control potentiometer sampling

use embassy_time::Duration;
use heapless::Vec;

use crate::{
    AnalogInput, ChannelId,
    config::{
        ADC_MAX, MAX_CHANNELS, MAX_THRESHOLD, MIN_THRESHOLD, SAMPLER_INTERVAL, SPEED_MAX,
        SPEED_MIN, SamplerConfig,
    },
    math::map_range,
    tunables::Tunables,
};

/// Map a raw speed knob reading to a wave speed
pub const fn speed_from_raw(raw: u16) -> i32 {
    map_range(raw as i32, 0, ADC_MAX as i32, SPEED_MIN, SPEED_MAX)
}

/// Map a raw threshold knob reading to a hit threshold
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn threshold_from_raw(raw: u16) -> u16 {
    map_range(
        raw as i32,
        0,
        ADC_MAX as i32,
        MIN_THRESHOLD as i32,
        MAX_THRESHOLD as i32,
    ) as u16
}

/// What a sampling pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigChanges<const CHANNELS: usize> {
    /// New speed, if it changed
    pub speed: Option<i32>,
    /// Channels whose threshold changed, with the new value
    pub thresholds: Vec<(ChannelId, u16), CHANNELS>,
}

impl<const CHANNELS: usize> ConfigChanges<CHANNELS> {
    pub fn is_empty(&self) -> bool {
        self.speed.is_none() && self.thresholds.is_empty()
    }
}

/// Reads the speed and threshold knobs into [`Tunables`]
pub struct ConfigSampler<'a, const CHANNELS: usize> {
    config: SamplerConfig<CHANNELS>,
    tunables: &'a Tunables<CHANNELS>,
}

impl<'a, const CHANNELS: usize> ConfigSampler<'a, CHANNELS> {
    pub const fn new(tunables: &'a Tunables<CHANNELS>, config: SamplerConfig<CHANNELS>) -> Self {
        const { assert!(CHANNELS <= MAX_CHANNELS, "too many channels for ChannelId") };
        Self { config, tunables }
    }

    /// Sampler with the given pins and the default interval
    pub const fn with_pins(
        tunables: &'a Tunables<CHANNELS>,
        speed_pin: u8,
        threshold_pins: [u8; CHANNELS],
    ) -> Self {
        Self::new(
            tunables,
            SamplerConfig {
                speed_pin,
                threshold_pins,
                interval: SAMPLER_INTERVAL,
            },
        )
    }

    /// Read every knob once and store values that changed
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample<A: AnalogInput>(&mut self, input: &mut A) -> ConfigChanges<CHANNELS> {
        let mut changes = ConfigChanges::default();

        let speed = speed_from_raw(input.read(self.config.speed_pin));
        if self.tunables.set_speed(speed) {
            log!("Wave speed = {}", speed);
            changes.speed = Some(speed);
        }

        for (index, pin) in self.config.threshold_pins.iter().enumerate() {
            let channel = ChannelId(index as u8);
            let threshold = threshold_from_raw(input.read(*pin));
            if self.tunables.set_threshold(channel, threshold) {
                log!("Drum {} threshold = {}", index, threshold);
                // One entry per channel at most, so this cannot overflow
                let _ = changes.thresholds.push((channel, threshold));
            }
        }

        changes
    }

    /// Sample once and return how long to wait before the next call
    pub fn tick<A: AnalogInput>(&mut self, input: &mut A) -> Duration {
        self.sample(input);
        self.config.interval
    }
}

