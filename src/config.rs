//! Board constants and loop configuration
//!
//! Everything here is fixed at compile time. The `*Config` structs carry the
//! values the loops use at runtime, so tests and other boards can override
//! them without touching the constants.

use embassy_time::Duration;

/// Number of LEDs on the strip
pub const NUM_LEDS: usize = 240;

/// Number of drum channels
pub const NUM_CHANNELS: usize = 2;

/// Most channels a [`ChannelId`](crate::ChannelId) can address
pub const MAX_CHANNELS: usize = u8::MAX as usize + 1;

/// Data pin of the LED strip
pub const LED_PIN: u8 = 23;

/// Piezo sensor pins, one per drum
pub const SENSOR_PINS: [u8; NUM_CHANNELS] = [34, 36];

/// Threshold potentiometer pins, one per drum
pub const THRESHOLD_PINS: [u8; NUM_CHANNELS] = [32, 33];

/// Speed potentiometer pin
pub const SPEED_PIN: u8 = 35;

/// Largest value the 12-bit ADC produces
pub const ADC_MAX: u16 = 4095;

pub const MIN_THRESHOLD: u16 = 10;
pub const MAX_THRESHOLD: u16 = 2000;

/// Threshold used until the first potentiometer reading arrives
pub const DEFAULT_THRESHOLD: u16 = 50;

/// Slowest (most negative) wave speed, in sub-pixels per tick
pub const SPEED_MIN: i32 = -20;
/// Fastest wave speed, in sub-pixels per tick
pub const SPEED_MAX: i32 = 100;

/// Speed used until the first potentiometer reading arrives
pub const DEFAULT_SPEED: i32 = 20;

/// Minimum time between two accepted hits on the same drum
pub const HIT_COOLDOWN: Duration = Duration::from_millis(100);

/// Consecutive averaged readings above threshold needed to accept a hit
pub const MIN_CONSECUTIVE_HITS: u8 = 2;

/// Raw samples averaged into one reading
pub const READING_SAMPLES: u8 = 3;

/// Fixed-point scale of wave progress
pub const SUBPIXEL_FACTOR: i32 = 10;

/// Waves that may stack on a single pixel position at the slowest speed
pub const HITS_PER_POSITION: usize = 5;

/// Wave slots in the pool
pub const POOL_CAPACITY: usize = pool_capacity(NUM_LEDS, NUM_CHANNELS, HITS_PER_POSITION);

/// Pause between raw sensor samples
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(1);

/// Pause between control potentiometer readings
pub const SAMPLER_INTERVAL: Duration = Duration::from_millis(100);

/// Pause between rendered frames
pub const RENDER_INTERVAL: Duration = Duration::from_millis(1);

/// Pool size that covers every pixel holding the maximum number of
/// overlapping waves from every channel at once
pub const fn pool_capacity(pixels: usize, channels: usize, hits_per_position: usize) -> usize {
    pixels * channels * hits_per_position
}

/// Configuration for the hit detector
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Raw samples averaged into one reading
    pub samples: u8,
    /// Consecutive readings above threshold before a hit is accepted
    pub min_consecutive: u8,
    /// Minimum time between accepted hits on one channel
    pub cooldown: Duration,
    /// Pause between raw samples
    pub sample_interval: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            samples: READING_SAMPLES,
            min_consecutive: MIN_CONSECUTIVE_HITS,
            cooldown: HIT_COOLDOWN,
            sample_interval: SAMPLE_INTERVAL,
        }
    }
}

/// Configuration for the control sampler
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig<const CHANNELS: usize> {
    /// Speed potentiometer pin
    pub speed_pin: u8,
    /// Threshold potentiometer pin per channel
    pub threshold_pins: [u8; CHANNELS],
    /// Pause between readings
    pub interval: Duration,
}

impl Default for SamplerConfig<NUM_CHANNELS> {
    fn default() -> Self {
        Self {
            speed_pin: SPEED_PIN,
            threshold_pins: THRESHOLD_PINS,
            interval: SAMPLER_INTERVAL,
        }
    }
}

/// Scheduling hints for one loop
///
/// Higher `priority` wins. Detection and configuration share a core;
/// rendering runs alone so frame timing is not disturbed by sensor polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProfile {
    pub name: &'static str,
    pub priority: u8,
    pub core: u8,
}

pub const DETECTOR_TASK: TaskProfile = TaskProfile {
    name: "hit_detector",
    priority: 2,
    core: 1,
};

pub const SAMPLER_TASK: TaskProfile = TaskProfile {
    name: "config_sampler",
    priority: 1,
    core: 1,
};

pub const ANIMATOR_TASK: TaskProfile = TaskProfile {
    name: "wave_animator",
    priority: 2,
    core: 0,
};
