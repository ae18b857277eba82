#![no_std]

#[macro_use]
mod log;

pub mod animator;
pub mod color;
pub mod config;
pub mod detector;
pub mod math;
pub mod pool;
pub mod sampler;
pub mod simulator;
pub mod tunables;

pub use animator::{FrameResult, WaveAnimator};
pub use color::{Hsv, Rgb, channel_color, channel_hue};
pub use config::{DetectorConfig, SamplerConfig, TaskProfile};
pub use detector::{HitDetector, HitGate, SampleWindow};
pub use pool::{PoolStats, SharedPool, SpawnOutcome, Wave, WaveHandle, WavePool};
pub use sampler::{ConfigChanges, ConfigSampler};
pub use simulator::HitSimulator;
pub use tunables::{SharedState, Tunables};
pub use embassy_time::{Duration, Instant};

/// Identity of one drum channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChannelId(pub u8);

impl ChannelId {
    /// Index into per-channel arrays
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Abstract analog input
///
/// Implement this trait over the platform ADC. Values are expected to be in
/// `[0, config::ADC_MAX]`, but nothing breaks if they are not.
pub trait AnalogInput {
    /// Read one raw sample from the given pin
    fn read(&mut self, pin: u8) -> u16;
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The wave animator is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Receiver of accepted hit events
pub trait HitSink {
    /// Called once for every accepted hit on `channel`
    fn on_hit(&self, channel: ChannelId);
}
