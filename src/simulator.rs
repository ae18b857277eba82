//! Synthetic hits for bench testing without sensors

use embassy_time::{Duration, Instant};

use crate::{ChannelId, HitSink};

/// Default time between synthetic hits
pub const DEFAULT_SIMULATED_INTERVAL: Duration = Duration::from_millis(500);

/// Fires a hit on one channel at a fixed interval
#[derive(Debug, Clone, Copy)]
pub struct HitSimulator {
    channel: ChannelId,
    interval: Duration,
    next_hit: Option<Instant>,
}

impl HitSimulator {
    pub const fn new(channel: ChannelId) -> Self {
        Self::with_interval(channel, DEFAULT_SIMULATED_INTERVAL)
    }

    pub const fn with_interval(channel: ChannelId, interval: Duration) -> Self {
        Self {
            channel,
            interval,
            next_hit: None,
        }
    }

    /// Fire a hit if the interval has elapsed
    ///
    /// The first call always fires. Returns `true` if a hit was sent.
    pub fn tick<S: HitSink + ?Sized>(&mut self, now: Instant, sink: &S) -> bool {
        if self.next_hit.is_some_and(|next| now < next) {
            return false;
        }

        self.next_hit = Some(now + self.interval);
        sink.on_hit(self.channel);
        true
    }
}
