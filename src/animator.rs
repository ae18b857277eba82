//! Wave rendering loop
//!
//! Provides frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping between frames.

use embassy_time::{Duration, Instant};

use crate::{
    OutputDriver,
    color::{BLACK, Rgb},
    config::RENDER_INTERVAL,
    pool::SharedPool,
    tunables::Tunables,
};

/// Result of a frame tick
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Advances the wave pool once per frame and pushes the result to the strip
///
/// # Usage
///
/// ```ignore
/// static STATE: SharedState<2, POOL_CAPACITY> = SharedState::new();
///
/// let mut animator = WaveAnimator::<_, NUM_LEDS, 2, POOL_CAPACITY>::new(
///     &STATE.pool,
///     &STATE.tunables,
///     driver,
/// );
/// loop {
///     let result = animator.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct WaveAnimator<
    'a,
    O: OutputDriver,
    const LEDS: usize,
    const CHANNELS: usize,
    const CAPACITY: usize,
> {
    output: O,
    pool: &'a SharedPool<CAPACITY>,
    tunables: &'a Tunables<CHANNELS>,
    frame_buffer: [Rgb; LEDS],
    next_frame: Instant,
    frame_duration: Duration,
    frames: u32,
}

impl<'a, O: OutputDriver, const LEDS: usize, const CHANNELS: usize, const CAPACITY: usize>
    WaveAnimator<'a, O, LEDS, CHANNELS, CAPACITY>
{
    /// Create an animator rendering every `RENDER_INTERVAL`
    pub fn new(
        pool: &'a SharedPool<CAPACITY>,
        tunables: &'a Tunables<CHANNELS>,
        driver: O,
    ) -> Self {
        Self::with_frame_duration(pool, tunables, driver, RENDER_INTERVAL)
    }

    /// Create an animator with a custom frame duration
    pub fn with_frame_duration(
        pool: &'a SharedPool<CAPACITY>,
        tunables: &'a Tunables<CHANNELS>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            pool,
            tunables,
            frame_buffer: [BLACK; LEDS],
            next_frame: Instant::from_ticks(0),
            frame_duration,
            frames: 0,
        }
    }

    /// Render one frame and return timing information
    ///
    /// 1. Skips the backlog if we have fallen more than two frames behind
    /// 2. Advances the pool with the current speed and composes the frame
    /// 3. Writes the frame to the output driver
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.render();
        self.output.write(&self.frame_buffer);

        self.next_frame += self.frame_duration;
        let sleep_duration = self.next_frame.saturating_duration_since(now);

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Compose the current frame without writing it
    pub fn render(&mut self) -> &[Rgb] {
        let speed = self.tunables.speed();
        self.pool.advance(speed, &mut self.frame_buffer);
        self.frames = self.frames.wrapping_add(1);
        &self.frame_buffer
    }

    /// Last composed frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }

    /// Frames rendered since start
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
