mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_drum_waves::{
        ChannelId, HitSimulator, HitSink, OutputDriver, Rgb, SharedState, WaveAnimator,
        channel_color, color::BLACK,
    };

    const LEDS: usize = 8;

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_idle_frames_are_black() {
        let state = SharedState::<2, 16>::new();
        let mut animator = WaveAnimator::<_, LEDS, 2, 16>::new(
            &state.pool,
            &state.tunables,
            RecordingDriver::default(),
        );

        for t in 0..5 {
            animator.tick(ms(1000 + t));
        }

        let frames = &animator.output().frames;
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().flatten().all(|led| *led == BLACK));
        assert_eq!(animator.frames(), 5);
    }

    #[test]
    fn test_wave_travels_with_shared_speed() {
        let state = SharedState::<2, 16>::new();
        state.tunables.set_speed(10);
        let mut animator = WaveAnimator::<_, LEDS, 2, 16>::new(
            &state.pool,
            &state.tunables,
            RecordingDriver::default(),
        );

        state.pool.on_hit(ChannelId(1));
        for t in 0..3 {
            animator.tick(ms(1000 + t));
        }

        let color = channel_color(ChannelId(1));
        let frames = &animator.output().frames;
        assert_eq!(frames[0][0], color);
        assert_eq!(frames[1][1], color);
        assert_eq!(frames[2][2], color);
        assert_eq!(frames[2][0], BLACK);
    }

    #[test]
    fn test_wave_leaves_strip_and_is_retired() {
        let state = SharedState::<2, 16>::new();
        state.tunables.set_speed(100);
        let mut animator = WaveAnimator::<_, LEDS, 2, 16>::new(
            &state.pool,
            &state.tunables,
            RecordingDriver::default(),
        );

        state.pool.on_hit(ChannelId(0));
        for t in 0..=LEDS as u64 {
            animator.tick(ms(1000 + t));
        }

        assert_eq!(state.pool.active_count(), 0);
        assert_eq!(state.pool.stats().retired, 1);
        assert!(animator.frame().iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_frame_pacing() {
        let state = SharedState::<2, 16>::new();
        let mut animator = WaveAnimator::<_, LEDS, 2, 16>::with_frame_duration(
            &state.pool,
            &state.tunables,
            RecordingDriver::default(),
            Duration::from_millis(1),
        );

        let result = animator.tick(ms(1000));
        assert_eq!(result.next_deadline, ms(1001));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));

        let result = animator.tick(ms(1001));
        assert_eq!(result.next_deadline, ms(1002));

        // Running late by less than two frames keeps the schedule
        let result = animator.tick(ms(1003));
        assert_eq!(result.next_deadline, ms(1003));
        assert_eq!(result.sleep_duration, Duration::from_millis(0));

        // A long stall skips the backlog
        let result = animator.tick(ms(1050));
        assert_eq!(result.next_deadline, ms(1051));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));
    }

    #[test]
    fn test_simulator_fires_on_interval() {
        let state = SharedState::<2, 16>::new();
        let mut simulator =
            HitSimulator::with_interval(ChannelId(0), Duration::from_millis(500));

        assert!(simulator.tick(ms(0), &state.pool));
        assert!(!simulator.tick(ms(499), &state.pool));
        assert!(simulator.tick(ms(500), &state.pool));

        // The first wave has not moved, so the second hit was a duplicate
        assert_eq!(state.pool.active_count(), 1);
        assert_eq!(state.pool.stats().duplicates, 1);
    }
}
