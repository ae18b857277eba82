mod tests {
    use myrtio_drum_waves::{
        ChannelId, Rgb, channel_color, channel_hue,
        color::{HUE_GREEN, HUE_PURPLE, add_colors},
        config::{
            ANIMATOR_TASK, DETECTOR_TASK, MAX_CHANNELS, NUM_CHANNELS, NUM_LEDS, POOL_CAPACITY,
            SAMPLER_TASK, pool_capacity,
        },
    };

    #[test]
    fn test_pool_capacity() {
        assert_eq!(pool_capacity(240, 2, 5), 2400);
        assert_eq!(POOL_CAPACITY, NUM_LEDS * NUM_CHANNELS * 5);
    }

    #[test]
    fn test_channel_limit() {
        assert_eq!(MAX_CHANNELS, 256);
        assert!(NUM_CHANNELS <= MAX_CHANNELS);
        assert_eq!(ChannelId(u8::MAX).index(), MAX_CHANNELS - 1);
    }

    #[test]
    fn test_task_layout() {
        assert_eq!(DETECTOR_TASK.core, SAMPLER_TASK.core);
        assert_ne!(ANIMATOR_TASK.core, DETECTOR_TASK.core);
        assert!(DETECTOR_TASK.priority > SAMPLER_TASK.priority);
        assert!(ANIMATOR_TASK.priority > SAMPLER_TASK.priority);
    }

    #[test]
    fn test_channel_hues() {
        assert_eq!(channel_hue(ChannelId(0)), HUE_PURPLE);
        assert_eq!(channel_hue(ChannelId(1)), HUE_GREEN);

        let hues: Vec<u8> = (0..6).map(|c| channel_hue(ChannelId(c))).collect();
        for (i, a) in hues.iter().enumerate() {
            for b in &hues[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_ne!(channel_color(ChannelId(0)), channel_color(ChannelId(1)));
    }

    #[test]
    fn test_add_colors_saturates() {
        assert_eq!(
            add_colors(Rgb::new(200, 10, 0), Rgb::new(100, 20, 0)),
            Rgb::new(255, 30, 0)
        );
    }
}
