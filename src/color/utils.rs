use smart_leds::hsv::hsv2rgb;

use crate::{
    ChannelId,
    color::{HUE_GREEN, HUE_PURPLE, Hsv, Rgb},
};

/// Golden-ratio step around the 0-255 hue circle
///
/// Successive multiples land far from each other, so every extra channel
/// gets a hue that is easy to tell apart.
const GOLDEN_HUE_STEP: u8 = 158;

/// Add two colors channel by channel, saturating at 255
#[inline]
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Hue assigned to a drum channel
///
/// Channel 0 is purple and channel 1 is green. Further channels step away
/// from purple by the golden ratio.
pub const fn channel_hue(channel: ChannelId) -> u8 {
    match channel.0 {
        0 => HUE_PURPLE,
        1 => HUE_GREEN,
        n => HUE_PURPLE.wrapping_add(n.wrapping_mul(GOLDEN_HUE_STEP)),
    }
}

/// Fully saturated, full brightness color of a drum channel
pub fn channel_color(channel: ChannelId) -> Rgb {
    hsv2rgb(Hsv {
        hue: channel_hue(channel),
        sat: 255,
        val: 255,
    })
}
