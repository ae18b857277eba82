mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, channel_color, channel_hue};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Background color of the strip
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Hue of channel 0
pub const HUE_PURPLE: u8 = 192;
/// Hue of channel 1
pub const HUE_GREEN: u8 = 96;
