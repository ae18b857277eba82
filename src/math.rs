//! Integer helpers for analog readings

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`
///
/// Integer math with truncation toward zero. The input is clamped to its
/// range first, so the result always lies within the output range.
#[allow(clippy::cast_possible_truncation)]
pub const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let (lo, hi) = if in_min < in_max {
        (in_min, in_max)
    } else {
        (in_max, in_min)
    };
    let value = if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };

    let scaled = (value as i64 - in_min as i64) * (out_max as i64 - out_min as i64)
        / (in_max as i64 - in_min as i64);
    (scaled + out_min as i64) as i32
}

/// Integer mean of `count` samples summing to `sum`
#[allow(clippy::cast_possible_truncation)]
pub const fn mean(sum: u32, count: u8) -> u16 {
    if count == 0 {
        return 0;
    }
    let avg = sum / count as u32;
    if avg > u16::MAX as u32 {
        u16::MAX
    } else {
        avg as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_reversed_input() {
        assert_eq!(map_range(0, 100, 0, 0, 10), 10);
        assert_eq!(map_range(100, 100, 0, 0, 10), 0);
    }

    #[test]
    fn test_map_range_degenerate() {
        assert_eq!(map_range(42, 5, 5, -3, 9), -3);
    }

    #[test]
    fn test_mean_zero_count() {
        assert_eq!(mean(100, 0), 0);
    }
}
