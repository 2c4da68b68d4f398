//! Noise filtering and coordinate scaling for raw 12-bit samples.

/// Midpoint of the 12-bit sample range.
const CENTER: i32 = 0x800;

/// Number of distinct values in a 12-bit sample.
const FULL_SCALE: i32 = 0x1000;

/// Returns the mean of the two samples that agree most closely,
/// discarding the third as a glitch.
///
/// On equal distances the pairs are preferred in the order `(a, b)`,
/// `(a, c)`, `(b, c)`.
///
/// # Examples
///
/// ```
/// use xpt2046_sampler::filter::best_pair_average;
///
/// assert_eq!(best_pair_average(100, 102, 500), 101);
/// assert_eq!(best_pair_average(10, 10, 10), 10);
/// ```
pub fn best_pair_average(a: u16, b: u16, c: u16) -> u16 {
    let ab = a.abs_diff(b);
    let ac = a.abs_diff(c);
    let bc = b.abs_diff(c);

    let (first, second) = if ab <= ac && ab <= bc {
        (a, b)
    } else if ac <= ab && ac <= bc {
        (a, c)
    } else {
        (b, c)
    };

    ((u32::from(first) + u32::from(second)) / 2) as u16
}

/// Applies `gain` to `raw` around the center of the sample range.
///
/// The product is truncated toward zero before being shifted back.
pub fn scale_coord(raw: i32, gain: f32) -> i32 {
    let scaled = (raw.saturating_sub(CENTER) as f32 * gain) as i32;

    scaled.saturating_add(CENTER)
}

/// Maps a scaled sample onto `0..dimension` pixels.
///
/// Samples that scaling pushed outside the 12-bit range land on the
/// nearest edge pixel.
pub fn to_pixel(scaled: i32, dimension: i16) -> i16 {
    let dimension = i32::from(dimension);
    let pixel = scaled.clamp(-FULL_SCALE, 2 * FULL_SCALE) * dimension / FULL_SCALE;

    pixel.min(dimension - 1).max(0) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_pair_average_drops_outlier() {
        assert_eq!(best_pair_average(100, 102, 500), 101);
        assert_eq!(best_pair_average(500, 100, 102), 101);
        assert_eq!(best_pair_average(100, 4000, 104), 102);
    }

    #[test]
    fn best_pair_average_truncates() {
        assert_eq!(best_pair_average(7, 8, 2000), 7);
        assert_eq!(best_pair_average(4095, 4094, 0), 4094);
    }

    #[test]
    fn best_pair_average_ties() {
        assert_eq!(best_pair_average(10, 10, 10), 10);
        // (a, b) and (a, c) are both 4 apart; (a, b) wins
        assert_eq!(best_pair_average(10, 14, 6), 12);
        // (a, c) and (b, c) are both 4 apart; (a, c) wins
        assert_eq!(best_pair_average(0, 8, 4), 2);
    }

    #[test]
    fn scale_coord_keeps_center() {
        assert_eq!(scale_coord(2048, 1.15), 2048);
        assert_eq!(scale_coord(2048, 0.5), 2048);
    }

    #[test]
    fn scale_coord_truncates_toward_center() {
        assert_eq!(scale_coord(1024, 1.15), 871);
        assert_eq!(scale_coord(3072, 1.15), 3225);
        assert_eq!(scale_coord(0, 1.15), -307);
        assert_eq!(scale_coord(4095, 1.15), 4402);
    }

    #[test]
    fn scale_coord_is_reversible() {
        let gain = 1.15;

        for raw in (0..4096).step_by(7) {
            let restored = scale_coord(scale_coord(raw, gain), 1.0 / gain);
            assert!(
                (restored - raw).abs() <= 2,
                "{} came back as {}",
                raw,
                restored
            );
        }
    }

    #[test]
    fn to_pixel_maps_range() {
        assert_eq!(to_pixel(0, 240), 0);
        assert_eq!(to_pixel(2048, 240), 120);
        assert_eq!(to_pixel(871, 320), 68);
        assert_eq!(to_pixel(4095, 320), 319);
    }

    #[test]
    fn to_pixel_clamps() {
        assert_eq!(to_pixel(-307, 240), 0);
        assert_eq!(to_pixel(4402, 240), 239);
        assert_eq!(to_pixel(i32::from(i16::MAX), 320), 319);
    }

    #[test]
    fn large_gain_saturates() {
        assert_eq!(scale_coord(4095, 1e7), i32::MAX);
        assert_eq!(scale_coord(0, 1e7), i32::MIN + CENTER);
        assert_eq!(to_pixel(scale_coord(4095, 1e7), 320), 319);
        assert_eq!(to_pixel(scale_coord(0, 1e7), 320), 0);
        assert_eq!(to_pixel(i32::MAX, i16::MAX), i16::MAX - 1);
        assert_eq!(to_pixel(i32::MIN, i16::MAX), 0);
    }
}
