/// Panel-specific calibration constants.
///
/// - `pressure_threshold`: A frame counts as a touch while `z2 - z1`
///   stays below this value
/// - `x_gain`, `y_gain`: Gain applied around the center of the sample
///   range to line the sensor up with the display glass
///
/// # Examples
///
/// ```
/// use xpt2046_sampler::Config;
///
/// let config = Config {
///     pressure_threshold: 3500,
///     ..Config::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub pressure_threshold: i16,
    pub x_gain: f32,
    pub y_gain: f32,
}

impl Config {
    /// Gains must be finite and positive.
    pub(crate) fn is_valid(&self) -> bool {
        [self.x_gain, self.y_gain]
            .iter()
            .all(|gain| gain.is_finite() && *gain > 0.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pressure_threshold: 3800,
            x_gain: 1.15,
            y_gain: 1.15,
        }
    }
}
