//! Control bytes and frame layouts for the XPT2046.
//!
//! Every conversion is started by a control byte followed by one idle
//! byte. The chip clocks the result out while the next two bytes are
//! exchanged, so the sample for the control byte at index `i` of a
//! frame arrives in response bytes `i + 1` and `i + 2`. Response byte 0
//! is the echo slot of the first control byte and carries no data.

/// Pressure tap Z1.
pub const READ_Z1: u8 = 0xB0;
/// Pressure tap Z2.
pub const READ_Z2: u8 = 0xC0;
/// Horizontal position.
pub const READ_X: u8 = 0xD0;
/// Vertical position.
pub const READ_Y: u8 = 0x90;

/// Keep the reference powered after the conversion.
pub const POWER_UP: u8 = 0x01;
/// Power down between conversions (PENIRQ enabled).
pub const POWER_DOWN: u8 = 0x00;

/// Only the low 12 bits of a decoded sample carry data.
const SAMPLE_MASK: u16 = 0x0FFF;

pub const PROBE_LEN: usize = 5;

/// Two-channel pressure probe used as the initialization handshake.
pub const PROBE: [u8; PROBE_LEN] = [READ_Z1 | POWER_UP, 0x00, READ_Z2 | POWER_DOWN, 0x00, 0x00];

pub const FRAME_LEN: usize = 17;

/// Full acquisition: both pressure taps, then three interleaved
/// position pairs, powering down after the last conversion.
pub const FRAME: [u8; FRAME_LEN] = [
    READ_Z1 | POWER_UP,
    0x00,
    READ_Z2 | POWER_UP,
    0x00,
    READ_Y | POWER_UP,
    0x00,
    READ_X | POWER_UP,
    0x00,
    READ_Y | POWER_UP,
    0x00,
    READ_X | POWER_UP,
    0x00,
    READ_Y | POWER_UP,
    0x00,
    READ_X | POWER_DOWN,
    0x00,
    0x00,
];

const Z1_INDEX: usize = 0;
const Z2_INDEX: usize = 2;
const Y_INDICES: [usize; 3] = [4, 8, 12];
const X_INDICES: [usize; 3] = [6, 10, 14];

/// Decodes the two response bytes following a control byte into a
/// 12-bit sample.
///
/// Bit layout, most significant first:
///
/// ```text
/// high: [busy D11 D10 D9 D8 D7 D6 D5]
/// low:  [D4 D3 D2 D1 D0  x  x  x]
/// ```
///
/// The busy bit and the three trailing padding bits are discarded.
///
/// # Examples
///
/// ```
/// use xpt2046_sampler::command::decode_sample;
///
/// assert_eq!(decode_sample(0x40, 0x00), 0x800);
/// assert_eq!(decode_sample(0x7F, 0xF8), 0xFFF);
/// ```
pub fn decode_sample(high: u8, low: u8) -> u16 {
    ((u16::from(high) << 5) | (u16::from(low) >> 3)) & SAMPLE_MASK
}

/// Decodes the sample produced by the control byte at `index`.
fn sample_at(response: &[u8], index: usize) -> u16 {
    decode_sample(response[index + 1], response[index + 2])
}

/// Pressure readings `(z1, z2)` from a [`PROBE`] response.
pub(crate) fn decode_probe(response: &[u8; PROBE_LEN]) -> (u16, u16) {
    (sample_at(response, Z1_INDEX), sample_at(response, Z2_INDEX))
}

/// Decoded, unfiltered samples of one acquisition frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub z1: u16,
    pub z2: u16,
    pub x: [u16; 3],
    pub y: [u16; 3],
}

impl Frame {
    /// Decodes a response to [`FRAME`].
    pub fn decode(response: &[u8; FRAME_LEN]) -> Self {
        Self {
            z1: sample_at(response, Z1_INDEX),
            z2: sample_at(response, Z2_INDEX),
            x: X_INDICES.map(|index| sample_at(response, index)),
            y: Y_INDICES.map(|index| sample_at(response, index)),
        }
    }

    /// `z2 - z1`. Stays near full scale while nothing touches the panel.
    pub fn pressure_delta(&self) -> i16 {
        self.z2 as i16 - self.z1 as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_sample_drops_padding() {
        assert_eq!(decode_sample(0x00, 0x07), 0);
        assert_eq!(decode_sample(0x00, 0x08), 1);
        assert_eq!(decode_sample(0x01, 0x00), 0x20);
        assert_eq!(decode_sample(0x7F, 0xFF), 0xFFF);
    }

    #[test]
    fn decode_sample_drops_busy_bit() {
        assert_eq!(decode_sample(0x80, 0x00), 0);
        assert_eq!(decode_sample(0xC0, 0x00), 0x800);
    }

    #[test]
    fn probe_powers_down_after_z2() {
        assert_eq!(PROBE, [0xB1, 0x00, 0xC0, 0x00, 0x00]);
    }

    #[test]
    fn frame_powers_down_after_last_conversion() {
        let commands: [u8; 8] = core::array::from_fn(|i| FRAME[i * 2]);

        assert_eq!(commands, [0xB1, 0xC1, 0x91, 0xD1, 0x91, 0xD1, 0x91, 0xD0]);
        assert!(FRAME.iter().skip(1).step_by(2).all(|byte| *byte == 0));
    }

    #[test]
    fn decodes_probe() {
        let response = [0xFF, 0x10, 0x00, 0x60, 0x08];

        assert_eq!(decode_probe(&response), (0x200, 0xC01));
    }

    #[test]
    fn decodes_frame_channels() {
        let response = [
            0xFF, // echo
            0x00, 0x08, // z1 = 1
            0x00, 0x10, // z2 = 2
            0x00, 0x18, // y = 3
            0x00, 0x20, // x = 4
            0x00, 0x28, // y = 5
            0x00, 0x30, // x = 6
            0x00, 0x38, // y = 7
            0x00, 0x40, // x = 8
        ];

        let frame = Frame::decode(&response);

        assert_eq!(
            frame,
            Frame {
                z1: 1,
                z2: 2,
                x: [4, 6, 8],
                y: [3, 5, 7],
            }
        );
        assert_eq!(frame.pressure_delta(), 1);
    }

    #[test]
    fn pressure_delta_is_signed() {
        let frame = Frame {
            z1: 0xFFF,
            z2: 0,
            ..Frame::default()
        };

        assert_eq!(frame.pressure_delta(), -0xFFF);
    }
}
