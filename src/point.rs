/// A touch reading in display pixels.
///
/// Either all fields are valid or all of them equal `-1`
/// ([`Point::NONE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i16,
    pub y: i16,
    /// Pressure proxy, larger for a firmer touch.
    pub z: i16,
}

impl Point {
    /// Nothing is touching the panel.
    pub const NONE: Point = Point {
        x: -1,
        y: -1,
        z: -1,
    };

    pub fn is_touched(&self) -> bool {
        self.z >= 0
    }

    /// Returns `(x, y)` if the panel is touched.
    pub fn position(&self) -> Option<(i16, i16)> {
        self.is_touched().then_some((self.x, self.y))
    }
}
