use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid cell address. May lie outside the board while a move is evaluated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the coordinate lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring coordinate one cell towards `direction`.
    #[must_use]
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(raw.to_owned());
        let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A colored cell. Two pixels are the same cell when their coordinates match,
/// whatever their colors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Pixel {
    #[must_use]
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, color }
    }

    #[must_use]
    pub const fn at(coordinate: Coordinate, color: Color) -> Self {
        Self::new(coordinate.x, coordinate.y, color)
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// Returns the same cell painted with `color`.
    #[must_use]
    pub const fn recolored(self, color: Color) -> Self {
        Self { color, ..self }
    }

    #[must_use]
    pub fn is_same_cell(&self, other: &Self) -> bool {
        self.coordinate() == other.coordinate()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Color, Coordinate, Pixel};

    #[test]
    fn color_parses_upper_and_lower_case_hex() {
        assert_eq!("#6495ed".parse(), Ok(Color::rgb(0x64, 0x95, 0xed)));
        assert_eq!("#FFFF00".parse(), Ok(Color::rgb(0xff, 0xff, 0x00)));
    }

    #[test]
    fn color_rejects_malformed_input() {
        for raw in ["6495ed", "#6495e", "#6495edd", "#zz95ed", "#ééé"] {
            assert!(raw.parse::<Color>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn color_displays_as_lowercase_hex() {
        assert_eq!(Color::rgb(0xff, 0xff, 0x00).to_string(), "#ffff00");
    }

    #[test]
    fn pixel_serializes_with_hex_color() {
        let pixel = Pixel::new(3, 4, Color::rgb(0, 0xff, 0));
        let json = serde_json::to_string(&pixel).expect("pixel should serialize");

        assert_eq!(json, r##"{"x":3,"y":4,"color":"#00ff00"}"##);
    }

    #[test]
    fn cell_identity_ignores_color() {
        let green = Pixel::new(1, 1, Color::rgb(0, 0xff, 0));
        let yellow = green.recolored(Color::rgb(0xff, 0xff, 0));

        assert!(green.is_same_cell(&yellow));
        assert_ne!(green, yellow);
    }

    #[test]
    fn shifted_coordinates_follow_screen_axes() {
        let origin = Coordinate::new(5, 5);

        assert_eq!(origin.shifted(Direction::Left), Coordinate::new(4, 5));
        assert_eq!(origin.shifted(Direction::Right), Coordinate::new(6, 5));
        assert_eq!(origin.shifted(Direction::Up), Coordinate::new(5, 4));
        assert_eq!(origin.shifted(Direction::Down), Coordinate::new(5, 6));
    }

    #[test]
    fn bounds_exclude_the_far_edges() {
        let bounds = GridSize {
            width: 25,
            height: 25,
        };

        assert!(Coordinate::new(0, 0).is_within_bounds(bounds));
        assert!(Coordinate::new(24, 24).is_within_bounds(bounds));
        assert!(!Coordinate::new(25, 12).is_within_bounds(bounds));
        assert!(!Coordinate::new(-1, 12).is_within_bounds(bounds));
        assert!(!Coordinate::new(12, 25).is_within_bounds(bounds));
    }
}
