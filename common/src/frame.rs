use alloc::{string::String, vec::Vec};

use serde::{Deserialize, Serialize};

// Logical coordinate domain of a laser point, shared by every ILDA format
pub const COORD_MIN: i32 = i16::MIN as i32;
pub const COORD_MAX: i32 = i16::MAX as i32;

/// A literal RGB triple
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The color a point was resolved to when it was decoded.
///
/// Palette indices never make it this far, so a point keeps the color that
/// was active when its frame was read even if the palette changes later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointColor {
    Rgb(Rgb),
    /// The beam is blanked while travelling to this point
    Invisible,
}

impl PointColor {
    pub fn is_visible(&self) -> bool {
        matches!(self, PointColor::Rgb(_))
    }

    pub fn rgb(&self) -> Option<Rgb> {
        match self {
            PointColor::Rgb(rgb) => Some(*rgb),
            PointColor::Invisible => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    /// Always 0 for the 2D formats
    pub z: i32,
    pub color: PointColor,
}

/// A frame is one named, numbered set of points meant for a single refresh
/// of the projector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub company: String,
    /// Zero based
    pub number: u16,
    /// Declared frame count of the sequence, 0 when unspecified
    pub total: u16,
    pub projector: u8,
    pub points: Vec<Point>,
}

impl Frame {
    /// Whether this frame closes its sequence according to the declared
    /// total. An unspecified total never closes the sequence.
    pub fn is_last(&self) -> bool {
        self.total != 0 && self.number >= self.total - 1
    }
}
