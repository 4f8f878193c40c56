//! Cube face identification and enumeration.

use serde::{Deserialize, Serialize};

/// Identifies one of the six faces of a cubemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Face {
    /// +X face.
    Right = 0,
    /// -X face.
    Left = 1,
    /// +Y face (top).
    Up = 2,
    /// -Y face (bottom).
    Down = 3,
    /// +Z face.
    Front = 4,
    /// -Z face.
    Back = 5,
}

impl Face {
    /// Returns all six cube faces in order.
    pub const fn all() -> [Face; 6] {
        [
            Face::Right,
            Face::Left,
            Face::Up,
            Face::Down,
            Face::Front,
            Face::Back,
        ]
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<Face> {
        match index {
            0 => Some(Face::Right),
            1 => Some(Face::Left),
            2 => Some(Face::Up),
            3 => Some(Face::Down),
            4 => Some(Face::Front),
            5 => Some(Face::Back),
            _ => None,
        }
    }

    /// Returns a short name for the face (e.g., "right", "up").
    pub const fn short_name(self) -> &'static str {
        match self {
            Face::Right => "right",
            Face::Left => "left",
            Face::Up => "up",
            Face::Down => "down",
            Face::Front => "front",
            Face::Back => "back",
        }
    }

    /// Returns the filename suffix used for face discovery (e.g., "_right").
    pub const fn suffix(self) -> &'static str {
        match self {
            Face::Right => "_right",
            Face::Left => "_left",
            Face::Up => "_up",
            Face::Down => "_down",
            Face::Front => "_front",
            Face::Back => "_back",
        }
    }
}
