//! Planar coordinates of the simulation environment.
//!
//! The environment is a `length × height` rectangle with its origin at the
//! lower-left corner; agents and buildings report positions inside it.

/// A point in environment coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Position {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Spatial extent of the environment; the environment panel's axis limits.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub length: f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub fn new(length: f64, height: f64) -> Self {
        Self { length, height }
    }

    /// Clamp `p` into the rectangle.
    #[inline]
    pub fn clamp(self, p: Position) -> Position {
        Position::new(p.x.clamp(0.0, self.length), p.y.clamp(0.0, self.height))
    }
}
