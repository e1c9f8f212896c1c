//! Shared types used across the field, agents and runtime.

use serde::{Deserialize, Serialize};

/// Monotonic simulation step counter.
pub type Tick = u64;

/// A continuous position in the field's coordinate space.
///
/// Positions are not bound to integer cells; the field truncates them
/// when it reads or writes a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Plain Euclidean distance. Does not account for toroidal wrap.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Advance by `distance` along `angle` (radians).
    pub fn advanced(&self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Wrap both coordinates into `[0, width) x [0, height)`.
    pub fn wrapped(&self, width: usize, height: usize) -> Position {
        Position::new(wrap_coordinate(self.x, width), wrap_coordinate(self.y, height))
    }
}

/// Wrap a continuous coordinate into `[0, extent)`.
///
/// `rem_euclid` can round up to exactly `extent` for tiny negative inputs,
/// which is folded back to zero.
pub fn wrap_coordinate(value: f64, extent: usize) -> f64 {
    let extent = extent as f64;
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Truncate a continuous coordinate toward zero and wrap it onto a cell index.
pub fn wrap_index(value: f64, extent: usize) -> usize {
    (value.trunc() as i64).rem_euclid(extent as i64) as usize
}

/// Truncate a continuous coordinate onto a cell index, clamping to the edges.
pub fn clamp_index(value: f64, extent: usize) -> usize {
    value.clamp(0.0, (extent - 1) as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_coordinate_stays_in_range() {
        assert_eq!(wrap_coordinate(10.5, 10), 0.5);
        assert_eq!(wrap_coordinate(-0.5, 10), 9.5);
        assert_eq!(wrap_coordinate(-1e-18, 10), 0.0);
        assert_eq!(wrap_coordinate(3.25, 10), 3.25);
    }

    #[test]
    fn wrap_index_truncates_then_wraps() {
        assert_eq!(wrap_index(9.99, 10), 9);
        assert_eq!(wrap_index(10.2, 10), 0);
        // Truncation toward zero: -0.5 lands on cell 0, -1.5 wraps to the last cell.
        assert_eq!(wrap_index(-0.5, 10), 0);
        assert_eq!(wrap_index(-1.5, 10), 9);
    }

    #[test]
    fn clamp_index_pins_to_edges() {
        assert_eq!(clamp_index(-4.0, 10), 0);
        assert_eq!(clamp_index(14.0, 10), 9);
        assert_eq!(clamp_index(4.7, 10), 4);
    }

    #[test]
    fn advanced_moves_along_heading() {
        let p = Position::new(1.0, 1.0).advanced(0.0, 2.0);
        assert!((p.x - 3.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!((Position::new(0.0, 0.0).distance_to(&Position::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
