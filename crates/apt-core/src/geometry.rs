//! Spatial math for airport-local coordinates.
//!
//! Positions are expressed in a local East-North-Up frame in meters:
//! `x` grows east, `y` grows north and `z` is elevation. Headings follow the
//! compass convention (0° = north, clockwise), so a heading `θ` maps to the
//! planar unit vector `(sin θ, cos θ)`.

use serde::{Deserialize, Serialize};

/// Knots to meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;
/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.28084;
/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// A point in the airport-local frame (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in 3D.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance ignoring elevation.
    pub fn horizontal_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `distance_m` along a compass heading, keeping elevation.
    pub fn offset_by_heading(&self, heading_deg: f64, distance_m: f64) -> Position {
        let (east, north) = heading_vector(heading_deg);
        Position {
            x: self.x + east * distance_m,
            y: self.y + north * distance_m,
            z: self.z,
        }
    }

    /// Linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn with_z(self, z: f64) -> Position {
        Position { z, ..self }
    }
}

/// Planar unit vector `(east, north)` for a compass heading in degrees.
pub fn heading_vector(heading_deg: f64) -> (f64, f64) {
    let rad = heading_deg.to_radians();
    (rad.sin(), rad.cos())
}

/// Normalize a heading into `[0, 360)`.
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let wrapped = heading_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Compass bearing from `from` to `to` in degrees, `[0, 360)`.
pub fn bearing_deg(from: &Position, to: &Position) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    normalize_heading(dx.atan2(dy).to_degrees())
}

/// Total length of a polyline.
pub fn path_length(points: &[Position]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

pub fn knots_to_mps(knots: f64) -> f64 {
    knots * KNOTS_TO_MPS
}

pub fn mps_to_knots(mps: f64) -> f64 {
    mps / KNOTS_TO_MPS
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * METERS_TO_FEET
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_vector_follows_compass_convention() {
        let (east, north) = heading_vector(0.0);
        assert!(east.abs() < 1e-12 && (north - 1.0).abs() < 1e-12);

        let (east, north) = heading_vector(90.0);
        assert!((east - 1.0).abs() < 1e-12 && north.abs() < 1e-12);

        let moved = Position::new(10.0, 10.0, 5.0).offset_by_heading(180.0, 100.0);
        assert!((moved.x - 10.0).abs() < 1e-9);
        assert!((moved.y + 90.0).abs() < 1e-9);
        assert_eq!(moved.z, 5.0);
    }

    #[test]
    fn bearing_and_normalization_wrap() {
        let origin = Position::default();
        assert!((bearing_deg(&origin, &Position::new(-1.0, 0.0, 0.0)) - 270.0).abs() < 1e-9);
        assert!((bearing_deg(&origin, &Position::new(0.0, 5.0, 0.0))).abs() < 1e-9);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(720.0), 0.0);
    }

    #[test]
    fn unit_conversions() {
        assert!((knots_to_mps(250.0) - 128.611).abs() < 0.01);
        assert!((mps_to_knots(knots_to_mps(140.0)) - 140.0).abs() < 1e-9);
        assert!((meters_to_feet(1220.0) - 4002.6).abs() < 0.1);
        assert!((meters_to_miles(1609.344) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn path_length_sums_segments() {
        let points = [
            Position::new(0.0, 0.0, 0.0),
            Position::new(3.0, 4.0, 0.0),
            Position::new(3.0, 4.0, 12.0),
        ];
        assert!((path_length(&points) - 17.0).abs() < 1e-12);
        assert_eq!(path_length(&points[..1]), 0.0);
    }
}
