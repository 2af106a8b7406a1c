//! Cartesian/polar conversion utilities for circular layouts
//!
//! Angles are in degrees, measured clockwise from twelve o'clock, matching
//! the angular convention of the circular track placement (a spacing gap
//! appears at angle zero, i.e. at the top of the ring).

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Convert a polar position (radius, clockwise angle from the top) around
/// `center` to Cartesian coordinates.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = deg_to_rad(angle_deg);
    Point {
        x: center.x + radius * rad.sin(),
        y: center.y - radius * rad.cos(),
    }
}

/// Convert a Cartesian point to (radius, clockwise angle from the top)
/// around `center`. The angle is normalized to `[0, 360)`.
pub fn cartesian_to_polar(center: Point, point: Point) -> (f64, f64) {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let radius = (dx * dx + dy * dy).sqrt();
    let mut angle = rad_to_deg(dx.atan2(-dy));
    if angle < 0.0 {
        angle += 360.0;
    }
    (radius, angle)
}
