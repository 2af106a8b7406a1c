//! Core types produced by the layout compiler

use serde::Serialize;

use crate::geometry::{polar_to_cartesian, Point};
use crate::spec::TrackDef;

/// Number of columns in the normalized grid coordinate system
pub const GRID_COLUMNS: f64 = 12.0;

/// Total size of a computed layout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A bounding box in absolute pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// A bounding box expressed in the normalized 12-column grid system, so
/// consumers can lay tracks out independently of absolute pixel size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GridPosition {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Radial band occupied by a circular track within its view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularBand {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl CircularBand {
    /// Radius halfway between the inner and outer edges
    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Angle halfway along the band's angular span
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Cartesian position of the band's midpoint, relative to the bounding
    /// box the ring is drawn in
    pub fn midpoint(&self, bounds: &BoundingBox) -> Point {
        polar_to_cartesian(bounds.center(), self.mid_radius(), self.mid_angle())
    }
}

/// How a track is placed: plain rectangular tiling, or a radial band within
/// a circular view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum Placement {
    Linear,
    Circular(CircularBand),
}

impl Placement {
    pub fn is_circular(&self) -> bool {
        matches!(self, Placement::Circular(_))
    }

    pub fn circular_band(&self) -> Option<&CircularBand> {
        match self {
            Placement::Circular(band) => Some(band),
            Placement::Linear => None,
        }
    }
}

/// Placement record for one physical track slot: a bounding box shared by
/// one or more overlaid track definitions, plus derived grid and circular
/// geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackInfo {
    /// The overlaid track definitions sharing this bounding box
    pub tracks: Vec<TrackDef>,
    pub bounds: BoundingBox,
    pub placement: Placement,
    pub grid: GridPosition,
}

impl TrackInfo {
    pub fn new(tracks: Vec<TrackDef>, bounds: BoundingBox) -> Self {
        Self {
            tracks,
            bounds,
            placement: Placement::Linear,
            // Provisional until the full footprint is known
            grid: GridPosition::default(),
        }
    }

    /// Identifier of the first overlaid track carrying one
    pub fn primary_id(&self) -> Option<&str> {
        self.tracks.iter().find_map(|t| t.id.as_deref())
    }
}

/// Whether a subtree may still claim the circular root
///
/// Threaded down the recursion; once an ancestor claims the root, every
/// descendant sees `Claimed` and no nested circular root can form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircularEligibility {
    Eligible,
    Claimed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let union = a.union(&b);

        assert_eq!(union.x, 0.0);
        assert_eq!(union.y, 0.0);
        assert_eq!(union.width, 150.0);
        assert_eq!(union.height, 150.0);
    }

    #[test]
    fn test_circular_band_midpoints() {
        let band = CircularBand {
            inner_radius: 40.0,
            outer_radius: 60.0,
            start_angle: 0.0,
            end_angle: 180.0,
        };
        assert_eq!(band.mid_radius(), 50.0);
        assert_eq!(band.mid_angle(), 90.0);

        // Mid angle 90 degrees is due east of the center
        let bounds = BoundingBox::new(0.0, 0.0, 200.0, 200.0);
        let p = band.midpoint(&bounds);
        assert!((p.x - 150.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_placement_accessors() {
        let linear = Placement::Linear;
        assert!(!linear.is_circular());
        assert!(linear.circular_band().is_none());

        let circular = Placement::Circular(CircularBand {
            inner_radius: 10.0,
            outer_radius: 20.0,
            start_angle: 0.0,
            end_angle: 90.0,
        });
        assert!(circular.is_circular());
        assert_eq!(circular.circular_band().unwrap().outer_radius, 20.0);
    }
}
