mod build_outline;
mod edge;
mod fill;

pub use build_outline::BuildOutline;
pub use edge::edge_segment;
pub use fill::fill_region;

use crate::math::{Point2, Point3, UnitQuaternion, Vector2, Vector3};

/// Default lift of the fill region above the surface, in meters.
pub const DEFAULT_FILL_OFFSET: f64 = 0.002;

/// Parameters controlling outline geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineParams {
    /// Distance along the surface normal by which the fill region is lifted.
    pub fill_offset: f64,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            fill_offset: DEFAULT_FILL_OFFSET,
        }
    }
}

/// A marker drawn at one captured vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMarker {
    /// World position of the vertex.
    pub position: Point3,
}

/// A straight outline segment between two consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    /// Index of the start vertex.
    pub start_index: usize,
    /// Index of the end vertex.
    pub end_index: usize,
    /// Midpoint of the segment.
    pub midpoint: Point3,
    /// Unit direction from start to end, within the surface plane.
    pub direction: Vector3,
    /// Segment length in meters, within the surface plane.
    pub length: f64,
    /// Maps local +Z onto the in-surface direction and local +Y onto the
    /// surface normal, so a unit edge model lies flat on the surface.
    pub orientation: UnitQuaternion,
}

impl EdgeSegment {
    /// Whether this segment closes the polygon (last vertex → first).
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.end_index == 0 && self.start_index != 0
    }
}

/// Translucent region covering the polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRegion {
    /// Centroid of the projected vertices in surface coordinates.
    pub centroid_uv: Point2,
    /// World position: centroid lifted along the normal.
    pub position: Point3,
    /// Surface orientation (local +Y is the normal).
    pub orientation: UnitQuaternion,
    /// Bounding extents along the surface U and V axes.
    pub extents: Vector2,
}

/// Everything the renderer needs to draw the current outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineGeometry {
    /// One marker per vertex.
    pub markers: Vec<PointMarker>,
    /// Open edges, plus the closing edge once there are 3+ vertices.
    pub edges: Vec<EdgeSegment>,
    /// Present once there are 3+ vertices.
    pub fill: Option<FillRegion>,
}

impl OutlineGeometry {
    /// Whether the closing edge is part of the outline.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edges.iter().any(EdgeSegment::is_closing)
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
