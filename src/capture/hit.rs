use crate::geometry::SurfaceReference;
use crate::math::Point3;

/// Orientation class of a tracked surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFacing {
    /// Floors, tables, countertops.
    HorizontalUpward,
    /// Ceilings.
    HorizontalDownward,
    /// Walls.
    Vertical,
}

/// One result of casting a screen tap into the tracked scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// World position of the hit, stable across frames.
    pub position: Point3,
    /// The surface the hit lies on, with its current pose.
    pub surface: SurfaceReference,
    /// Orientation class of that surface.
    pub facing: SurfaceFacing,
    /// Whether the hit lies inside the detected surface boundary.
    pub within_bounds: bool,
}

impl Hit {
    /// Whether the hit lies on a usable floor-like surface.
    #[must_use]
    pub fn is_capturable(&self) -> bool {
        self.facing == SurfaceFacing::HorizontalUpward && self.within_bounds
    }
}

/// Casts screen taps into the tracked scene.
///
/// Implemented by the AR tracking layer. Hits are ordered nearest first.
pub trait HitTester {
    /// Returns every hit under the screen position.
    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<Hit>;
}

impl<F> HitTester for F
where
    F: Fn(f32, f32) -> Vec<Hit>,
{
    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<Hit> {
        self(screen_x, screen_y)
    }
}

/// Picks the nearest capturable hit.
#[must_use]
pub fn select_hit(hits: Vec<Hit>) -> Option<Hit> {
    hits.into_iter().find(Hit::is_capturable)
}
