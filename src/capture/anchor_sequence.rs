use tracing::debug;

use crate::error::{CaptureError, Result};
use crate::geometry::{PlanarBasis, SurfaceReference};
use crate::math::Point3;

use super::{AreaMeasurement, FinalizedMeasurement, MeasureArea};

/// Minimum number of vertices that encloses an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A captured polygon corner.
///
/// Its index in the owning [`AnchorSequence`] is its only identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The 3D position of the vertex.
    pub position: Point3,
}

impl Vertex {
    /// Creates a new vertex at the given position.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self { position }
    }
}

/// Ordered polygon vertices locked to a single surface.
///
/// The surface is locked by the first accepted point and released only by
/// [`clear`](Self::clear). Removing the last vertex keeps the lock so that a
/// user can undo and immediately re-tap on the same surface.
///
/// Derived values (area, outline geometry) are never cached here; callers
/// recompute them after every successful mutation.
#[derive(Debug, Clone, Default)]
pub struct AnchorSequence {
    surface: Option<SurfaceReference>,
    vertices: Vec<Vertex>,
}

impl AnchorSequence {
    /// Creates an empty, unlocked sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to append a point captured on `surface_of_hit`.
    ///
    /// The first accepted point locks the surface. Afterwards a point on any
    /// other surface (by identity) is rejected and the state is left
    /// unchanged. An accepted point on the locked surface also adopts the
    /// hit's pose, since tracking refines it over time.
    ///
    /// Returns `true` if the point was appended.
    pub fn try_add(&mut self, point: Point3, surface_of_hit: &SurfaceReference) -> bool {
        match &mut self.surface {
            None => {
                debug!(surface = ?surface_of_hit.id(), "surface locked");
                self.surface = Some(surface_of_hit.clone());
            }
            Some(locked) if !locked.same_surface(surface_of_hit) => {
                debug!(
                    locked = ?locked.id(),
                    hit = ?surface_of_hit.id(),
                    "point rejected: different surface"
                );
                return false;
            }
            Some(locked) => locked.set_pose(*surface_of_hit.pose()),
        }
        self.vertices.push(Vertex::new(point));
        debug!(count = self.vertices.len(), "vertex added");
        true
    }

    /// Removes and returns the last vertex, or `None` when empty.
    ///
    /// The surface lock is kept even when the sequence becomes empty.
    pub fn remove_last(&mut self) -> Option<Vertex> {
        let removed = self.vertices.pop();
        if removed.is_some() {
            debug!(count = self.vertices.len(), "vertex removed");
        }
        removed
    }

    /// Removes all vertices and releases the surface lock.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.surface = None;
        debug!("sequence cleared");
    }

    /// Replaces the locked surface's pose with a refined one.
    ///
    /// Returns `false` (and changes nothing) if no surface is locked or
    /// `surface` is a different surface.
    pub fn refine_surface(&mut self, surface: &SurfaceReference) -> bool {
        match &mut self.surface {
            Some(locked) if locked.same_surface(surface) => {
                locked.set_pose(*surface.pose());
                true
            }
            _ => false,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the locked surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&SurfaceReference> {
        self.surface.as_ref()
    }

    /// Returns the vertices in tap order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the vertex positions in tap order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = &Point3> + '_ {
        self.vertices.iter().map(|v| &v.position)
    }

    /// Derives the planar basis of the locked surface.
    #[must_use]
    pub fn basis(&self) -> Option<PlanarBasis> {
        self.surface.as_ref().map(PlanarBasis::from_surface)
    }

    /// Computes the enclosed area from scratch.
    #[must_use]
    pub fn area(&self) -> AreaMeasurement {
        MeasureArea::new(self).execute()
    }

    /// Freezes the polygon into a handoff payload.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InsufficientVertices`] with fewer than
    /// [`MIN_POLYGON_VERTICES`] vertices; a zero-area result is never
    /// produced in that case.
    pub fn finalize(&self) -> Result<FinalizedMeasurement> {
        if self.vertices.len() < MIN_POLYGON_VERTICES {
            return Err(CaptureError::InsufficientVertices {
                count: self.vertices.len(),
                required: MIN_POLYGON_VERTICES,
            }
            .into());
        }
        let measurement = FinalizedMeasurement {
            area: self.area(),
            vertices: self.positions().copied().collect(),
        };
        debug!(
            vertices = measurement.vertices.len(),
            square_meters = measurement.area.square_meters(),
            "polygon finalized"
        );
        Ok(measurement)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MeasureError;
    use crate::geometry::{Pose, SurfaceId};
    use proptest::prelude::*;

    fn surface(id: u64) -> SurfaceReference {
        SurfaceReference::new(SurfaceId(id), Pose::identity())
    }

    fn p(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    #[test]
    fn first_point_locks_surface() {
        let mut seq = AnchorSequence::new();
        assert!(seq.surface().is_none());
        assert!(seq.try_add(p(0.0, 0.0), &surface(1)));
        assert_eq!(seq.surface().unwrap().id(), SurfaceId(1));
        assert_eq!(seq.count(), 1);
    }

    #[test]
    fn rejects_point_on_other_surface() {
        let mut seq = AnchorSequence::new();
        assert!(seq.try_add(p(0.0, 0.0), &surface(1)));
        assert!(!seq.try_add(p(1.0, 0.0), &surface(2)));
        assert_eq!(seq.count(), 1);
        assert_eq!(seq.surface().unwrap().id(), SurfaceId(1));
        assert_eq!(seq.vertices(), &[Vertex::new(p(0.0, 0.0))]);
    }

    #[test]
    fn accepts_same_surface_with_moved_pose() {
        let mut seq = AnchorSequence::new();
        assert!(seq.try_add(p(0.0, 0.0), &surface(1)));
        let moved = SurfaceReference::new(
            SurfaceId(1),
            Pose::translation(0.0, 0.01, 0.0),
        );
        assert!(seq.try_add(p(1.0, 0.0), &moved));
        assert_eq!(seq.count(), 2);
        assert_eq!(seq.surface().unwrap().pose(), moved.pose());
    }

    #[test]
    fn rejected_point_keeps_locked_pose() {
        let mut seq = AnchorSequence::new();
        assert!(seq.try_add(p(0.0, 0.0), &surface(1)));
        let other = SurfaceReference::new(SurfaceId(2), Pose::translation(0.0, 0.5, 0.0));
        assert!(!seq.try_add(p(1.0, 0.0), &other));
        assert_eq!(seq.surface().unwrap().pose(), &Pose::identity());
    }

    #[test]
    fn remove_last_on_empty_is_noop() {
        let mut seq = AnchorSequence::new();
        assert!(seq.remove_last().is_none());
        assert!(seq.surface().is_none());
    }

    #[test]
    fn remove_last_returns_vertices_in_reverse() {
        let mut seq = AnchorSequence::new();
        seq.try_add(p(0.0, 0.0), &surface(1));
        seq.try_add(p(1.0, 0.0), &surface(1));
        assert_eq!(seq.remove_last(), Some(Vertex::new(p(1.0, 0.0))));
        assert_eq!(seq.remove_last(), Some(Vertex::new(p(0.0, 0.0))));
        assert_eq!(seq.remove_last(), None);
    }

    #[test]
    fn undo_to_empty_keeps_surface_lock() {
        let mut seq = AnchorSequence::new();
        seq.try_add(p(0.0, 0.0), &surface(1));
        seq.remove_last();
        assert!(seq.is_empty());
        assert_eq!(seq.surface().unwrap().id(), SurfaceId(1));
        assert!(!seq.try_add(p(0.0, 0.0), &surface(2)));
        assert!(seq.try_add(p(0.0, 0.0), &surface(1)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut seq = AnchorSequence::new();
        seq.try_add(p(0.0, 0.0), &surface(1));
        seq.try_add(p(1.0, 0.0), &surface(1));
        seq.clear();
        assert_eq!(seq.count(), 0);
        assert!(seq.surface().is_none());
        assert!(seq.try_add(p(5.0, 5.0), &surface(2)));
        assert_eq!(seq.surface().unwrap().id(), SurfaceId(2));
    }

    #[test]
    fn refine_surface_replaces_pose_of_same_surface_only() {
        let mut seq = AnchorSequence::new();
        assert!(!seq.refine_surface(&surface(1)));

        seq.try_add(p(0.0, 0.0), &surface(1));
        let refined = SurfaceReference::new(SurfaceId(1), Pose::translation(0.0, 0.0, 2.0));
        assert!(seq.refine_surface(&refined));
        assert_eq!(seq.surface().unwrap(), &refined);

        let other = SurfaceReference::new(SurfaceId(2), Pose::translation(9.0, 9.0, 9.0));
        assert!(!seq.refine_surface(&other));
        assert_eq!(seq.surface().unwrap(), &refined);
    }

    #[test]
    fn finalize_requires_three_vertices() {
        let mut seq = AnchorSequence::new();
        seq.try_add(p(0.0, 0.0), &surface(1));
        seq.try_add(p(1.0, 0.0), &surface(1));
        let err = seq.finalize().unwrap_err();
        assert!(matches!(
            err,
            MeasureError::Capture(CaptureError::InsufficientVertices {
                count: 2,
                required: 3
            })
        ));
    }

    #[test]
    fn finalize_freezes_area_and_positions() {
        let mut seq = AnchorSequence::new();
        for pt in [p(0.0, 0.0), p(2.0, 0.0), p(0.0, 3.0)] {
            seq.try_add(pt, &surface(1));
        }
        let done = seq.finalize().unwrap();
        assert!((done.area.square_meters() - 3.0).abs() < 1e-9);
        assert_eq!(done.vertices, vec![p(0.0, 0.0), p(2.0, 0.0), p(0.0, 3.0)]);
    }

    proptest! {
        #[test]
        fn only_the_locked_surface_is_accepted(
            taps in prop::collection::vec((0u64..4, -5.0f64..5.0, -5.0f64..5.0), 1..32),
        ) {
            let mut seq = AnchorSequence::new();
            let locked = taps[0].0;
            for (id, x, z) in taps {
                let before = seq.vertices().to_vec();
                let accepted = seq.try_add(p(x, z), &surface(id));
                prop_assert_eq!(accepted, id == locked);
                prop_assert_eq!(seq.surface().unwrap().id(), SurfaceId(locked));
                if !accepted {
                    prop_assert_eq!(seq.vertices(), before.as_slice());
                }
            }
        }

        #[test]
        fn remove_last_undoes_try_add(
            pts in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..16),
            extra in (-5.0f64..5.0, -5.0f64..5.0),
        ) {
            let mut seq = AnchorSequence::new();
            for (x, z) in pts {
                seq.try_add(p(x, z), &surface(1));
            }
            let before = seq.vertices().to_vec();
            prop_assert!(seq.try_add(p(extra.0, extra.1), &surface(1)));
            let removed = seq.remove_last();
            prop_assert_eq!(removed, Some(Vertex::new(p(extra.0, extra.1))));
            prop_assert_eq!(seq.vertices(), before.as_slice());
        }
    }
}
