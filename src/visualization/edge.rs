use crate::geometry::PlanarBasis;
use crate::math::{Point3, UnitQuaternion, Vector3, TOLERANCE};

use super::EdgeSegment;

/// Builds the segment from `points[start_index]` to `points[end_index]`.
///
/// Direction and length are measured in the surface plane, with any height
/// difference between the endpoints dropped, so the edge never tilts out of
/// the surface and `orientation * Z * length` spans it. Coincident endpoints
/// give a zero-length edge whose direction falls back to the basis U axis.
#[must_use]
pub fn edge_segment(
    start_index: usize,
    start: &Point3,
    end_index: usize,
    end: &Point3,
    basis: &PlanarBasis,
) -> EdgeSegment {
    let normal = basis.normal();
    let delta = end - start;
    let in_plane = delta - normal * delta.dot(normal);
    let length = in_plane.norm();
    let midpoint = Point3::from((start.coords + end.coords) * 0.5);

    let direction = if length < TOLERANCE {
        *basis.u_dir()
    } else {
        in_plane / length
    };

    EdgeSegment {
        start_index,
        end_index,
        midpoint,
        direction,
        length,
        orientation: orientation_along(&direction, normal),
    }
}

/// Rotation taking local +Z to `facing` and local +Y to `up`.
fn orientation_along(facing: &Vector3, up: &Vector3) -> UnitQuaternion {
    UnitQuaternion::face_towards(facing, up)
}
