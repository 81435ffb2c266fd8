use crate::geometry::PlanarBasis;
use crate::math::polygon_2d::{centroid_2d, Bounds2};
use crate::math::{Point3, UnitQuaternion};

use super::FillRegion;

/// Derives the fill region of a polygon on a surface.
///
/// Vertices are projected into `basis`; the region sits at their 2D
/// centroid, re-embedded in 3D and lifted by `offset` along the normal, and
/// spans their bounding extents. Returns `None` for fewer than 3 points.
#[must_use]
pub fn fill_region<'a, I>(
    points: I,
    basis: &PlanarBasis,
    orientation: UnitQuaternion,
    offset: f64,
) -> Option<FillRegion>
where
    I: IntoIterator<Item = &'a Point3>,
{
    let uvs = basis.project_all(points);
    if uvs.len() < 3 {
        return None;
    }
    let centroid_uv = centroid_2d(&uvs)?;
    let bounds = Bounds2::from_points(&uvs)?;
    let position = basis.unproject(&centroid_uv) + basis.normal() * offset;

    Some(FillRegion {
        centroid_uv,
        position,
        orientation,
        extents: bounds.extents(),
    })
}
