use crate::math::{Point2, Point3, Vector3};

use super::{Pose, SurfaceReference};

/// An orthonormal 2D coordinate frame embedded in a surface.
///
/// Derived from the surface pose only: `origin` is the pose position,
/// `u_dir` and `v_dir` are the pose's local +X and +Z axes, and the normal is
/// local +Y. Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
///
/// The pose is assumed to be a valid rigid transform; no degenerate-input
/// handling is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarBasis {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl PlanarBasis {
    /// Derives the basis of a surface pose.
    #[must_use]
    pub fn from_pose(pose: &Pose) -> Self {
        let rotation = pose.rotation;
        Self {
            origin: Point3::from(pose.translation.vector),
            u_dir: rotation * Vector3::x(),
            v_dir: rotation * Vector3::z(),
            normal: rotation * Vector3::y(),
        }
    }

    /// Derives the basis of a surface reference.
    #[must_use]
    pub fn from_surface(surface: &SurfaceReference) -> Self {
        Self::from_pose(surface.pose())
    }

    /// Returns the origin point of the basis.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the surface normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Projects a 3D point onto the UV coordinates of the basis.
    ///
    /// Any offset along the normal is discarded.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Projects every point, preserving order.
    #[must_use]
    pub fn project_all<'a, I>(&self, points: I) -> Vec<Point2>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        points.into_iter().map(|p| self.project(p)).collect()
    }

    /// Maps UV coordinates back onto the surface.
    #[must_use]
    pub fn unproject(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SurfaceId;
    use crate::math::{UnitQuaternion, TOLERANCE};
    use approx::assert_relative_eq;

    fn tilted_pose() -> Pose {
        let rotation = UnitQuaternion::from_euler_angles(0.4, -1.1, 0.7);
        Pose::from_parts(Vector3::new(1.5, -0.25, 3.0).into(), rotation)
    }

    #[test]
    fn identity_pose_uses_x_and_z() {
        let basis = PlanarBasis::from_pose(&Pose::identity());
        assert_relative_eq!(*basis.u_dir(), Vector3::x());
        assert_relative_eq!(*basis.v_dir(), Vector3::z());
        assert_relative_eq!(*basis.normal(), Vector3::y());
        assert_relative_eq!(*basis.origin(), Point3::origin());
    }

    #[test]
    fn axes_are_orthonormal() {
        let basis = PlanarBasis::from_pose(&tilted_pose());
        assert!((basis.u_dir().norm() - 1.0).abs() < 1e-12);
        assert!((basis.v_dir().norm() - 1.0).abs() < 1e-12);
        assert!(basis.u_dir().dot(basis.v_dir()).abs() < 1e-12);
        assert!(basis.u_dir().dot(basis.normal()).abs() < 1e-12);
        assert!(basis.v_dir().dot(basis.normal()).abs() < 1e-12);
    }

    #[test]
    fn deterministic_for_same_pose() {
        let pose = tilted_pose();
        assert_eq!(PlanarBasis::from_pose(&pose), PlanarBasis::from_pose(&pose));
    }

    #[test]
    fn project_unproject_round_trip_on_surface() {
        let basis = PlanarBasis::from_pose(&tilted_pose());
        let uv = Point2::new(0.75, -2.0);
        let world = basis.unproject(&uv);
        let back = basis.project(&world);
        assert_relative_eq!(back, uv, epsilon = 1e-12);
    }

    #[test]
    fn project_discards_normal_offset() {
        let basis = PlanarBasis::from_pose(&tilted_pose());
        let on_surface = basis.unproject(&Point2::new(1.0, 1.0));
        let lifted = on_surface + basis.normal() * 0.5;
        assert_relative_eq!(basis.project(&lifted), Point2::new(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn origin_projects_to_zero() {
        let surface = SurfaceReference::new(SurfaceId(9), tilted_pose());
        let basis = PlanarBasis::from_surface(&surface);
        let uv = basis.project(&surface.center());
        assert!(uv.coords.norm() < TOLERANCE);
    }

    #[test]
    fn project_all_keeps_order() {
        let basis = PlanarBasis::from_pose(&Pose::identity());
        let pts = [Point3::new(1.0, 0.0, 2.0), Point3::new(-3.0, 5.0, 4.0)];
        let uvs = basis.project_all(&pts);
        assert_eq!(uvs, vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 4.0)]);
    }
}
