use crate::math::{Isometry3, Point3, UnitQuaternion, Vector3};

/// Pose of a tracked surface: position of its center and its orientation.
///
/// The surface normal is the pose's local +Y axis; local +X and +Z span
/// the tangent plane.
pub type Pose = Isometry3;

/// Opaque identity of one tracked physical surface.
///
/// Two references denote the same surface iff their ids are equal, no
/// matter how far their poses differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u64);

/// A tracked planar surface: identity plus its current pose.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceReference {
    id: SurfaceId,
    pose: Pose,
}

impl SurfaceReference {
    /// Creates a surface reference.
    #[must_use]
    pub fn new(id: SurfaceId, pose: Pose) -> Self {
        Self { id, pose }
    }

    /// Creates a surface reference from a center position and rotation.
    #[must_use]
    pub fn from_parts(id: SurfaceId, center: Point3, rotation: UnitQuaternion) -> Self {
        Self::new(id, Pose::from_parts(center.coords.into(), rotation))
    }

    /// Returns the surface identity.
    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Returns the surface pose.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Returns the surface center.
    #[must_use]
    pub fn center(&self) -> Point3 {
        Point3::from(self.pose.translation.vector)
    }

    /// Returns the unit normal (pose local +Y).
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.pose.rotation * Vector3::y()
    }

    /// Whether `other` denotes the same physical surface.
    #[must_use]
    pub fn same_surface(&self, other: &SurfaceReference) -> bool {
        self.id == other.id
    }

    pub(crate) fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}
