mod planar_basis;
mod surface;

pub use planar_basis::PlanarBasis;
pub use surface::{Pose, SurfaceId, SurfaceReference};
