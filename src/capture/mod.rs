mod anchor_sequence;
mod area;
mod hit;
mod session;
mod units;

pub use anchor_sequence::{AnchorSequence, Vertex, MIN_POLYGON_VERTICES};
pub use area::{polygon_area_on_basis, AreaMeasurement, MeasureArea};
pub use hit::{select_hit, Hit, HitTester, SurfaceFacing};
pub use session::{CapturePrompt, CaptureSession, Controls, Snapshot, TapOutcome};
pub use units::{AreaUnit, SQUARE_FEET_PER_SQUARE_METER};

use crate::math::Point3;

/// A frozen polygon handed to downstream consumers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalizedMeasurement {
    /// Enclosed area.
    pub area: AreaMeasurement,
    /// Vertex positions in tap order.
    pub vertices: Vec<Point3>,
}
