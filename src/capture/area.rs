use tracing::trace;

use crate::geometry::PlanarBasis;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point3;

use super::{AnchorSequence, AreaUnit, MIN_POLYGON_VERTICES, SQUARE_FEET_PER_SQUARE_METER};

/// An enclosed area, stored in square meters.
///
/// Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaMeasurement {
    square_meters: f64,
}

impl AreaMeasurement {
    /// The empty area.
    pub const ZERO: Self = Self { square_meters: 0.0 };

    /// Creates a measurement from square meters; the sign is dropped.
    #[must_use]
    pub fn from_square_meters(square_meters: f64) -> Self {
        Self {
            square_meters: square_meters.abs(),
        }
    }

    /// Area in square meters.
    #[must_use]
    pub fn square_meters(&self) -> f64 {
        self.square_meters
    }

    /// Area in square feet.
    #[must_use]
    pub fn square_feet(&self) -> f64 {
        self.square_meters * SQUARE_FEET_PER_SQUARE_METER
    }

    /// Area expressed in `unit`.
    #[must_use]
    pub fn in_unit(&self, unit: AreaUnit) -> f64 {
        unit.from_square_meters(self.square_meters)
    }

    /// Formats the area in `unit` with `precision` decimals, e.g. `"32.29 ft²"`.
    #[must_use]
    pub fn format(&self, unit: AreaUnit, precision: usize) -> String {
        format!("{:.precision$} {}", self.in_unit(unit), unit.symbol())
    }
}

/// Computes the enclosed area of a polygon lying on a surface.
///
/// Vertices are projected into the surface's [`PlanarBasis`] and the
/// shoelace formula is applied over the closed 2D outline. The result is
/// independent of winding order. Fewer than [`MIN_POLYGON_VERTICES`]
/// vertices, or no locked surface, yield exactly zero.
///
/// Self-intersecting or collinear outlines are not rejected; they produce
/// whatever the shoelace sum gives.
pub struct MeasureArea<'a> {
    sequence: &'a AnchorSequence,
}

impl<'a> MeasureArea<'a> {
    /// Creates a new `MeasureArea` query.
    #[must_use]
    pub fn new(sequence: &'a AnchorSequence) -> Self {
        Self { sequence }
    }

    /// Executes the query over the full vertex list.
    #[must_use]
    pub fn execute(&self) -> AreaMeasurement {
        let Some(basis) = self.sequence.basis() else {
            return AreaMeasurement::ZERO;
        };
        let area = polygon_area_on_basis(self.sequence.positions(), &basis);
        trace!(
            vertices = self.sequence.count(),
            square_meters = area.square_meters(),
            "area recomputed"
        );
        area
    }
}

/// Area of an ordered 3D outline after projection into `basis`.
#[must_use]
pub fn polygon_area_on_basis<'a, I>(points: I, basis: &PlanarBasis) -> AreaMeasurement
where
    I: IntoIterator<Item = &'a Point3>,
{
    let uvs = basis.project_all(points);
    if uvs.len() < MIN_POLYGON_VERTICES {
        return AreaMeasurement::ZERO;
    }
    AreaMeasurement::from_square_meters(signed_area_2d(&uvs))
}
