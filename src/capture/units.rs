use std::fmt;

/// Square feet in one square meter.
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.7639;

/// Unit used to present an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaUnit {
    /// Metric, m².
    SquareMeters,
    /// Imperial, ft².
    #[default]
    SquareFeet,
}

impl AreaUnit {
    /// Display symbol of the unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::SquareMeters => "m²",
            Self::SquareFeet => "ft²",
        }
    }

    /// Converts a value in square meters into this unit.
    #[must_use]
    pub fn from_square_meters(self, square_meters: f64) -> f64 {
        match self {
            Self::SquareMeters => square_meters,
            Self::SquareFeet => square_meters * SQUARE_FEET_PER_SQUARE_METER,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
