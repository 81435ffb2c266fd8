use crate::capture::AreaUnit;
use crate::error::{ConfigError, Result};
use crate::visualization::{OutlineParams, DEFAULT_FILL_OFFSET};

/// Largest supported number of displayed decimals.
pub const MAX_PRECISION: usize = 6;

/// Settings of a capture session.
///
/// Every constructor validates, deserialization included, so a
/// `CaptureConfig` value always satisfies [`CaptureConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCaptureConfig"))]
pub struct CaptureConfig {
    display_unit: AreaUnit,
    precision: usize,
    fill_offset: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            display_unit: AreaUnit::SquareFeet,
            precision: 2,
            fill_offset: DEFAULT_FILL_OFFSET,
        }
    }
}

/// Unchecked wire form of [`CaptureConfig`]; missing fields take defaults.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawCaptureConfig {
    display_unit: AreaUnit,
    precision: usize,
    fill_offset: f64,
}

#[cfg(feature = "serde")]
impl Default for RawCaptureConfig {
    fn default() -> Self {
        let defaults = CaptureConfig::default();
        Self {
            display_unit: defaults.display_unit,
            precision: defaults.precision,
            fill_offset: defaults.fill_offset,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawCaptureConfig> for CaptureConfig {
    type Error = crate::error::MeasureError;

    fn try_from(raw: RawCaptureConfig) -> Result<Self> {
        Self::new(raw.display_unit, raw.precision, raw.fill_offset)
    }
}

impl CaptureConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` exceeds [`MAX_PRECISION`] or
    /// `fill_offset` is negative or not finite.
    pub fn new(display_unit: AreaUnit, precision: usize, fill_offset: f64) -> Result<Self> {
        let config = Self {
            display_unit,
            precision,
            fill_offset,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy using `unit` for display.
    #[must_use]
    pub fn with_display_unit(mut self, unit: AreaUnit) -> Self {
        self.display_unit = unit;
        self
    }

    /// Returns a copy with a different display precision.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` exceeds [`MAX_PRECISION`].
    pub fn with_precision(mut self, precision: usize) -> Result<Self> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with a different fill lift.
    ///
    /// # Errors
    ///
    /// Returns an error if `fill_offset` is negative or not finite.
    pub fn with_fill_offset(mut self, fill_offset: f64) -> Result<Self> {
        self.fill_offset = fill_offset;
        self.validate()?;
        Ok(self)
    }

    /// Checks every field, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidParameter {
                parameter: "precision",
                reason: format!("{} exceeds maximum of {MAX_PRECISION}", self.precision),
            }
            .into());
        }
        if !self.fill_offset.is_finite() || self.fill_offset < 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "fill_offset",
                reason: format!("{} must be a finite, non-negative length", self.fill_offset),
            }
            .into());
        }
        Ok(())
    }

    /// Unit used for displayed areas.
    #[must_use]
    pub fn display_unit(&self) -> AreaUnit {
        self.display_unit
    }

    /// Decimals used for displayed areas.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Lift of the fill region above the surface, in meters.
    #[must_use]
    pub fn fill_offset(&self) -> f64 {
        self.fill_offset
    }

    /// Outline parameters derived from this configuration.
    #[must_use]
    pub fn outline_params(&self) -> OutlineParams {
        OutlineParams {
            fill_offset: self.fill_offset,
        }
    }
}
