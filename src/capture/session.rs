use tracing::debug;

use crate::config::CaptureConfig;
use crate::error::Result;
use crate::geometry::SurfaceReference;
use crate::math::Point3;
use crate::visualization::{BuildOutline, OutlineGeometry};

use super::hit::select_hit;
use super::{
    AnchorSequence, AreaMeasurement, FinalizedMeasurement, HitTester, MeasureArea, Vertex,
    MIN_POLYGON_VERTICES,
};

/// Derived state after the latest mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Enclosed area; zero below 3 vertices.
    pub area: AreaMeasurement,
    /// Geometry for the renderer.
    pub outline: OutlineGeometry,
}

/// Result of handling a screen tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The point was appended; carries the new vertex count.
    Accepted { count: usize },
    /// The tap hit a surface other than the locked one. Nothing changed.
    WrongSurface,
    /// The tap did not hit a capturable surface. Nothing changed.
    NoSurface,
}

/// Which capture actions are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// At least one vertex exists.
    pub can_undo: bool,
    /// Enough vertices exist to finalize.
    pub can_finish: bool,
}

/// Instruction to show for the current vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePrompt {
    /// Nothing captured yet.
    TapCorners,
    /// Some corners captured; `remaining` more are needed.
    TapMore { remaining: usize },
    /// The outline encloses an area.
    ReadyToFinish,
}

/// One polygon capture, from first tap to finalize.
///
/// Owns the [`AnchorSequence`] and the [`Snapshot`] derived from it. Every
/// successful mutation recomputes the snapshot in full before returning, so
/// reads never observe partially updated state.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    sequence: AnchorSequence,
    config: CaptureConfig,
    snapshot: Snapshot,
}

impl CaptureSession {
    /// Starts an empty session.
    #[must_use]
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            sequence: AnchorSequence::new(),
            config,
            snapshot: Snapshot::default(),
        }
    }

    /// Handles a tap at a screen position.
    pub fn tap<H>(&mut self, tester: &H, screen_x: f32, screen_y: f32) -> TapOutcome
    where
        H: HitTester + ?Sized,
    {
        let Some(hit) = select_hit(tester.hit_test(screen_x, screen_y)) else {
            debug!(screen_x, screen_y, "tap missed capturable surfaces");
            return TapOutcome::NoSurface;
        };
        if self.add_point(hit.position, &hit.surface) {
            TapOutcome::Accepted {
                count: self.sequence.count(),
            }
        } else {
            TapOutcome::WrongSurface
        }
    }

    /// Appends a point captured on `surface`, adopting its current pose.
    ///
    /// Returns `false` if `surface` differs from the locked one.
    pub fn add_point(&mut self, point: Point3, surface: &SurfaceReference) -> bool {
        if !self.sequence.try_add(point, surface) {
            return false;
        }
        self.recompute();
        true
    }

    /// Removes the last vertex, keeping the surface lock.
    pub fn undo(&mut self) -> Option<Vertex> {
        let removed = self.sequence.remove_last()?;
        self.recompute();
        Some(removed)
    }

    /// Discards all vertices and releases the surface lock.
    pub fn clear(&mut self) {
        self.sequence.clear();
        self.recompute();
    }

    /// Applies a refined pose of the locked surface.
    pub fn refine_surface(&mut self, surface: &SurfaceReference) -> bool {
        if !self.sequence.refine_surface(surface) {
            return false;
        }
        self.recompute();
        true
    }

    /// Freezes the polygon for handoff.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than 3 vertices.
    pub fn finalize(&self) -> Result<FinalizedMeasurement> {
        self.sequence.finalize()
    }

    /// Returns the captured vertices.
    #[must_use]
    pub fn sequence(&self) -> &AnchorSequence {
        &self.sequence
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Returns the derived state after the latest mutation.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the current area.
    #[must_use]
    pub fn area(&self) -> AreaMeasurement {
        self.snapshot.area
    }

    /// Returns the current outline geometry.
    #[must_use]
    pub fn outline(&self) -> &OutlineGeometry {
        &self.snapshot.outline
    }

    /// Returns the number of captured vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.sequence.count()
    }

    /// Returns which actions are available.
    #[must_use]
    pub fn controls(&self) -> Controls {
        let count = self.vertex_count();
        Controls {
            can_undo: count >= 1,
            can_finish: count >= MIN_POLYGON_VERTICES,
        }
    }

    /// Returns the instruction for the current state.
    #[must_use]
    pub fn prompt(&self) -> CapturePrompt {
        match self.vertex_count() {
            0 => CapturePrompt::TapCorners,
            n if n < MIN_POLYGON_VERTICES => CapturePrompt::TapMore {
                remaining: MIN_POLYGON_VERTICES - n,
            },
            _ => CapturePrompt::ReadyToFinish,
        }
    }

    /// Formats the area in the configured unit, once it encloses anything.
    #[must_use]
    pub fn display_area(&self) -> Option<String> {
        (self.vertex_count() >= MIN_POLYGON_VERTICES).then(|| {
            self.snapshot
                .area
                .format(self.config.display_unit(), self.config.precision())
        })
    }

    fn recompute(&mut self) {
        self.snapshot = Snapshot {
            area: MeasureArea::new(&self.sequence).execute(),
            outline: BuildOutline::new(&self.sequence)
                .with_params(self.config.outline_params())
                .execute(),
        };
    }
}
