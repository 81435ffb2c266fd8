use tracing::trace;

use crate::capture::{AnchorSequence, MIN_POLYGON_VERTICES};

use super::{edge_segment, fill_region, OutlineGeometry, OutlineParams, PointMarker};

/// Rebuilds all outline geometry from the current vertices.
///
/// | vertices | markers | edges | closing edge | fill |
/// |---|---|---|---|---|
/// | 0 | 0 | 0 | no | no |
/// | 1 | 1 | 0 | no | no |
/// | 2 | 2 | 1 | no | no |
/// | n ≥ 3 | n | n | yes | yes |
///
/// The result replaces whatever the caller drew previously; nothing is
/// patched incrementally.
#[derive(Debug)]
pub struct BuildOutline<'a> {
    sequence: &'a AnchorSequence,
    params: OutlineParams,
}

impl<'a> BuildOutline<'a> {
    /// Creates a new outline build with default parameters.
    #[must_use]
    pub fn new(sequence: &'a AnchorSequence) -> Self {
        Self {
            sequence,
            params: OutlineParams::default(),
        }
    }

    /// Sets custom outline parameters.
    #[must_use]
    pub fn with_params(mut self, params: OutlineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the build.
    #[must_use]
    pub fn execute(&self) -> OutlineGeometry {
        let (Some(surface), Some(basis)) = (self.sequence.surface(), self.sequence.basis()) else {
            return OutlineGeometry::default();
        };
        let vertices = self.sequence.vertices();
        let n = vertices.len();

        let markers = vertices
            .iter()
            .map(|v| PointMarker {
                position: v.position,
            })
            .collect();

        let edge_count = match n {
            0 | 1 => 0,
            n if n < MIN_POLYGON_VERTICES => n - 1,
            n => n,
        };
        let edges = (0..edge_count)
            .map(|i| {
                let j = (i + 1) % n;
                edge_segment(i, &vertices[i].position, j, &vertices[j].position, &basis)
            })
            .collect();

        let fill = if n >= MIN_POLYGON_VERTICES {
            fill_region(
                self.sequence.positions(),
                &basis,
                surface.pose().rotation,
                self.params.fill_offset,
            )
        } else {
            None
        };

        trace!(vertices = n, edges = edge_count, fill = fill.is_some(), "outline rebuilt");

        OutlineGeometry {
            markers,
            edges,
            fill,
        }
    }
}
