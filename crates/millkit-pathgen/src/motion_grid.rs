//! Motion grid materialization.
//!
//! The grid source hands the generator a lazy sequence of layers, each a
//! lazy sequence of probe lines. The generator needs the total probe count
//! before dispatching any work, because the progress counter is sized from
//! it, so the grid is drained into concrete layers exactly once, up front.
//! That materialization point is deliberate, not an oversight.

use millkit_core::ProbeLine;

/// The probe lines of one layer, sharing a Z or sweep context.
///
/// Order matters for progress accounting only; lines are probed
/// independently.
pub type Layer = Vec<ProbeLine>;

/// A fully materialized motion grid.
#[derive(Debug, Clone, Default)]
pub struct MotionGrid {
    layers: Vec<Layer>,
}

impl MotionGrid {
    /// Drain a lazy layers-of-lines source into a concrete grid.
    pub fn materialize<G, L>(source: G) -> Self
    where
        G: IntoIterator<Item = L>,
        L: IntoIterator<Item = ProbeLine>,
    {
        let layers = source
            .into_iter()
            .map(|layer| layer.into_iter().collect())
            .collect();
        Self { layers }
    }

    /// Total number of probe positions across all layers.
    pub fn position_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Number of layers in the grid.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The materialized layers, in sweep order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl IntoIterator for MotionGrid {
    type Item = Layer;
    type IntoIter = std::vec::IntoIter<Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
