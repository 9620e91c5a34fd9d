//! Intensity-derived energy over a multi-slice corridor.
//!
//! `energy = bias - intensity`: dark voxels are expensive to cross and
//! bright voxels cheap. Intensities above `bias` yield negative energy,
//! which the layered corridor search handles exactly.

use carve_core::{Region3, TraceError, VolumeView};

use crate::grid::CostGrid3;

/// Builds [`CostGrid3`] energy maps over a [`Region3`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyField {
    bias: f32,
}

impl EnergyField {
    /// An energy field with bias `K`.
    pub fn new(bias: f32) -> Self {
        Self { bias }
    }

    /// The bias `K`.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Sample every voxel of `region` and convert it to energy, layer `k`
    /// of the result being layer `k` of the region.
    pub fn compute(&self, view: &VolumeView<'_>, region: &Region3) -> Result<CostGrid3, TraceError> {
        let (w, h, d) = (region.width(), region.height(), region.depth());
        let mut values = Vec::with_capacity(w * h * d);
        for k in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let raw = view.require(region.to_global(x, y, k))?;
                    values.push(self.bias - raw);
                }
            }
        }
        tracing::trace!(width = w, height = h, depth = d, bias = self.bias, "energy field computed");
        CostGrid3::from_vec(w, h, d, values)
    }
}
