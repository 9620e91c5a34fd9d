//! Gradient-magnitude map over one slice region, and its inversion into
//! an edge-seeking cost grid.
//!
//! ```text
//! dx = (I[x+1, y] - I[x-1, y]) / 2
//! dy = (I[x, y+1] - I[x, y-1]) / 2
//! g  = sqrt(dx^2 + dy^2)
//! cost = max(g) - g
//! ```
//!
//! Stencil neighbours outside the region clamp to the region's edge, so a
//! border cell takes a one-sided difference and nothing outside the
//! declared rectangle is ever sampled.

use carve_core::{Region2, TraceError, VolumeView};

use crate::grid::CostGrid2;
use crate::stencil::clamp_axis;

/// Central-difference gradient magnitudes over a [`Region2`], in local
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    width: usize,
    height: usize,
    magnitude: Vec<f32>,
    max: f32,
}

impl GradientField {
    /// Sample the region from `view` and compute its gradient map.
    ///
    /// Returns [`TraceError::OutOfBounds`] if the region reaches outside
    /// the volume.
    pub fn compute(view: &VolumeView<'_>, region: &Region2) -> Result<Self, TraceError> {
        let (w, h) = (region.width(), region.height());
        let mut intensity = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                intensity.push(view.require(region.to_global(x, y))?);
            }
        }
        Ok(Self::from_intensities(w, h, &intensity))
    }

    /// Compute the gradient map of a row-major intensity patch.
    ///
    /// # Panics
    ///
    /// Panics if `intensity.len() != width * height` or the patch is empty.
    pub fn from_intensities(width: usize, height: usize, intensity: &[f32]) -> Self {
        assert!(width > 0 && height > 0, "empty intensity patch");
        assert_eq!(intensity.len(), width * height, "patch size mismatch");

        let at = |x: isize, y: isize| {
            intensity[clamp_axis(y, height) * width + clamp_axis(x, width)]
        };

        let mut magnitude = Vec::with_capacity(width * height);
        let mut max = 0.0f32;
        for y in 0..height as isize {
            for x in 0..width as isize {
                let dx = (at(x + 1, y) - at(x - 1, y)) / 2.0;
                let dy = (at(x, y + 1) - at(x, y - 1)) / 2.0;
                let g = (dx * dx + dy * dy).sqrt();
                if g > max {
                    max = g;
                }
                magnitude.push(g);
            }
        }

        tracing::trace!(width, height, max_gradient = max, "gradient field computed");

        Self {
            width,
            height,
            magnitude,
            max,
        }
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gradient magnitude at local `(x, y)`.
    pub fn magnitude(&self, x: usize, y: usize) -> f32 {
        self.magnitude[y * self.width + x]
    }

    /// Largest magnitude in the region; 0 for a flat region.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Invert the map: `cost = max - magnitude`. Strong edges become cheap
    /// and flat tissue expensive.
    ///
    /// Returns [`TraceError::InvalidCost`] if the source intensities held
    /// NaN, which leaves the inversion undefined.
    pub fn to_cost(&self) -> Result<CostGrid2, TraceError> {
        let values = self.magnitude.iter().map(|g| self.max - g).collect();
        let cost = CostGrid2::from_vec(self.width, self.height, values)?;
        tracing::trace!("inverted gradient map\n{cost}");
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_core::{DenseVolume, Dims, Spacing, Voxel};
    use carve_test_utils::{ridge_row_volume, uniform_volume};
    use proptest::prelude::*;

    #[test]
    fn uniform_patch_has_zero_gradient_and_cost() {
        let f = GradientField::from_intensities(5, 5, &[40.0; 25]);
        assert_eq!(f.max(), 0.0);
        let cost = f.to_cost().unwrap();
        assert!(cost.as_slice().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn central_difference_on_ramp() {
        // I = 4x: interior dx = (4(x+1) - 4(x-1)) / 2 = 4.
        let patch: Vec<f32> = (0..3)
            .flat_map(|_| (0..4).map(|x| 4.0 * x as f32))
            .collect();
        let f = GradientField::from_intensities(4, 3, &patch);
        assert_eq!(f.magnitude(1, 1), 4.0);
        assert_eq!(f.magnitude(2, 0), 4.0);
        // Border cells clamp: dx = (4 - 0) / 2 = 2.
        assert_eq!(f.magnitude(0, 1), 2.0);
        assert_eq!(f.magnitude(3, 2), 2.0);
        assert_eq!(f.max(), 4.0);
    }

    #[test]
    fn single_cell_region_is_flat() {
        let f = GradientField::from_intensities(1, 1, &[123.0]);
        assert_eq!(f.max(), 0.0);
        assert_eq!(f.to_cost().unwrap().get(0, 0), 0.0);
    }

    #[test]
    fn ridge_row_makes_neighbouring_rows_cheap() {
        // Bright row at volume y = 2; region covers y in 0..=4.
        let vol = ridge_row_volume(Dims::new(7, 5, 1), 2, 0.0, 100.0);
        let view = VolumeView::new(&vol);
        let region = Region2::between(Voxel::new(0, 0, 0), Voxel::new(6, 4, 0)).unwrap();
        let f = GradientField::compute(&view, &region).unwrap();
        assert_eq!(f.max(), 50.0);

        let cost = f.to_cost().unwrap();
        for x in 0..7 {
            assert_eq!(cost.get(x, 1), 0.0);
            assert_eq!(cost.get(x, 3), 0.0);
            assert_eq!(cost.get(x, 0), 50.0);
            assert_eq!(cost.get(x, 2), 50.0);
            assert_eq!(cost.get(x, 4), 50.0);
        }
    }

    #[test]
    fn stencil_never_reads_outside_region() {
        // Everything outside the 3x3 region at (2..=4, 2..=4) is huge; a
        // stencil that leaked would see it.
        let vol = DenseVolume::from_fn(Dims::new(7, 7, 1), Spacing::unit(), |v| {
            if (2..=4).contains(&v.x) && (2..=4).contains(&v.y) {
                10.0
            } else {
                1.0e6
            }
        })
        .unwrap();
        let view = VolumeView::new(&vol);
        let region = Region2::between(Voxel::new(4, 4, 0), Voxel::new(2, 2, 0)).unwrap();
        let f = GradientField::compute(&view, &region).unwrap();
        assert_eq!(f.max(), 0.0);
    }

    #[test]
    fn compute_matches_reversed_landmarks() {
        let vol = carve_test_utils::noise_volume(Dims::new(6, 6, 2), 7, 0.0, 500.0);
        let view = VolumeView::new(&vol);
        let a = Region2::between(Voxel::new(0, 1, 1), Voxel::new(5, 4, 1)).unwrap();
        let b = Region2::between(Voxel::new(5, 4, 1), Voxel::new(0, 1, 1)).unwrap();
        let fa = GradientField::compute(&view, &a).unwrap();
        let fb = GradientField::compute(&view, &b).unwrap();
        assert_eq!(fa.max(), fb.max());
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(fa.magnitude(x, y), fb.magnitude(5 - x, 3 - y));
            }
        }
    }

    #[test]
    fn region_outside_volume_is_reported() {
        let vol = uniform_volume(Dims::new(3, 3, 1), 0.0);
        let view = VolumeView::new(&vol);
        let region = Region2::between(Voxel::new(0, 0, 0), Voxel::new(5, 1, 0)).unwrap();
        assert!(matches!(
            GradientField::compute(&view, &region),
            Err(TraceError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn max_is_true_max_and_costs_non_negative(
            w in 1usize..8,
            h in 1usize..8,
            seed in any::<u64>(),
        ) {
            let vol = carve_test_utils::noise_volume(Dims::new(w, h, 1), seed, -1000.0, 3000.0);
            let view = VolumeView::new(&vol);
            let region = Region2::between(Voxel::new(0, 0, 0), Voxel::new(w - 1, h - 1, 0)).unwrap();
            let f = GradientField::compute(&view, &region).unwrap();

            // Recompute every gradient straight from the volume, clamping
            // stencil reads to the region by hand.
            let at = |x: isize, y: isize| {
                let cx = x.clamp(0, w as isize - 1) as usize;
                let cy = y.clamp(0, h as isize - 1) as usize;
                vol.get(cx, cy, 0).unwrap()
            };
            let mut true_max = 0.0f32;
            for y in 0..h as isize {
                for x in 0..w as isize {
                    let dx = (at(x + 1, y) - at(x - 1, y)) / 2.0;
                    let dy = (at(x, y + 1) - at(x, y - 1)) / 2.0;
                    let g = (dx * dx + dy * dy).sqrt();
                    prop_assert_eq!(f.magnitude(x as usize, y as usize), g);
                    true_max = true_max.max(g);
                }
            }
            prop_assert_eq!(f.max(), true_max);

            let cost = f.to_cost().unwrap();
            prop_assert!(cost.as_slice().iter().all(|&c| c >= 0.0));
        }
    }
}
