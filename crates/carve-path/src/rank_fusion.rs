//! Per-layer voxel selection by fused ranking, without graph search.
//!
//! For each interior layer `k` of a corridor every candidate gets two
//! ranks:
//!
//! - energy rank: how many other candidates in the layer have a strictly
//!   greater energy;
//! - distance rank: how many other candidates lie strictly farther (squared
//!   Euclidean) from the layer's expected centre
//!   `(width * t, height * t)`, `t = k / (depth - 1)`.
//!
//! The candidate with the smallest rank sum wins; ties go to the first in
//! row-major order (y outer, x inner). Each layer is ranked independently,
//! so the curve may jump laterally between layers.

use carve_core::{check_cancel, CancelToken, TraceError};
use carve_field::CostGrid3;

/// Number of values in `values` strictly greater than each entry.
fn strictly_greater_counts<T: Copy>(
    values: &[T],
    cmp: impl Fn(&T, &T) -> std::cmp::Ordering,
) -> Vec<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_by(&cmp);
    let n = sorted.len();
    values
        .iter()
        .map(|v| n - sorted.partition_point(|s| cmp(s, v).is_le()))
        .collect()
}

/// Energy rank of every cell of one row-major layer.
pub fn energy_ranks(layer: &[f32]) -> Vec<usize> {
    strictly_greater_counts(layer, |a, b| a.total_cmp(b))
}

/// Distance rank of every cell of a `width x height` layer relative to
/// `center`, in row-major order.
pub fn distance_ranks(width: usize, height: usize, center: (f64, f64)) -> Vec<usize> {
    let mut dist = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - center.0;
            let dy = y as f64 - center.1;
            dist.push(dx * dx + dy * dy);
        }
    }
    strictly_greater_counts(&dist, |a, b| a.total_cmp(b))
}

/// Linear interpolation of the lateral extent at layer `k` of `depth`.
///
/// `depth` must be at least 2.
pub fn expected_center(width: usize, height: usize, k: usize, depth: usize) -> (f64, f64) {
    let t = k as f64 / (depth - 1) as f64;
    (width as f64 * t, height as f64 * t)
}

/// Picks one voxel per interior layer of a [`CostGrid3`].
#[derive(Clone, Debug, Default)]
pub struct RankFusionTracker {
    cancel: Option<CancelToken>,
}

impl RankFusionTracker {
    /// A tracker with no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll `token` once per layer.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Select the winning local `(x, y, k)` of every layer `1..=depth-2`,
    /// in layer order. A two-layer corridor has no interior and yields an
    /// empty curve.
    ///
    /// # Errors
    ///
    /// [`TraceError::InvalidRegion`] if the grid has fewer than 2 layers,
    /// [`TraceError::Cancelled`] if the token fires.
    pub fn track(&self, energy: &CostGrid3) -> Result<Vec<(usize, usize, usize)>, TraceError> {
        let (w, h, d) = (energy.width(), energy.height(), energy.depth());
        if d < 2 {
            return Err(TraceError::InvalidRegion {
                reason: format!("corridor spans {d} layer(s), at least 2 required"),
            });
        }

        let mut winners = Vec::with_capacity(d - 2);
        for k in 1..d - 1 {
            check_cancel(self.cancel.as_ref())?;
            let by_energy = energy_ranks(energy.layer(k));
            let by_distance = distance_ranks(w, h, expected_center(w, h, k, d));

            // `min_by_key` returns the first of equal minima.
            let (best, score) = by_energy
                .iter()
                .zip(&by_distance)
                .map(|(e, r)| e + r)
                .enumerate()
                .min_by_key(|&(_, s)| s)
                .unwrap_or((0, 0));

            tracing::trace!(layer = k, x = best % w, y = best / w, score, "rank fusion winner");
            winners.push((best % w, best / w, k));
        }

        tracing::debug!(width = w, height = h, depth = d, points = winners.len(), "rank fusion tracked");
        Ok(winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn energy_ranks_count_strictly_greater() {
        assert_eq!(energy_ranks(&[5.0, 9.0, 1.0, 7.0]), vec![2, 0, 3, 1]);
        assert_eq!(energy_ranks(&[3.0, 3.0, 1.0]), vec![0, 0, 2]);
    }

    #[test]
    fn distance_ranks_count_strictly_farther() {
        // Centre (1.5, 1.5) of a 3x3 layer: the far corner (0, 0) has no
        // farther neighbour.
        let ranks = distance_ranks(3, 3, (1.5, 1.5));
        assert_eq!(ranks, vec![0, 1, 1, 1, 5, 5, 1, 5, 5]);
    }

    #[test]
    fn expected_center_interpolates_extent() {
        assert_eq!(expected_center(4, 8, 0, 5), (0.0, 0.0));
        assert_eq!(expected_center(4, 8, 2, 5), (2.0, 4.0));
        assert_eq!(expected_center(4, 8, 4, 5), (4.0, 8.0));
    }

    #[test]
    fn equal_energies_defer_to_distance_rank() {
        let energy = CostGrid3::from_fn(3, 3, 3, |_, _, _| 42.0).unwrap();
        let winners = RankFusionTracker::new().track(&energy).unwrap();
        assert_eq!(winners, vec![(0, 0, 1)]);
    }

    #[test]
    fn equal_distances_defer_to_energy_rank() {
        // 2x2 layers with depth 5: layer 1 has centre (0.5, 0.5), the same
        // distance from every cell.
        let layer1 = [5.0, 9.0, 1.0, 7.0];
        let energy = CostGrid3::from_fn(2, 2, 5, |x, y, k| {
            if k == 1 {
                layer1[y * 2 + x]
            } else {
                0.0
            }
        })
        .unwrap();
        let winners = RankFusionTracker::new().track(&energy).unwrap();
        assert_eq!(winners.len(), 3);
        assert_eq!(winners[0], (1, 0, 1));
    }

    #[test]
    fn ties_go_to_first_in_row_major_order() {
        // Layer 1 of a 2x2x5 corridor is centred on (0.5, 0.5), so every
        // distance rank is 0.
        let flat = CostGrid3::from_fn(2, 2, 5, |_, _, _| 0.0).unwrap();
        assert_eq!(RankFusionTracker::new().track(&flat).unwrap()[0], (0, 0, 1));

        let layer1 = [1.0, 5.0, 5.0, 5.0];
        let energy = CostGrid3::from_fn(2, 2, 5, |x, y, k| if k == 1 { layer1[y * 2 + x] } else { 0.0 })
            .unwrap();
        assert_eq!(RankFusionTracker::new().track(&energy).unwrap()[0], (1, 0, 1));
    }

    #[test]
    fn two_layers_have_no_interior() {
        let energy = CostGrid3::from_fn(3, 3, 2, |_, _, _| 1.0).unwrap();
        assert!(RankFusionTracker::new().track(&energy).unwrap().is_empty());
    }

    #[test]
    fn single_layer_is_invalid() {
        let energy = CostGrid3::from_fn(3, 3, 1, |_, _, _| 1.0).unwrap();
        assert!(matches!(
            RankFusionTracker::new().track(&energy),
            Err(TraceError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn cancelled_token_aborts() {
        let token = CancelToken::new();
        token.cancel();
        let energy = CostGrid3::from_fn(2, 2, 4, |_, _, _| 1.0).unwrap();
        assert_eq!(
            RankFusionTracker::new().with_cancel(token).track(&energy),
            Err(TraceError::Cancelled)
        );
    }

    proptest! {
        #[test]
        fn one_winner_per_interior_layer(
            w in 1usize..6,
            h in 1usize..6,
            d in 2usize..8,
            values in proptest::collection::vec(-500.0f32..1500.0, 40),
        ) {
            let energy = CostGrid3::from_fn(w, h, d, |x, y, k| values[(x + 5 * y + 11 * k) % values.len()])
                .unwrap();
            let winners = RankFusionTracker::new().track(&energy).unwrap();
            prop_assert_eq!(winners.len(), d - 2);
            for (i, &(x, y, k)) in winners.iter().enumerate() {
                prop_assert_eq!(k, i + 1);
                prop_assert!(x < w && y < h);
            }
        }

        #[test]
        fn ranks_are_below_candidate_count(values in proptest::collection::vec(-10.0f32..10.0, 1..30)) {
            let ranks = energy_ranks(&values);
            for (i, &r) in ranks.iter().enumerate() {
                let brute = values.iter().filter(|&&v| v > values[i]).count();
                prop_assert_eq!(r, brute);
            }
        }
    }
}
