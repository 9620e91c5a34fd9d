//! Z-monotonic shortest path through a multi-slice corridor.
//!
//! The corridor is a layered graph: a node `(x, y)` in layer `k` connects
//! to every `(x', y')` in layer `k + 1` with `|x' - x| <= W` and
//! `|y' - y| <= W`, clipped to the region. Entering a node costs its
//! energy, the same arrival convention as the slice solver; the start
//! voxel is free.
//!
//! Layers are drained in order, each from its own `(distance, x, y)`
//! frontier. Every edge into layer `k + 1` leaves layer `k`, so once a
//! layer is drained its successors are final. This stays exact when
//! energies are negative.

use carve_core::{check_cancel, CancelToken, TraceError};
use carve_field::CostGrid3;

use crate::frontier::{trace_back, Frontier, Node};
use crate::grid_helpers::window_range;

/// A solved corridor path.
#[derive(Clone, Debug, PartialEq)]
pub struct Path3 {
    /// Local `(x, y, layer)` voxels, exactly one per layer, from the start
    /// landmark to the end landmark.
    pub cells: Vec<(usize, usize, usize)>,
    /// Sum of arrival energies along the path.
    pub cost: f64,
}

/// Layered search over a [`CostGrid3`].
#[derive(Clone, Debug)]
pub struct ShortestPathSolver3D {
    window: usize,
    cancel: Option<CancelToken>,
}

impl ShortestPathSolver3D {
    /// A solver allowing lateral moves of up to `window` voxels per layer.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            cancel: None,
        }
    }

    /// Poll `token` once per frontier pop.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The lateral window `W`.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Find the cheapest layer-by-layer path from local `(0, 0, 0)` to
    /// `(width-1, height-1, depth-1)`.
    ///
    /// # Errors
    ///
    /// - [`TraceError::InvalidRegion`] if the grid has fewer than 2 layers.
    /// - [`TraceError::DisconnectedCorridor`] if the window is too narrow
    ///   to reach the end landmark.
    /// - [`TraceError::Cancelled`] if the token fires.
    pub fn solve(&self, energy: &CostGrid3) -> Result<Path3, TraceError> {
        let (w, h, d) = (energy.width(), energy.height(), energy.depth());
        if d < 2 {
            return Err(TraceError::InvalidRegion {
                reason: format!("corridor spans {d} layer(s), at least 2 required"),
            });
        }
        let index_of = |(x, y, k): (usize, usize, usize)| k * w * h + y * w + x;

        let mut nodes = vec![Node::<(usize, usize, usize)>::unreached(); w * h * d];
        nodes[0].distance = 0.0;

        let mut frontier = Frontier::new();
        frontier.push(0.0, (0usize, 0usize));

        for k in 0..d - 1 {
            let mut next = Frontier::new();
            while let Some((dist, (x, y))) = frontier.pop() {
                check_cancel(self.cancel.as_ref())?;
                if nodes[index_of((x, y, k))].is_stale(dist) {
                    continue;
                }
                for ny in window_range(y, self.window, h) {
                    for nx in window_range(x, self.window, w) {
                        let candidate = dist + f64::from(energy.get(nx, ny, k + 1));
                        let node = &mut nodes[index_of((nx, ny, k + 1))];
                        if candidate < node.distance {
                            node.distance = candidate;
                            node.predecessor = Some((x, y, k));
                            next.push(candidate, (nx, ny));
                        }
                    }
                }
            }
            frontier = next;
        }

        let target = (w - 1, h - 1, d - 1);
        let total = nodes[index_of(target)].distance;
        let disconnected = TraceError::DisconnectedCorridor {
            offset: (w - 1, h - 1),
            window: self.window,
            layers: d,
        };
        if !total.is_finite() {
            tracing::warn!(
                width = w,
                height = h,
                depth = d,
                window = self.window,
                "corridor end never reached"
            );
            return Err(disconnected);
        }
        let cells = trace_back(&nodes, index_of, (0, 0, 0), target).ok_or(disconnected)?;

        tracing::debug!(width = w, height = h, depth = d, cost = total, "corridor path solved");

        Ok(Path3 { cells, cost: total })
    }
}
