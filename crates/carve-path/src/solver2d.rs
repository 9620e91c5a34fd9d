//! Single-slice shortest path over a 4-connected cost grid.
//!
//! Source is local `(0, 0)`, target local `(width-1, height-1)`. Moving
//! into a cell costs that cell's value; the source itself is free. The
//! frontier is a true min-priority queue with `(x, y)` tie-breaking, so
//! the result is globally optimal and identical across runs.

use std::fmt;

use carve_core::{check_cancel, CancelToken, TraceError};
use carve_field::CostGrid2;

use crate::frontier::{trace_back, Frontier, Node};
use crate::grid_helpers::neighbours_4;

/// A solved slice path.
#[derive(Clone, Debug, PartialEq)]
pub struct Path2 {
    /// Local `(x, y)` cells from source to target, both included.
    pub cells: Vec<(usize, usize)>,
    /// Sum of arrival costs along the path; equals the target's settled
    /// distance.
    pub cost: f64,
}

/// Settled distances rendered as a grid, top row first, in the same layout
/// as [`CostGrid2`]'s `Display`.
struct DistanceMap<'a> {
    width: usize,
    nodes: &'a [Node<(usize, usize)>],
}

impl fmt::Display for DistanceMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.nodes.chunks(self.width).rev() {
            for node in row {
                write!(f, "{:>8.1}", node.distance)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Dijkstra search over a [`CostGrid2`].
#[derive(Clone, Debug, Default)]
pub struct ShortestPathSolver2D {
    cancel: Option<CancelToken>,
}

impl ShortestPathSolver2D {
    /// A solver without cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll `token` once per frontier pop.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Find the cheapest 4-connected path from `(0, 0)` to
    /// `(width-1, height-1)`.
    ///
    /// # Errors
    ///
    /// - [`TraceError::Cancelled`] if the token fires.
    /// - [`TraceError::Unreachable`] if the target never settles. A
    ///   rectangular grid is always connected, so this indicates a broken
    ///   invariant rather than a normal outcome.
    pub fn solve(&self, cost: &CostGrid2) -> Result<Path2, TraceError> {
        let (w, h) = (cost.width(), cost.height());
        let index_of = |(x, y): (usize, usize)| y * w + x;

        let mut nodes = vec![Node::<(usize, usize)>::unreached(); w * h];
        nodes[0].distance = 0.0;

        let mut frontier = Frontier::with_capacity(w * h);
        frontier.push(0.0, (0, 0));

        let mut settled = 0usize;
        while let Some((dist, cell)) = frontier.pop() {
            check_cancel(self.cancel.as_ref())?;
            if nodes[index_of(cell)].is_stale(dist) {
                continue;
            }
            settled += 1;

            let (x, y) = cell;
            for next in neighbours_4(x, y, w, h) {
                let candidate = dist + f64::from(cost.get(next.0, next.1));
                let node = &mut nodes[index_of(next)];
                if candidate < node.distance {
                    node.distance = candidate;
                    node.predecessor = Some(cell);
                    frontier.push(candidate, next);
                }
            }
        }

        tracing::trace!(
            "settled distance map\n{}",
            DistanceMap {
                width: w,
                nodes: &nodes
            }
        );

        let target = (w - 1, h - 1);
        let total = nodes[index_of(target)].distance;
        let unreachable = TraceError::Unreachable {
            width: w,
            height: h,
        };
        if !total.is_finite() {
            tracing::warn!(width = w, height = h, "slice target never settled");
            return Err(unreachable);
        }
        let cells = trace_back(&nodes, index_of, (0, 0), target).ok_or(unreachable)?;

        tracing::debug!(
            width = w,
            height = h,
            settled,
            cost = total,
            length = cells.len(),
            "slice path solved"
        );

        Ok(Path2 { cells, cost: total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arrival_sum(cost: &CostGrid2, path: &Path2) -> f64 {
        path.cells[1..]
            .iter()
            .map(|&(x, y)| f64::from(cost.get(x, y)))
            .sum()
    }

    fn assert_connected(path: &Path2) {
        for pair in path.cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn single_cell_grid() {
        let cost = CostGrid2::filled(1, 1, 7.0).unwrap();
        let path = ShortestPathSolver2D::new().solve(&cost).unwrap();
        assert_eq!(path.cells, vec![(0, 0)]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn uniform_grid_gives_staircase_cost() {
        let cost = CostGrid2::filled(5, 5, 3.0).unwrap();
        let path = ShortestPathSolver2D::new().solve(&cost).unwrap();
        assert_eq!(path.cells.len(), 9);
        assert_eq!(path.cost, 8.0 * 3.0);
        assert_eq!(path.cells.first(), Some(&(0, 0)));
        assert_eq!(path.cells.last(), Some(&(4, 4)));
        assert_connected(&path);
    }

    #[test]
    fn detours_around_an_expensive_wall() {
        // Column x = 1 is expensive except at y = 3.
        let cost = CostGrid2::from_fn(3, 4, |x, y| if x == 1 && y != 3 { 100.0 } else { 1.0 })
            .unwrap();
        let path = ShortestPathSolver2D::new().solve(&cost).unwrap();
        assert!(path.cells.contains(&(1, 3)));
        assert_eq!(path.cost, 5.0);
        assert_eq!(path.cost, arrival_sum(&cost, &path));
    }

    #[test]
    fn follows_a_cheap_row_instead_of_a_staircase() {
        // Row y = 1 is free; everything else costs 10.
        let cost = CostGrid2::from_fn(6, 3, |_, y| if y == 1 { 0.0 } else { 10.0 }).unwrap();
        let path = ShortestPathSolver2D::new().solve(&cost).unwrap();
        assert_eq!(path.cost, 10.0);
        for pair in path.cells.windows(2) {
            if pair[0].1 == pair[1].1 {
                assert_eq!(pair[0].1, 1, "horizontal move off the cheap row: {pair:?}");
            }
        }
    }

    #[test]
    fn may_move_backwards_when_cheaper() {
        // A zero-cost corridor that doubles back toward y = 0 before
        // reaching the target; every other route crosses a 9.
        #[rustfmt::skip]
        let layout = [
            [0.0, 9.0, 0.0, 0.0, 0.0],
            [0.0, 9.0, 0.0, 9.0, 0.0],
            [0.0, 9.0, 0.0, 9.0, 0.0],
            [0.0, 0.0, 0.0, 9.0, 0.0],
        ];
        let cost = CostGrid2::from_fn(5, 4, |x, y| layout[y][x]).unwrap();
        let path = ShortestPathSolver2D::new().solve(&cost).unwrap();
        assert_eq!(path.cost, 0.0);
        assert_eq!(path.cells.len(), 14);
        assert!(path.cells.contains(&(2, 0)));
        assert!(path.cells.contains(&(3, 0)));
        assert_connected(&path);
    }

    #[test]
    fn distance_map_renders_top_row_first() {
        let mut nodes = vec![Node::<(usize, usize)>::unreached(); 4];
        for (node, d) in nodes.iter_mut().zip([0.0, 1.0, 1.0, 2.0]) {
            node.distance = d;
        }
        let map = DistanceMap {
            width: 2,
            nodes: &nodes,
        };
        assert_eq!(
            map.to_string(),
            "     1.0     2.0\n     0.0     1.0\n"
        );
    }

    #[test]
    fn cancelled_token_aborts() {
        let token = CancelToken::new();
        token.cancel();
        let cost = CostGrid2::filled(3, 3, 1.0).unwrap();
        let err = ShortestPathSolver2D::new()
            .with_cancel(token)
            .solve(&cost)
            .unwrap_err();
        assert_eq!(err, TraceError::Cancelled);
    }

    proptest! {
        #[test]
        fn terminates_connected_and_costs_add_up(
            w in 1usize..9,
            h in 1usize..9,
            values in proptest::collection::vec(0.0f32..50.0, 64),
        ) {
            let cost = CostGrid2::from_fn(w, h, |x, y| values[(y * 8 + x) % values.len()]).unwrap();
            let path = ShortestPathSolver2D::new().solve(&cost).unwrap();

            prop_assert_eq!(path.cells.first(), Some(&(0, 0)));
            prop_assert_eq!(path.cells.last(), Some(&(w - 1, h - 1)));
            for pair in path.cells.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
            }
            let sum = arrival_sum(&cost, &path);
            prop_assert!((path.cost - sum).abs() < 1e-6, "cost {} vs sum {}", path.cost, sum);
        }

        #[test]
        fn repeated_solves_are_identical(
            w in 1usize..7,
            h in 1usize..7,
            level in 0u8..3,
        ) {
            // Few distinct values means many ties.
            let cost = CostGrid2::from_fn(w, h, |x, y| ((x * 3 + y * 5) % (level as usize + 1)) as f32)
                .unwrap();
            let solver = ShortestPathSolver2D::new();
            prop_assert_eq!(solver.solve(&cost).unwrap(), solver.solve(&cost).unwrap());
        }
    }
}
