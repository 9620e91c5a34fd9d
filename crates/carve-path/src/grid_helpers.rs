//! Shared grid-topology helpers for the solvers.

use smallvec::SmallVec;

/// The 4-connected neighbours of `(x, y)` inside a `width x height` grid,
/// in the order +y, -x, +x, -y. Cells on the border have fewer neighbours.
pub(crate) fn neighbours_4(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> SmallVec<[(usize, usize); 4]> {
    let mut result = SmallVec::new();
    if y + 1 < height {
        result.push((x, y + 1));
    }
    if x > 0 {
        result.push((x - 1, y));
    }
    if x + 1 < width {
        result.push((x + 1, y));
    }
    if y > 0 {
        result.push((x, y - 1));
    }
    result
}

/// Inclusive `[lo, hi]` range of `c ± window` clipped to `[0, len)`.
pub(crate) fn window_range(c: usize, window: usize, len: usize) -> std::ops::RangeInclusive<usize> {
    c.saturating_sub(window)..=c.saturating_add(window).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_center() {
        let nbs = neighbours_4(1, 1, 3, 3);
        assert_eq!(nbs.as_slice(), &[(1, 2), (0, 1), (2, 1), (1, 0)]);
    }

    #[test]
    fn neighbours_corner() {
        let nbs = neighbours_4(0, 0, 3, 3);
        assert_eq!(nbs.as_slice(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn neighbours_single_cell() {
        assert!(neighbours_4(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn window_clips_both_sides() {
        assert_eq!(window_range(0, 2, 10), 0..=2);
        assert_eq!(window_range(5, 2, 10), 3..=7);
        assert_eq!(window_range(9, 2, 10), 7..=9);
        assert_eq!(window_range(3, 0, 10), 3..=3);
        assert_eq!(window_range(3, usize::MAX, 5), 0..=4);
    }
}
