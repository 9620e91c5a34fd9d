//! Clamped axis resolution for finite-difference stencils.

/// Resolve a possibly out-of-range axis value by clamping it to
/// `[0, len)`. Stencils built on this never leave their region: a
/// neighbour past the edge reads the edge cell instead.
///
/// `len` must be non-zero.
pub(crate) fn clamp_axis(val: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    if val < 0 {
        0
    } else {
        (val as usize).min(len - 1)
    }
}
