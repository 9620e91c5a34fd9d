//! Synthetic volumes.
//!
//! All fixtures use unit spacing, so physical landmark coordinates equal
//! voxel indices.

use carve_core::{DenseVolume, Dims, Spacing, Volume, Voxel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn build(dims: Dims, f: impl FnMut(Voxel) -> f32) -> DenseVolume {
    DenseVolume::from_fn(dims, Spacing::unit(), f).expect("fixture dims must be non-zero")
}

/// Every voxel holds `value`.
pub fn uniform_volume(dims: Dims, value: f32) -> DenseVolume {
    build(dims, |_| value)
}

/// `background` everywhere except row `y == ridge_y` on every slice,
/// which holds `ridge`.
pub fn ridge_row_volume(dims: Dims, ridge_y: usize, background: f32, ridge: f32) -> DenseVolume {
    build(dims, |v| if v.y == ridge_y { ridge } else { background })
}

/// `background` everywhere except the voxels for which `column(z)`
/// returns `Some((x, y))`, which hold `bright`. Models a bright tube
/// winding through the slices.
pub fn bright_column_volume(
    dims: Dims,
    background: f32,
    bright: f32,
    column: impl Fn(usize) -> Option<(usize, usize)>,
) -> DenseVolume {
    build(dims, |v| match column(v.z) {
        Some((x, y)) if x == v.x && y == v.y => bright,
        _ => background,
    })
}

/// Uniform noise in `[lo, hi)` from a seeded ChaCha8 stream. Identical
/// seeds give bit-identical volumes.
///
/// # Panics
///
/// Panics if `lo >= hi`.
pub fn noise_volume(dims: Dims, seed: u64, lo: f32, hi: f32) -> DenseVolume {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    build(dims, |_| rng.random_range(lo..hi))
}

/// A [`DenseVolume`] wrapper that records every [`annotate`] call.
///
/// [`annotate`]: Volume::annotate
pub struct RecordingVolume {
    inner: DenseVolume,
    writes: Vec<(Voxel, f32)>,
}

impl RecordingVolume {
    pub fn new(inner: DenseVolume) -> Self {
        Self {
            inner,
            writes: Vec::new(),
        }
    }

    /// Every write attempted so far, in call order.
    pub fn writes(&self) -> &[(Voxel, f32)] {
        &self.writes
    }

    pub fn inner(&self) -> &DenseVolume {
        &self.inner
    }

    pub fn into_inner(self) -> DenseVolume {
        self.inner
    }
}

impl Volume for RecordingVolume {
    fn dimensions(&self) -> Dims {
        self.inner.dimensions()
    }

    fn spacing(&self) -> Spacing {
        self.inner.spacing()
    }

    fn sample(&self, v: Voxel) -> Option<f32> {
        self.inner.sample(v)
    }

    fn annotate(&mut self, v: Voxel, value: f32) -> bool {
        self.writes.push((v, value));
        self.inner.annotate(v, value)
    }
}
