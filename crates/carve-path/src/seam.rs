//! Seams: the volume voxels a traced path covers, and the sentinel writer
//! that burns them into the volume.

use carve_core::{Dims, Region2, Region3, TraceError, Volume, Voxel};
use indexmap::IndexSet;

use crate::solver2d::Path2;
use crate::solver3d::Path3;

/// An ordered, duplicate-free set of volume voxels.
///
/// Order is first insertion, so a seam built from a path lists its voxels
/// from source to target, and two seams are equal only when they list the
/// same voxels in the same order.
#[derive(Clone, Debug, Default)]
pub struct Seam {
    voxels: IndexSet<Voxel>,
}

impl Seam {
    /// An empty seam.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a slice path back to volume voxels.
    pub fn from_slice_path(region: &Region2, path: &Path2) -> Self {
        path.cells
            .iter()
            .map(|&(x, y)| region.to_global(x, y))
            .collect()
    }

    /// Map a corridor path back to volume voxels, adding each voxel's
    /// neighbour one slice further along the traversal direction when it
    /// lies inside `dims`.
    pub fn from_corridor_path(region: &Region3, path: &Path3, dims: Dims) -> Self {
        let mut seam = Self::new();
        for &(x, y, k) in &path.cells {
            let v = region.to_global(x, y, k);
            seam.push(v);
            if let Some(next) = region.next_along_z(v).filter(|n| dims.contains(*n)) {
                seam.push(next);
            }
        }
        seam
    }

    /// Append `v` unless already present. Returns whether it was new.
    pub fn push(&mut self, v: Voxel) -> bool {
        self.voxels.insert(v)
    }

    /// Whether `v` is part of the seam.
    pub fn contains(&self, v: Voxel) -> bool {
        self.voxels.contains(&v)
    }

    /// Number of distinct voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the seam is empty.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Voxels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.voxels.iter().copied()
    }

    /// The voxels as an owned vector, in insertion order.
    pub fn to_vec(&self) -> Vec<Voxel> {
        self.iter().collect()
    }
}

impl PartialEq for Seam {
    fn eq(&self, other: &Self) -> bool {
        self.voxels.iter().eq(other.voxels.iter())
    }
}

impl Eq for Seam {}

impl FromIterator<Voxel> for Seam {
    fn from_iter<I: IntoIterator<Item = Voxel>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}

impl Extend<Voxel> for Seam {
    fn extend<I: IntoIterator<Item = Voxel>>(&mut self, iter: I) {
        self.voxels.extend(iter);
    }
}

/// Writes a sentinel intensity along a [`Seam`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeamMarker {
    sentinel: f32,
}

impl SeamMarker {
    /// A marker writing `sentinel`.
    pub fn new(sentinel: f32) -> Self {
        Self { sentinel }
    }

    /// The value written.
    pub fn sentinel(&self) -> f32 {
        self.sentinel
    }

    /// Check every voxel of `seams` against `dims` without writing.
    pub fn validate<'s>(
        dims: Dims,
        seams: impl IntoIterator<Item = &'s Seam>,
    ) -> Result<(), TraceError> {
        for seam in seams {
            if let Some(v) = seam.iter().find(|v| !dims.contains(*v)) {
                return Err(TraceError::OutOfBounds {
                    index: [v.x as i64, v.y as i64, v.z as i64],
                    dims,
                });
            }
        }
        Ok(())
    }

    /// Write the sentinel into every voxel of `seam`, returning the number
    /// written.
    ///
    /// Every voxel is bounds-checked first; on
    /// [`TraceError::OutOfBounds`] the volume is left untouched.
    pub fn mark<V: Volume + ?Sized>(&self, volume: &mut V, seam: &Seam) -> Result<usize, TraceError> {
        self.mark_all(volume, std::slice::from_ref(seam))
    }

    /// Write several seams as one all-or-nothing batch.
    pub fn mark_all<V: Volume + ?Sized>(
        &self,
        volume: &mut V,
        seams: &[Seam],
    ) -> Result<usize, TraceError> {
        let dims = volume.dimensions();
        Self::validate(dims, seams)?;
        let mut written = 0;
        for v in seams.iter().flat_map(Seam::iter) {
            if volume.annotate(v, self.sentinel) {
                written += 1;
            }
        }
        tracing::debug!(voxels = written, seams = seams.len(), sentinel = self.sentinel, "seam marked");
        Ok(written)
    }
}
