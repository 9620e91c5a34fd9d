//! Landmark-bounded sub-boxes and the local/global coordinate mapping.
//!
//! A region's local origin is always the first landmark. Each axis carries
//! a step of `+1` or `-1` toward the second landmark, so local
//! `(0, 0[, 0])` is the first landmark and local
//! `(width-1, height-1[, depth-1])` is the second, whatever their relative
//! order in the volume.

use crate::coord::Voxel;
use crate::error::TraceError;

/// Step direction along one axis: `+1` when `to >= from`, else `-1`.
fn axis_step(from: usize, to: usize) -> isize {
    if to >= from {
        1
    } else {
        -1
    }
}

fn offset(origin: usize, step: isize, local: usize) -> usize {
    if step > 0 {
        origin + local
    } else {
        origin - local
    }
}

/// A rectangle on one slice bounded by two landmark voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region2 {
    origin: Voxel,
    step: [isize; 2],
    width: usize,
    height: usize,
}

impl Region2 {
    /// Region spanning `first` to `second`, which must share a slice.
    pub fn between(first: Voxel, second: Voxel) -> Result<Self, TraceError> {
        if first.z != second.z {
            return Err(TraceError::InvalidRegion {
                reason: format!(
                    "slice trace landmarks lie on different slices ({} and {})",
                    first.z, second.z
                ),
            });
        }
        Ok(Self {
            origin: first,
            step: [axis_step(first.x, second.x), axis_step(first.y, second.y)],
            width: first.x.abs_diff(second.x) + 1,
            height: first.y.abs_diff(second.y) + 1,
        })
    }

    /// Cells along the local x axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along the local y axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The slice the region lies on.
    pub fn slice(&self) -> usize {
        self.origin.z
    }

    /// The first landmark, local `(0, 0)`.
    pub fn origin(&self) -> Voxel {
        self.origin
    }

    /// Per-axis step direction `(x, y)`.
    pub fn step(&self) -> [isize; 2] {
        self.step
    }

    /// Map a local cell to its volume voxel.
    ///
    /// `x < width` and `y < height` are the caller's responsibility.
    pub fn to_global(&self, x: usize, y: usize) -> Voxel {
        debug_assert!(x < self.width && y < self.height);
        Voxel::new(
            offset(self.origin.x, self.step[0], x),
            offset(self.origin.y, self.step[1], y),
            self.origin.z,
        )
    }
}

/// A box spanning several slices, bounded by two landmark voxels.
///
/// The z axis is the traversal axis: layer `k` is the slice
/// `origin.z ± k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region3 {
    origin: Voxel,
    step: [isize; 3],
    width: usize,
    height: usize,
    depth: usize,
}

impl Region3 {
    /// Region spanning `first` to `second`.
    pub fn between(first: Voxel, second: Voxel) -> Self {
        Self {
            origin: first,
            step: [
                axis_step(first.x, second.x),
                axis_step(first.y, second.y),
                axis_step(first.z, second.z),
            ],
            width: first.x.abs_diff(second.x) + 1,
            height: first.y.abs_diff(second.y) + 1,
            depth: first.z.abs_diff(second.z) + 1,
        }
    }

    /// Cells along the local x axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along the local y axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers along z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The first landmark, local `(0, 0, 0)`.
    pub fn origin(&self) -> Voxel {
        self.origin
    }

    /// Per-axis step direction `(x, y, z)`.
    pub fn step(&self) -> [isize; 3] {
        self.step
    }

    /// Reject boxes with fewer than `min` layers.
    pub fn require_depth(&self, min: usize) -> Result<(), TraceError> {
        if self.depth < min {
            return Err(TraceError::InvalidRegion {
                reason: format!(
                    "corridor spans {} layer(s), at least {min} required",
                    self.depth
                ),
            });
        }
        Ok(())
    }

    /// Map a local `(x, y, layer)` to its volume voxel.
    pub fn to_global(&self, x: usize, y: usize, k: usize) -> Voxel {
        debug_assert!(x < self.width && y < self.height && k < self.depth);
        Voxel::new(
            offset(self.origin.x, self.step[0], x),
            offset(self.origin.y, self.step[1], y),
            offset(self.origin.z, self.step[2], k),
        )
    }

    /// The voxel one slice past `v` in the traversal direction, if that
    /// index is non-negative. Volume bounds are not checked.
    pub fn next_along_z(&self, v: Voxel) -> Option<Voxel> {
        let z = if self.step[2] > 0 {
            v.z.checked_add(1)?
        } else {
            v.z.checked_sub(1)?
        };
        Some(Voxel::new(v.x, v.y, z))
    }
}
