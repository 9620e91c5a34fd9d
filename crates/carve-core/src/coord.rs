//! Voxel indices, physical points, volume dimensions, and spacing.

use std::fmt;

/// Integer index of one voxel inside a volume.
///
/// Ordering is lexicographic on `(x, y, z)` so voxel sets sort
/// deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Voxel {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
    /// Slice index.
    pub z: usize,
}

impl Voxel {
    /// Create a voxel index.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

/// A point in physical (scanner) units, typically millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point3 {
    /// Physical x coordinate.
    pub x: f64,
    /// Physical y coordinate.
    pub y: f64,
    /// Physical z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Create a physical point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Extent of a volume in voxels along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Number of voxels along x.
    pub width: usize,
    /// Number of voxels along y.
    pub height: usize,
    /// Number of slices along z.
    pub depth: usize,
}

impl Dims {
    /// Create a dimension triple.
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Whether `v` lies inside the volume.
    pub fn contains(&self, v: Voxel) -> bool {
        v.x < self.width && v.y < self.height && v.z < self.depth
    }

    /// Convert a signed index to a voxel if it lies inside the volume.
    pub fn checked_voxel(&self, index: [i64; 3]) -> Option<Voxel> {
        let axis = |i: i64, len: usize| -> Option<usize> {
            let i = usize::try_from(i).ok()?;
            (i < len).then_some(i)
        };
        Some(Voxel::new(
            axis(index[0], self.width)?,
            axis(index[1], self.height)?,
            axis(index[2], self.depth)?,
        ))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Physical size of one voxel step along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
    /// Step along x.
    pub x: f64,
    /// Step along y.
    pub y: f64,
    /// Step along z.
    pub z: f64,
}

impl Spacing {
    /// Create a spacing triple.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Unit spacing: physical coordinates equal voxel indices.
    pub const fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Whether every axis is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.z]
            .iter()
            .all(|s| s.is_finite() && *s > 0.0)
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::unit()
    }
}
