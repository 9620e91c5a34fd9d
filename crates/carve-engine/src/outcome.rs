//! What each tracing call hands back to the caller.

use carve_core::{Point3, Region2, Region3, Voxel};
use carve_path::{Path2, Path3, Seam};

/// Result of a single-slice trace.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceTrace {
    /// The landmark rectangle the search ran in.
    pub region: Region2,
    /// The optimal path in region-local coordinates, with its cost.
    pub path: Path2,
    /// The path's volume voxels, source to target.
    pub seam: Seam,
    /// Largest gradient magnitude in the region before inversion.
    pub max_gradient: f32,
}

/// Result of a multi-slice corridor trace.
#[derive(Clone, Debug, PartialEq)]
pub struct CorridorTrace {
    /// The landmark box the search ran in.
    pub region: Region3,
    /// The optimal path, one local voxel per layer, with its cost.
    pub path: Path3,
    /// Path voxels plus their next-slice neighbours, in path order.
    pub seam: Seam,
}

/// One rank-fusion curve between a landmark pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    /// The landmark box the curve was tracked in.
    pub region: Region3,
    /// Winning voxel of each interior layer, in layer order.
    pub voxels: Vec<Voxel>,
    /// `voxels` in physical units.
    pub points: Vec<Point3>,
}

impl Curve {
    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the curve has no interior points.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

/// The two curves produced by one tracking call, one per landmark pair.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePair {
    /// Curve between the first landmark pair.
    pub first: Curve,
    /// Curve between the second landmark pair.
    pub second: Curve,
}
