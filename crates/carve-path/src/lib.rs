//! Path search and seam marking for the Carve boundary tracer.
//!
//! # Solvers
//!
//! - [`ShortestPathSolver2D`]: Dijkstra over a 4-connected [`CostGrid2`].
//! - [`ShortestPathSolver3D`]: z-monotonic search through a layered
//!   [`CostGrid3`] with a bounded lateral window.
//! - [`RankFusionTracker`]: one voxel per interior layer chosen by summed
//!   energy and centre-distance ranks.
//!
//! All three work in region-local coordinates and charge a cell's cost on
//! arrival. [`Seam`] maps a result back to volume voxels and
//! [`SeamMarker`] writes it, all-or-nothing.
//!
//! [`CostGrid2`]: carve_field::CostGrid2
//! [`CostGrid3`]: carve_field::CostGrid3

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod frontier;
pub(crate) mod grid_helpers;
pub mod rank_fusion;
pub mod seam;
pub mod solver2d;
pub mod solver3d;

pub use frontier::{Frontier, Node};
pub use rank_fusion::RankFusionTracker;
pub use seam::{Seam, SeamMarker};
pub use solver2d::{Path2, ShortestPathSolver2D};
pub use solver3d::{Path3, ShortestPathSolver3D};
