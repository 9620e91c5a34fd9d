//! Carve: minimal-cost boundary tracing through 3D scalar volumes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Carve sub-crates. For most users, adding `carve` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use carve::prelude::*;
//!
//! // A 7x5 slice with one bright row at y = 2.
//! let mut volume = DenseVolume::from_fn(Dims::new(7, 5, 1), Spacing::unit(), |v| {
//!     if v.y == 2 { 100.0 } else { 0.0 }
//! })
//! .unwrap();
//!
//! let tracer = Tracer::new(TraceConfig::default()).unwrap();
//! let trace = tracer
//!     .trace_slice(&mut volume, Point3::new(0.0, 0.0, 0.0), Point3::new(6.0, 4.0, 0.0))
//!     .unwrap();
//!
//! // The seam hugs the ridge and is burned into the volume.
//! assert_eq!(trace.path.cost, 100.0);
//! let first = trace.seam.iter().next().unwrap();
//! assert_eq!(volume.sample(first), Some(1000.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `carve-core` | Volumes, voxels, regions, config, errors |
//! | [`field`] | `carve-field` | Gradient and energy cost fields |
//! | [`path`] | `carve-path` | Solvers, rank fusion, seams |
//! | [`engine`] | `carve-engine` | The landmark-driven [`engine::Tracer`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, the volume abstraction, and errors (`carve-core`).
pub use carve_core as types;

/// Gradient and energy cost fields (`carve-field`).
pub use carve_field as field;

/// Path solvers, rank fusion, and seam marking (`carve-path`).
///
/// Use these directly to run a solver on a hand-built
/// [`field::CostGrid2`] or [`field::CostGrid3`].
pub use carve_path as path;

/// Tracing orchestration (`carve-engine`).
pub use carve_engine as engine;

/// Common imports for typical Carve usage.
///
/// ```rust
/// use carve::prelude::*;
/// ```
pub mod prelude {
    // Volumes and coordinates
    pub use carve_core::{DenseVolume, Dims, Point3, Spacing, Volume, Voxel};

    // Configuration, cancellation, errors
    pub use carve_core::{CancelToken, TraceConfig, TraceError};

    // Engine
    pub use carve_engine::{CorridorTrace, Curve, CurvePair, SliceTrace, Tracer};

    // Seams
    pub use carve_path::{Seam, SeamMarker};
}
