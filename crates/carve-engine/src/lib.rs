//! Tracing orchestration for Carve.
//!
//! [`Tracer`] ties the pipeline together for each mode:
//!
//! | Mode | Call | Field | Search |
//! |------|------|-------|--------|
//! | Slice boundary | [`Tracer::trace_slice`] | gradient | 2D Dijkstra |
//! | Corridor | [`Tracer::trace_corridor`] | energy | layered 3D search |
//! | Curve pair | [`Tracer::track_curves`] | energy | rank fusion |
//! | Ribbon | [`Tracer::stitch_ribbon`] | gradient | one 2D solve per pair |
//!
//! Landmarks arrive in physical units; results come back in both voxel and
//! physical form. A failed call never writes to the volume.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod outcome;
pub mod tracer;

pub use outcome::{CorridorTrace, Curve, CurvePair, SliceTrace};
pub use tracer::Tracer;
