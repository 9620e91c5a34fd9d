//! Core types for the Carve boundary tracer.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! volume abstraction the engine reads from and annotates, landmark
//! regions and their local coordinate frames, the shared configuration,
//! and the error type every other crate returns.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod coord;
pub mod error;
pub mod region;
pub mod volume;

pub use cancel::{check_cancel, CancelToken};
pub use config::TraceConfig;
pub use coord::{Dims, Point3, Spacing, Voxel};
pub use error::TraceError;
pub use region::{Region2, Region3};
pub use volume::{DenseVolume, Volume, VolumeView};
