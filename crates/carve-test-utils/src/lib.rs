//! Test utilities and mock volumes for Carve development.
//!
//! Provides synthetic [`DenseVolume`] fixtures and a [`RecordingVolume`]
//! that logs every write, for asserting that failed traces leave the
//! volume untouched.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    bright_column_volume, noise_volume, ridge_row_volume, uniform_volume, RecordingVolume,
};
