//! Cost fields for the Carve boundary tracer.
//!
//! Two field builders turn raw intensities into traversal costs:
//!
//! - [`GradientField`]: central-difference gradient magnitude on one slice,
//!   inverted so that strong edges are cheap ([`CostGrid2`]).
//! - [`EnergyField`]: `bias - intensity` over a multi-slice corridor
//!   ([`CostGrid3`]).
//!
//! Both work in region-local coordinates and never sample outside the
//! region they were given.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod energy;
pub mod gradient;
pub mod grid;
pub(crate) mod stencil;

pub use energy::EnergyField;
pub use gradient::GradientField;
pub use grid::{CostGrid2, CostGrid3};
