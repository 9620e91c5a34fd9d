//! Error types for the Carve boundary tracer.
//!
//! Every fallible engine operation returns [`TraceError`]. All variants are
//! raised before the volume is touched: a failed call never leaves a
//! partially drawn seam behind.

use std::error::Error;
use std::fmt;

use crate::coord::Dims;

/// Errors from region derivation, cost-field construction, path search,
/// and seam marking.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// The bounding box cannot support the requested search.
    InvalidRegion {
        /// What went wrong.
        reason: String,
    },
    /// A voxel index falls outside the volume after spacing conversion.
    OutOfBounds {
        /// The offending `(x, y, z)` index. Non-finite physical input
        /// saturates to `i64::MIN` / `i64::MAX`.
        index: [i64; 3],
        /// Dimensions of the volume the index was checked against.
        dims: Dims,
    },
    /// The 2D target cell was never settled.
    Unreachable {
        /// Region width in cells.
        width: usize,
        /// Region height in cells.
        height: usize,
    },
    /// The last layer of a 3D corridor was never reached: the lateral
    /// window is too narrow for the landmarks' lateral offset.
    DisconnectedCorridor {
        /// Lateral `(x, y)` offset between the two landmarks, in voxels.
        offset: (usize, usize),
        /// Configured lateral search window.
        window: usize,
        /// Number of layers in the corridor.
        layers: usize,
    },
    /// A volume could not be constructed from the supplied shape or data.
    InvalidVolume {
        /// What went wrong.
        reason: String,
    },
    /// A cost grid holds a negative or non-finite value.
    InvalidCost {
        /// What went wrong.
        reason: String,
    },
    /// A [`TraceConfig`](crate::TraceConfig) value failed validation.
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
    /// The attached [`CancelToken`](crate::CancelToken) fired mid-search.
    Cancelled,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion { reason } => write!(f, "invalid region: {reason}"),
            Self::OutOfBounds { index, dims } => write!(
                f,
                "voxel ({}, {}, {}) out of bounds for volume {dims}",
                index[0], index[1], index[2]
            ),
            Self::Unreachable { width, height } => {
                write!(f, "target of {width}x{height} region never settled")
            }
            Self::DisconnectedCorridor {
                offset,
                window,
                layers,
            } => write!(
                f,
                "corridor disconnected: lateral offset ({}, {}) exceeds window {window} \
                 over {layers} layers",
                offset.0, offset.1
            ),
            Self::InvalidVolume { reason } => write!(f, "invalid volume: {reason}"),
            Self::InvalidCost { reason } => write!(f, "invalid cost field: {reason}"),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::Cancelled => write!(f, "trace cancelled"),
        }
    }
}

impl Error for TraceError {}
