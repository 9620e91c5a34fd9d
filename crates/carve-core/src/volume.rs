//! The [`Volume`] trait, a dense in-memory implementation, and the
//! read-only [`VolumeView`] the engine computes against.

use crate::coord::{Dims, Point3, Spacing, Voxel};
use crate::error::TraceError;

/// A caller-owned 3D scalar volume.
///
/// The engine only ever reads through [`sample`](Volume::sample) and
/// writes through [`annotate`](Volume::annotate). Implementations must keep
/// their shape fixed for the lifetime of a call.
pub trait Volume {
    /// Extent in voxels.
    fn dimensions(&self) -> Dims;

    /// Physical size of one voxel step per axis.
    fn spacing(&self) -> Spacing;

    /// Intensity at `v`, or `None` if `v` lies outside the volume.
    fn sample(&self, v: Voxel) -> Option<f32>;

    /// Overwrite the intensity at `v`. Returns `false` (and writes nothing)
    /// if `v` lies outside the volume.
    fn annotate(&mut self, v: Voxel, value: f32) -> bool;
}

/// Dense volume stored x-fastest, then y, then z.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVolume {
    dims: Dims,
    spacing: Spacing,
    data: Vec<f32>,
}

impl DenseVolume {
    /// Create a volume filled with `fill`.
    ///
    /// Returns `Err(TraceError::InvalidVolume)` if any dimension is zero or
    /// the spacing is not finite and positive.
    pub fn new(dims: Dims, spacing: Spacing, fill: f32) -> Result<Self, TraceError> {
        Self::check_shape(dims, spacing)?;
        Ok(Self {
            dims,
            spacing,
            data: vec![fill; dims.voxel_count()],
        })
    }

    /// Wrap an existing buffer in x-fastest order.
    pub fn from_vec(dims: Dims, spacing: Spacing, data: Vec<f32>) -> Result<Self, TraceError> {
        Self::check_shape(dims, spacing)?;
        if data.len() != dims.voxel_count() {
            return Err(TraceError::InvalidVolume {
                reason: format!(
                    "buffer has {} samples, {dims} needs {}",
                    data.len(),
                    dims.voxel_count()
                ),
            });
        }
        Ok(Self {
            dims,
            spacing,
            data,
        })
    }

    /// Build a volume by evaluating `f` at every voxel.
    pub fn from_fn(
        dims: Dims,
        spacing: Spacing,
        mut f: impl FnMut(Voxel) -> f32,
    ) -> Result<Self, TraceError> {
        Self::check_shape(dims, spacing)?;
        let mut data = Vec::with_capacity(dims.voxel_count());
        for z in 0..dims.depth {
            for y in 0..dims.height {
                for x in 0..dims.width {
                    data.push(f(Voxel::new(x, y, z)));
                }
            }
        }
        Ok(Self {
            dims,
            spacing,
            data,
        })
    }

    fn check_shape(dims: Dims, spacing: Spacing) -> Result<(), TraceError> {
        if dims.width == 0 || dims.height == 0 || dims.depth == 0 {
            return Err(TraceError::InvalidVolume {
                reason: format!("volume {dims} has a zero-length axis"),
            });
        }
        if !spacing.is_valid() {
            return Err(TraceError::InvalidVolume {
                reason: format!(
                    "spacing ({}, {}, {}) must be finite and positive",
                    spacing.x, spacing.y, spacing.z
                ),
            });
        }
        Ok(())
    }

    fn index(&self, v: Voxel) -> usize {
        v.z * self.dims.width * self.dims.height + v.y * self.dims.width + v.x
    }

    /// Intensity at `(x, y, z)`, or `None` outside the volume.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.sample(Voxel::new(x, y, z))
    }

    /// Set the intensity at `(x, y, z)`. Returns `false` outside the volume.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) -> bool {
        self.annotate(Voxel::new(x, y, z), value)
    }

    /// Raw samples in x-fastest order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl Volume for DenseVolume {
    fn dimensions(&self) -> Dims {
        self.dims
    }

    fn spacing(&self) -> Spacing {
        self.spacing
    }

    fn sample(&self, v: Voxel) -> Option<f32> {
        if !self.dims.contains(v) {
            return None;
        }
        Some(self.data[self.index(v)])
    }

    fn annotate(&mut self, v: Voxel, value: f32) -> bool {
        if !self.dims.contains(v) {
            return false;
        }
        let i = self.index(v);
        self.data[i] = value;
        true
    }
}

/// Borrowed, read-only access to a [`Volume`] for the duration of one call.
///
/// Adds the landmark conversions the engine needs on top of raw sampling.
#[derive(Clone, Copy)]
pub struct VolumeView<'a> {
    volume: &'a dyn Volume,
    dims: Dims,
    spacing: Spacing,
}

impl<'a> VolumeView<'a> {
    /// Borrow `volume` for reading.
    pub fn new(volume: &'a dyn Volume) -> Self {
        Self {
            volume,
            dims: volume.dimensions(),
            spacing: volume.spacing(),
        }
    }

    /// Extent in voxels.
    pub fn dimensions(&self) -> Dims {
        self.dims
    }

    /// Physical voxel spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Bounds-checked sample.
    pub fn sample(&self, v: Voxel) -> Option<f32> {
        self.volume.sample(v)
    }

    /// Bounds-checked sample that reports a miss as
    /// [`TraceError::OutOfBounds`].
    pub fn require(&self, v: Voxel) -> Result<f32, TraceError> {
        self.sample(v).ok_or_else(|| TraceError::OutOfBounds {
            index: [v.x as i64, v.y as i64, v.z as i64],
            dims: self.dims,
        })
    }

    /// Convert a physical point to the voxel containing it.
    ///
    /// Each axis is divided by its spacing and truncated toward zero, so
    /// points in `(-spacing, 0)` land on index 0. Anything that truncates
    /// outside the volume, including non-finite input, is
    /// [`TraceError::OutOfBounds`].
    pub fn voxel_of(&self, p: Point3) -> Result<Voxel, TraceError> {
        let index = [
            truncate_axis(p.x / self.spacing.x),
            truncate_axis(p.y / self.spacing.y),
            truncate_axis(p.z / self.spacing.z),
        ];
        self.dims
            .checked_voxel(index)
            .ok_or(TraceError::OutOfBounds {
                index,
                dims: self.dims,
            })
    }

    /// Physical position of a voxel's origin corner.
    pub fn physical_of(&self, v: Voxel) -> Point3 {
        Point3::new(
            v.x as f64 * self.spacing.x,
            v.y as f64 * self.spacing.y,
            v.z as f64 * self.spacing.z,
        )
    }
}

// `as` saturates on overflow and infinities; NaN would silently become 0.
fn truncate_axis(q: f64) -> i64 {
    if q.is_nan() {
        i64::MIN
    } else {
        q.trunc() as i64
    }
}
