//! Dense cost grids in region-local coordinates.
//!
//! [`CostGrid2`] is row-major (`index = y * width + x`) and holds only
//! finite, non-negative costs. [`CostGrid3`] stacks layers along z
//! (`index = k * width * height + y * width + x`) and holds finite costs of
//! either sign.

use std::fmt;

use carve_core::TraceError;

fn check_shape(dims: &[usize], len: usize) -> Result<(), TraceError> {
    if dims.iter().any(|&d| d == 0) {
        return Err(TraceError::InvalidRegion {
            reason: format!("cost grid {dims:?} has a zero-length axis"),
        });
    }
    let expected: usize = dims.iter().product();
    if len != expected {
        return Err(TraceError::InvalidRegion {
            reason: format!("cost grid {dims:?} needs {expected} values, got {len}"),
        });
    }
    Ok(())
}

/// Per-cell traversal cost over a 2D region.
#[derive(Clone, Debug, PartialEq)]
pub struct CostGrid2 {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl CostGrid2 {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`TraceError::InvalidRegion`] if the shape is empty or does not
    ///   match `values.len()`.
    /// - [`TraceError::InvalidCost`] if any value is negative or not finite.
    pub fn from_vec(width: usize, height: usize, values: Vec<f32>) -> Result<Self, TraceError> {
        check_shape(&[width, height], values.len())?;
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(TraceError::InvalidCost {
                reason: format!(
                    "cell ({}, {}) has cost {v}, costs must be finite and non-negative",
                    i % width,
                    i / width
                ),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A grid with the same cost everywhere.
    pub fn filled(width: usize, height: usize, cost: f32) -> Result<Self, TraceError> {
        Self::from_vec(width, height, vec![cost; width * height])
    }

    /// Build a grid by evaluating `f(x, y)` at every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, TraceError> {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self::from_vec(width, height, values)
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cost of entering `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        self.values[y * self.width + x]
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Renders rows top-down (highest `y` first), matching how a slice is
/// shown in the viewer.
impl fmt::Display for CostGrid2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{:>8.1}", self.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-voxel traversal cost over a 3D corridor, one layer per slice.
#[derive(Clone, Debug, PartialEq)]
pub struct CostGrid3 {
    width: usize,
    height: usize,
    depth: usize,
    values: Vec<f32>,
}

impl CostGrid3 {
    /// Wrap a layer-major buffer.
    ///
    /// # Errors
    ///
    /// - [`TraceError::InvalidRegion`] if the shape is empty or does not
    ///   match `values.len()`.
    /// - [`TraceError::InvalidCost`] if any value is not finite.
    pub fn from_vec(
        width: usize,
        height: usize,
        depth: usize,
        values: Vec<f32>,
    ) -> Result<Self, TraceError> {
        check_shape(&[width, height, depth], values.len())?;
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            let layer = width * height;
            return Err(TraceError::InvalidCost {
                reason: format!(
                    "voxel ({}, {}, {}) has non-finite cost {}",
                    i % width,
                    (i % layer) / width,
                    i / layer,
                    values[i]
                ),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            values,
        })
    }

    /// Build a grid by evaluating `f(x, y, k)` at every voxel.
    pub fn from_fn(
        width: usize,
        height: usize,
        depth: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self, TraceError> {
        let mut values = Vec::with_capacity(width * height * depth);
        for k in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    values.push(f(x, y, k));
                }
            }
        }
        Self::from_vec(width, height, depth, values)
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cost of entering `(x, y)` in layer `k`.
    ///
    /// # Panics
    ///
    /// Panics if the voxel lies outside the grid.
    pub fn get(&self, x: usize, y: usize, k: usize) -> f32 {
        assert!(
            x < self.width && y < self.height && k < self.depth,
            "({x}, {y}, {k}) outside grid"
        );
        self.values[k * self.width * self.height + y * self.width + x]
    }

    /// Layer `k` as a row-major slice.
    pub fn layer(&self, k: usize) -> &[f32] {
        let n = self.width * self.height;
        &self.values[k * n..(k + 1) * n]
    }
}
