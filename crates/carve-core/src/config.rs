//! Engine configuration.

use crate::error::TraceError;

/// Tunable constants shared by every tracing mode.
///
/// All fields are public; start from [`TraceConfig::default`] and override
/// what you need. [`validate`](TraceConfig::validate) runs once when a
/// tracer is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceConfig {
    /// Intensity written into seam voxels. Should sit well outside the
    /// tissue range so the viewer shows it clearly. Default: 1000.
    pub sentinel: f32,
    /// Bias `K` of the 3D energy field, `energy = K - intensity`.
    /// Default: 1000.
    pub energy_bias: f32,
    /// Maximum lateral move per layer, in voxels along x and along y, for
    /// the 3D corridor search. Zero restricts the path to a straight
    /// column. Default: 2.
    pub lateral_window: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            sentinel: 1000.0,
            energy_bias: 1000.0,
            lateral_window: 2,
        }
    }
}

impl TraceConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), TraceError> {
        if !self.sentinel.is_finite() {
            return Err(TraceError::InvalidConfig {
                reason: format!("sentinel must be finite, got {}", self.sentinel),
            });
        }
        if !self.energy_bias.is_finite() {
            return Err(TraceError::InvalidConfig {
                reason: format!("energy_bias must be finite, got {}", self.energy_bias),
            });
        }
        Ok(())
    }
}
