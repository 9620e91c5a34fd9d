//! The [`Tracer`]: landmarks in, seams out.
//!
//! Every operation runs in two phases. The plan phase converts physical
//! landmarks to voxels, builds the cost field, and runs the solver against
//! a read-only [`VolumeView`]. Only when it succeeds does the mark phase
//! write sentinels, so an error never leaves a partial seam behind.
//!
//! `plan_*` methods expose the first phase on its own.

use carve_core::{
    check_cancel, CancelToken, Point3, Region2, Region3, TraceConfig, TraceError, Volume,
    VolumeView, Voxel,
};
use carve_field::{EnergyField, GradientField};
use carve_path::{RankFusionTracker, Seam, SeamMarker, ShortestPathSolver2D, ShortestPathSolver3D};

use crate::outcome::{CorridorTrace, Curve, CurvePair, SliceTrace};

/// Entry point for all tracing modes.
///
/// Holds only configuration; each call borrows the volume for its own
/// duration and keeps nothing afterwards.
#[derive(Clone, Debug)]
pub struct Tracer {
    config: TraceConfig,
    cancel: Option<CancelToken>,
}

impl Tracer {
    /// Create a tracer after validating `config`.
    pub fn new(config: TraceConfig) -> Result<Self, TraceError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Make every solve poll `token`. A cancelled call returns
    /// [`TraceError::Cancelled`] without touching the volume.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    fn marker(&self) -> SeamMarker {
        SeamMarker::new(self.config.sentinel)
    }

    fn solver_2d(&self) -> ShortestPathSolver2D {
        let solver = ShortestPathSolver2D::new();
        match &self.cancel {
            Some(token) => solver.with_cancel(token.clone()),
            None => solver,
        }
    }

    fn solver_3d(&self) -> ShortestPathSolver3D {
        let solver = ShortestPathSolver3D::new(self.config.lateral_window);
        match &self.cancel {
            Some(token) => solver.with_cancel(token.clone()),
            None => solver,
        }
    }

    fn tracker(&self) -> RankFusionTracker {
        let tracker = RankFusionTracker::new();
        match &self.cancel {
            Some(token) => tracker.with_cancel(token.clone()),
            None => tracker,
        }
    }

    // ── Single slice ────────────────────────────────────────────

    /// Solve the boundary between two landmarks on one slice without
    /// marking it.
    ///
    /// # Errors
    ///
    /// [`TraceError::OutOfBounds`] for a landmark outside the volume,
    /// [`TraceError::InvalidRegion`] if the landmarks lie on different
    /// slices, plus any solver error.
    pub fn plan_slice(
        &self,
        volume: &dyn Volume,
        start: Point3,
        end: Point3,
    ) -> Result<SliceTrace, TraceError> {
        check_cancel(self.cancel.as_ref())?;
        let view = VolumeView::new(volume);
        let region = Region2::between(view.voxel_of(start)?, view.voxel_of(end)?)?;
        self.solve_region(&view, region)
    }

    fn solve_region(&self, view: &VolumeView<'_>, region: Region2) -> Result<SliceTrace, TraceError> {
        let field = GradientField::compute(view, &region)?;
        let path = self.solver_2d().solve(&field.to_cost()?)?;
        let seam = Seam::from_slice_path(&region, &path);
        tracing::debug!(
            slice = region.slice(),
            width = region.width(),
            height = region.height(),
            cost = path.cost,
            voxels = seam.len(),
            "slice traced"
        );
        Ok(SliceTrace {
            region,
            path,
            seam,
            max_gradient: field.max(),
        })
    }

    /// Trace the boundary between two landmarks on one slice and mark it
    /// with the sentinel.
    pub fn trace_slice(
        &self,
        volume: &mut dyn Volume,
        start: Point3,
        end: Point3,
    ) -> Result<SliceTrace, TraceError> {
        let trace = self
            .plan_slice(&*volume, start, end)
            .inspect_err(|e| tracing::warn!(error = %e, "slice trace aborted"))?;
        self.marker().mark(volume, &trace.seam)?;
        Ok(trace)
    }

    // ── Corridor ────────────────────────────────────────────────

    /// Solve a z-monotonic path between two landmarks without marking it.
    ///
    /// # Errors
    ///
    /// [`TraceError::OutOfBounds`] for a landmark outside the volume,
    /// [`TraceError::InvalidRegion`] if both landmarks share a slice,
    /// [`TraceError::DisconnectedCorridor`] if the lateral window cannot
    /// bridge their offset.
    pub fn plan_corridor(
        &self,
        volume: &dyn Volume,
        start: Point3,
        end: Point3,
    ) -> Result<CorridorTrace, TraceError> {
        check_cancel(self.cancel.as_ref())?;
        let view = VolumeView::new(volume);
        let region = Region3::between(view.voxel_of(start)?, view.voxel_of(end)?);
        region.require_depth(2)?;

        let energy = EnergyField::new(self.config.energy_bias).compute(&view, &region)?;
        let path = self.solver_3d().solve(&energy)?;
        let seam = Seam::from_corridor_path(&region, &path, view.dimensions());
        tracing::debug!(
            layers = region.depth(),
            window = self.config.lateral_window,
            cost = path.cost,
            voxels = seam.len(),
            "corridor traced"
        );
        Ok(CorridorTrace { region, path, seam })
    }

    /// Trace a corridor and mark every path voxel together with its
    /// neighbour one slice further along the traversal.
    pub fn trace_corridor(
        &self,
        volume: &mut dyn Volume,
        start: Point3,
        end: Point3,
    ) -> Result<CorridorTrace, TraceError> {
        let trace = self
            .plan_corridor(&*volume, start, end)
            .inspect_err(|e| tracing::warn!(error = %e, "corridor trace aborted"))?;
        self.marker().mark(volume, &trace.seam)?;
        Ok(trace)
    }

    // ── Rank fusion ─────────────────────────────────────────────

    fn track_one(&self, view: &VolumeView<'_>, start: Point3, end: Point3) -> Result<Curve, TraceError> {
        let region = Region3::between(view.voxel_of(start)?, view.voxel_of(end)?);
        region.require_depth(2)?;
        let energy = EnergyField::new(self.config.energy_bias).compute(view, &region)?;
        let voxels: Vec<Voxel> = self
            .tracker()
            .track(&energy)?
            .into_iter()
            .map(|(x, y, k)| region.to_global(x, y, k))
            .collect();
        let points = voxels.iter().map(|&v| view.physical_of(v)).collect();
        Ok(Curve {
            region,
            voxels,
            points,
        })
    }

    /// Track one rank-fusion curve per landmark pair without marking.
    ///
    /// Both pairs are converted and tracked before anything is returned;
    /// an error in either fails the whole call.
    pub fn plan_curves(
        &self,
        volume: &dyn Volume,
        first: (Point3, Point3),
        second: (Point3, Point3),
    ) -> Result<CurvePair, TraceError> {
        check_cancel(self.cancel.as_ref())?;
        let view = VolumeView::new(volume);
        let first = self.track_one(&view, first.0, first.1)?;
        let second = self.track_one(&view, second.0, second.1)?;
        tracing::debug!(first = first.len(), second = second.len(), "curves tracked");
        Ok(CurvePair { first, second })
    }

    /// Track both curves and mark each winning voxel.
    pub fn track_curves(
        &self,
        volume: &mut dyn Volume,
        first: (Point3, Point3),
        second: (Point3, Point3),
    ) -> Result<CurvePair, TraceError> {
        let curves = self
            .plan_curves(&*volume, first, second)
            .inspect_err(|e| tracing::warn!(error = %e, "curve tracking aborted"))?;
        let seams = [
            curves.first.voxels.iter().copied().collect::<Seam>(),
            curves.second.voxels.iter().copied().collect::<Seam>(),
        ];
        self.marker().mark_all(volume, &seams)?;
        Ok(curves)
    }

    // ── Ribbon ──────────────────────────────────────────────────

    /// Solve one slice trace per corresponding point pair of `curves`
    /// without marking.
    ///
    /// # Errors
    ///
    /// [`TraceError::InvalidRegion`] if the curves differ in length or a
    /// pair lies on different slices, plus any slice-trace error.
    pub fn plan_ribbon(
        &self,
        volume: &dyn Volume,
        curves: &CurvePair,
    ) -> Result<Vec<SliceTrace>, TraceError> {
        check_cancel(self.cancel.as_ref())?;
        let (a, b) = (&curves.first.voxels, &curves.second.voxels);
        if a.len() != b.len() {
            return Err(TraceError::InvalidRegion {
                reason: format!("ribbon curves have {} and {} points", a.len(), b.len()),
            });
        }
        let view = VolumeView::new(volume);
        let traces = a
            .iter()
            .zip(b)
            .map(|(&from, &to)| self.solve_region(&view, Region2::between(from, to)?))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(strips = traces.len(), "ribbon planned");
        Ok(traces)
    }

    /// Stitch two tracked curves into a ribbon: one slice trace per
    /// corresponding point pair, all marked as one batch after every
    /// solve has succeeded.
    pub fn stitch_ribbon(
        &self,
        volume: &mut dyn Volume,
        curves: &CurvePair,
    ) -> Result<Vec<SliceTrace>, TraceError> {
        let traces = self
            .plan_ribbon(&*volume, curves)
            .inspect_err(|e| tracing::warn!(error = %e, "ribbon stitching aborted"))?;
        let seams: Vec<Seam> = traces.iter().map(|t| t.seam.clone()).collect();
        self.marker().mark_all(volume, &seams)?;
        Ok(traces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_core::{DenseVolume, Dims, Spacing};
    use carve_test_utils::{uniform_volume, RecordingVolume};

    fn recording(dims: Dims, value: f32) -> RecordingVolume {
        RecordingVolume::new(uniform_volume(dims, value))
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TraceConfig {
            sentinel: f32::NAN,
            ..TraceConfig::default()
        };
        assert!(matches!(
            Tracer::new(config),
            Err(TraceError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn slice_landmarks_on_different_slices_are_invalid() {
        let mut vol = recording(Dims::new(4, 4, 2), 0.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let err = tracer
            .trace_slice(&mut vol, Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, TraceError::InvalidRegion { .. }));
        assert!(vol.writes().is_empty());
    }

    #[test]
    fn plan_slice_does_not_write() {
        let mut vol = recording(Dims::new(4, 4, 1), 7.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let planned = tracer
            .plan_slice(&vol, Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 0.0))
            .unwrap();
        assert!(vol.writes().is_empty());
        let traced = tracer
            .trace_slice(&mut vol, Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 0.0))
            .unwrap();
        assert_eq!(planned, traced);
        assert_eq!(vol.writes().len(), traced.seam.len());
    }

    #[test]
    fn spacing_scales_landmarks() {
        let vol = DenseVolume::new(Dims::new(6, 6, 1), Spacing::new(0.5, 0.5, 1.0), 0.0).unwrap();
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let trace = tracer
            .plan_slice(&vol, Point3::new(0.4, 0.2, 0.0), Point3::new(2.9, 1.0, 0.0))
            .unwrap();
        assert_eq!(trace.region.origin(), Voxel::new(0, 0, 0));
        assert_eq!((trace.region.width(), trace.region.height()), (6, 3));
    }

    #[test]
    fn corridor_on_one_slice_is_invalid() {
        let vol = uniform_volume(Dims::new(4, 4, 3), 0.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        assert!(matches!(
            tracer.plan_corridor(&vol, Point3::new(0.0, 0.0, 1.0), Point3::new(3.0, 3.0, 1.0)),
            Err(TraceError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn corridor_marks_path_and_next_slice() {
        let mut vol = recording(Dims::new(1, 1, 4), 0.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let trace = tracer
            .trace_corridor(&mut vol, Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 2.0))
            .unwrap();
        assert_eq!(trace.path.cells.len(), 3);
        // Three path voxels plus z = 3 past the end.
        assert_eq!(trace.seam.len(), 4);
        assert_eq!(vol.inner().get(0, 0, 3), Some(1000.0));
    }

    #[test]
    fn disconnected_corridor_writes_nothing() {
        let mut vol = recording(Dims::new(8, 1, 2), 0.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let err = tracer
            .trace_corridor(&mut vol, Point3::new(0.0, 0.0, 0.0), Point3::new(7.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, TraceError::DisconnectedCorridor { .. }));
        assert!(vol.writes().is_empty());
    }

    #[test]
    fn ribbon_rejects_mismatched_curves() {
        let mut vol = recording(Dims::new(4, 4, 5), 0.0);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        let short = (Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 2.0));
        let long = (Point3::new(3.0, 3.0, 0.0), Point3::new(2.0, 2.0, 4.0));
        let curves = tracer.plan_curves(&vol, short, long).unwrap();
        assert_eq!((curves.first.len(), curves.second.len()), (1, 3));
        assert!(matches!(
            tracer.stitch_ribbon(&mut vol, &curves),
            Err(TraceError::InvalidRegion { .. })
        ));
        assert!(vol.writes().is_empty());
    }
}
