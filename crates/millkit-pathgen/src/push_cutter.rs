//! Layered push-cutter toolpath generation.
//!
//! Sweeps a motion grid layer by layer, probing every line for
//! collision-free travel and folding the free intervals into either a flat
//! cut/retract move list or, in waterline mode, into contour polylines that
//! are post-processed into obstacle-checked cutting segments.
//!
//! Parallelism is confined to the probes of a single layer: the driver and
//! the fold run on the calling thread, so the contour builder and the
//! progress counter are never touched concurrently.

use crate::collision::{
    check_free_paths, subdivision_depth, Cutter, PhysicsSolver, TriangleSolver, DEFAULT_ACCURACY,
};
use crate::contour::ContourBuilder;
use crate::motion_grid::{Layer, MotionGrid};
use crate::parallel::{default_workers, map_ordered};
use anyhow::{Context, Result};
use millkit_core::{
    Move, Point3D, ProbeLine, ProgressCounter, StatusCallback, StatusUpdate, Toolpath,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Parameters for push-cutter generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCutterParams {
    /// Trace waterline contours instead of emitting raw swept cut lines
    pub waterlines: bool,
    /// Scaling constant for the per-line subdivision depth
    pub accuracy: f64,
    /// Worker threads for probing one layer; 0 selects the hardware default
    pub worker_threads: usize,
    /// Lower Z bound of the sweep, recorded for reference only
    pub min_z: Option<f64>,
    /// Upper Z bound of the sweep, recorded for reference only
    pub max_z: Option<f64>,
}

impl Default for PushCutterParams {
    fn default() -> Self {
        Self {
            waterlines: false,
            accuracy: DEFAULT_ACCURACY,
            worker_threads: 0,
            min_z: None,
            max_z: None,
        }
    }
}

/// One probe line queued for dispatch. The models, tool, and solver are
/// shared by the whole layer and travel through the dispatch closure.
#[derive(Debug, Clone, Copy)]
struct LineJob {
    line: ProbeLine,
    depth: u32,
}

/// Outcome of one slice: the moves produced in flat mode (empty in
/// waterline mode, where state lives in the contour builder) and whether
/// the callback asked to stop.
struct SliceOutcome {
    moves: Vec<Move>,
    cancelled: bool,
}

/// Push-cutter toolpath generator.
///
/// Probes are dispatched to the physics solver when one is supplied and to
/// the triangle solver otherwise. The waterline post-processing pass always
/// uses the triangle solver.
pub struct PushCutter<'a, M> {
    params: PushCutterParams,
    triangles: &'a dyn TriangleSolver<M>,
    physics: Option<&'a dyn PhysicsSolver>,
    contour: Option<ContourBuilder>,
}

impl<'a, M: Sync> PushCutter<'a, M> {
    /// Create a generator backed by `triangles`, optionally routing the
    /// sweep through `physics` instead.
    pub fn new(
        params: PushCutterParams,
        triangles: &'a dyn TriangleSolver<M>,
        physics: Option<&'a dyn PhysicsSolver>,
    ) -> Self {
        if physics.is_some() {
            debug!("starting push cutter (physics solver)");
        } else {
            debug!("starting push cutter (triangle solver)");
        }
        Self {
            params,
            triangles,
            physics,
            contour: None,
        }
    }

    /// Generate the toolpath for `grid` against `models`.
    ///
    /// The first model is the surface being cut; any further models are
    /// obstacles. The grid source is materialized once, up front, so the
    /// progress counter can be sized from the total probe count. A
    /// cancellation request from `callback` stops the sweep and returns the
    /// moves accumulated so far.
    pub fn generate_toolpath<G, L>(
        &mut self,
        tool: &dyn Cutter,
        models: &[M],
        grid: G,
        callback: Option<StatusCallback>,
    ) -> Result<Toolpath>
    where
        G: IntoIterator<Item = L>,
        L: IntoIterator<Item = ProbeLine>,
    {
        let grid = MotionGrid::materialize(grid);
        let num_layers = grid.layer_count();
        debug!(
            "generating push-cutter toolpath: {} layers, {} probe positions, z bounds {:?}..{:?}",
            num_layers,
            grid.position_count(),
            self.params.min_z,
            self.params.max_z
        );

        let mut counter = ProgressCounter::new(grid.position_count(), callback.clone());
        self.contour = self.params.waterlines.then(ContourBuilder::new);

        let mut path = Toolpath::new();
        for (index, layer) in grid.layers().iter().enumerate() {
            let text = format!("processing layer {}/{}", index + 1, num_layers);
            let boundary = StatusUpdate {
                text: Some(&text),
                percent: Some(counter.percent()),
                ..StatusUpdate::default()
            };
            if invoke(callback.as_ref(), &boundary) {
                debug!("push cutter cancelled before layer {}", index + 1);
                break;
            }

            if let Some(contour) = self.contour.as_mut() {
                contour.new_direction(0);
            }
            let outcome = self
                .generate_slice(tool, models, layer, callback.as_ref(), &mut counter)
                .with_context(|| format!("push cutter failed in layer {}/{}", index + 1, num_layers))?;
            if let Some(contour) = self.contour.as_mut() {
                contour.end_direction();
                contour.finish();
            }

            path.extend(outcome.moves);
            if outcome.cancelled {
                debug!("push cutter cancelled in layer {}", index + 1);
                break;
            }
        }

        if self.params.waterlines {
            self.waterline_moves(tool, models)
        } else {
            Ok(path)
        }
    }

    /// Probe one layer and fold its free intervals.
    ///
    /// In flat mode every free interval becomes a cut pass followed by a
    /// retract; in waterline mode each result is fed to the contour builder
    /// as one scan-line. Results are folded in probe order.
    fn generate_slice(
        &mut self,
        tool: &dyn Cutter,
        models: &[M],
        layer: &Layer,
        callback: Option<&StatusCallback>,
        counter: &mut ProgressCounter,
    ) -> millkit_core::Result<SliceOutcome> {
        let waterlines = self.params.waterlines;
        // The contour builder only handles one model at a time; obstacle
        // models are applied after the sweep.
        let models = if waterlines && !models.is_empty() {
            &models[..1]
        } else {
            models
        };

        let triangles = self.triangles;
        let physics = self.physics;
        let accuracy = self.params.accuracy;
        let radius = tool.radius();
        let workers = match self.params.worker_threads {
            0 => default_workers(),
            n => n,
        };

        let jobs: Vec<LineJob> = layer
            .iter()
            .map(|&line| LineJob {
                line,
                depth: subdivision_depth(accuracy, line.length(), radius),
            })
            .collect();

        let probe = |job: &LineJob| -> millkit_core::Result<Vec<Point3D>> {
            if job.line.length() == 0.0 {
                // Degenerate probes would blow up the solvers; treat them
                // as fully blocked.
                warn!("skipping zero-length probe line at {}", job.line.start);
                return Ok(Vec::new());
            }
            let points = match physics {
                Some(solver) => solver.free_paths(&job.line, job.depth)?,
                None => triangles.free_paths(models, tool, &job.line)?,
            };
            check_free_paths(points)
        };

        let mut contour = self.contour.as_mut();
        let mut moves: Vec<Move> = Vec::new();
        let mut cancelled = false;

        map_ordered(&jobs, workers, probe, |_, points| {
            if !points.is_empty() {
                match contour.as_deref_mut() {
                    Some(builder) => {
                        builder.new_scanline();
                        for &point in &points {
                            builder.append(point);
                        }
                        builder.end_scanline();
                        if let Some(&last) = points.last() {
                            invoke(
                                callback,
                                &StatusUpdate {
                                    tool_position: Some(last),
                                    ..StatusUpdate::default()
                                },
                            );
                        }
                    }
                    None => {
                        for pair in points.chunks_exact(2) {
                            moves.push(Move::Straight(pair[0]));
                            moves.push(Move::Straight(pair[1]));
                            moves.push(Move::Safety);
                        }
                        if let Some(&last) = points.last() {
                            invoke(
                                callback,
                                &StatusUpdate {
                                    tool_position: Some(last),
                                    toolpath: Some(&moves),
                                    ..StatusUpdate::default()
                                },
                            );
                        }
                    }
                }
            }
            if counter.increment() {
                cancelled = true;
                return true;
            }
            false
        })?;

        Ok(SliceOutcome { moves, cancelled })
    }

    /// Turn the accumulated waterline contours into cutting moves.
    ///
    /// With obstacle models present every contour segment is re-checked
    /// against them through the triangle solver; the primary surface was
    /// already honored when the contour was built, so a single-model run
    /// emits the segments directly.
    fn waterline_moves(&mut self, tool: &dyn Cutter, models: &[M]) -> Result<Toolpath> {
        let Some(contour) = self.contour.take() else {
            return Ok(Toolpath::new());
        };

        let obstacles = if models.len() > 1 {
            Some(&models[1..])
        } else {
            None
        };

        let mut path = Toolpath::new();
        for polyline in contour.paths() {
            for pair in polyline.points.windows(2) {
                let line = ProbeLine::new(pair[0], pair[1]);
                match obstacles {
                    Some(obstacles) => {
                        let points = self
                            .triangles
                            .free_paths(obstacles, tool, &line)
                            .context("waterline obstacle re-check failed")?;
                        let points = check_free_paths(points)?;
                        for free in points.chunks_exact(2) {
                            path.push(Move::Straight(free[0]));
                            path.push(Move::Straight(free[1]));
                            path.push(Move::Safety);
                        }
                    }
                    None => {
                        path.push(Move::Straight(line.start));
                        path.push(Move::Straight(line.end));
                        path.push(Move::Safety);
                    }
                }
            }
        }
        Ok(path)
    }
}

fn invoke(callback: Option<&StatusCallback>, update: &StatusUpdate<'_>) -> bool {
    match callback {
        Some(callback) => callback.borrow_mut()(update),
        None => false,
    }
}
