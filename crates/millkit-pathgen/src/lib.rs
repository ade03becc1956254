//! # MillKit Path Generation
//!
//! Push-cutter toolpath generation for MillKit: a layered sweep over a
//! motion grid that probes every line for collision-free travel against one
//! or more models and folds the free intervals into cutting moves.
//!
//! ## Components
//!
//! - **Collision contracts**: call contracts for the triangle-mesh and
//!   physics collision solvers, plus the per-line subdivision depth
//! - **Parallel line processor**: ordered fan-out of one layer's probes
//!   across a bounded worker pool
//! - **Contour builder**: waterline accumulation of scan-lines into
//!   polylines
//! - **Motion grid**: up-front materialization of the lazy probe-line
//!   source
//! - **Push cutter**: the layer driver and slice assembler producing the
//!   final move list

pub mod collision;
pub mod contour;
pub mod motion_grid;
pub mod parallel;
pub mod push_cutter;

// Re-export commonly used items
pub use collision::{
    subdivision_depth, Cutter, PhysicsSolver, TriangleSolver, DEFAULT_ACCURACY,
    MAX_SUBDIVISION_DEPTH, MIN_SUBDIVISION_DEPTH,
};
pub use contour::{ContourBuilder, Polyline};
pub use motion_grid::{Layer, MotionGrid};
pub use parallel::{default_workers, map_ordered};
pub use push_cutter::{PushCutter, PushCutterParams};
