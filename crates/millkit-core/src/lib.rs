//! # MillKit Core
//!
//! Core data models and shared infrastructure for MillKit.
//! Provides the fundamental value types exchanged between the motion grid,
//! the collision solvers, and the path generators, plus progress reporting
//! and error types.

pub mod data;
pub mod error;
pub mod progress;
pub mod types;

pub use data::{Move, Point3D, ProbeLine, Toolpath};
pub use error::{Error, Result};
pub use progress::{status_callback, ProgressCounter, StatusCallback, StatusUpdate};

// Re-export type aliases for convenience
pub use types::{shared, Shared};
