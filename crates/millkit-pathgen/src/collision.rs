//! Collision-query contracts shared by the path generators.
//!
//! Two back-end variants probe a line for collision-free travel: a
//! triangle-mesh solver working directly on model geometry, and an analytic
//! solver driven by a physics engine. Both report the free sub-intervals of
//! the probed line as a flat, even-length point sequence ordered from the
//! line's start to its end; consecutive pairs are one free interval each,
//! and an empty result means the whole line is blocked.

use millkit_core::{Error, Point3D, ProbeLine, Result};

/// Cutting tool contract.
pub trait Cutter: Sync {
    /// Tool radius, always positive.
    fn radius(&self) -> f64;
}

/// Mesh-intersection collision solver.
///
/// `M` is the caller's model handle; the solver owns its interpretation.
/// Any internal recursion depth is derived from the probed geometry.
pub trait TriangleSolver<M>: Sync {
    /// Free sub-intervals of `line` against `models`.
    fn free_paths(
        &self,
        models: &[M],
        tool: &dyn Cutter,
        line: &ProbeLine,
    ) -> Result<Vec<Point3D>>;
}

/// Physics-engine collision solver.
///
/// The engine handle and the model state live inside the implementation;
/// the generator only supplies the probe and the subdivision depth.
pub trait PhysicsSolver: Sync {
    /// Free sub-intervals of `line`, recursing up to `depth` subdivisions.
    fn free_paths(&self, line: &ProbeLine, depth: u32) -> Result<Vec<Point3D>>;
}

/// Scaling constant in the subdivision depth formula.
pub const DEFAULT_ACCURACY: f64 = 20.0;

/// Lower bound for the computed subdivision depth.
pub const MIN_SUBDIVISION_DEPTH: u32 = 4;

/// Upper bound for the computed subdivision depth.
pub const MAX_SUBDIVISION_DEPTH: u32 = 20;

/// Subdivision depth for probing a line of `length` with a tool of `radius`.
///
/// Computed as `ceil(log2(accuracy * length / radius))` and clamped into
/// [`MIN_SUBDIVISION_DEPTH`]`..=`[`MAX_SUBDIVISION_DEPTH`].
pub fn subdivision_depth(accuracy: f64, length: f64, radius: f64) -> u32 {
    let depth = (accuracy * length / radius).log2().ceil();
    depth.clamp(MIN_SUBDIVISION_DEPTH as f64, MAX_SUBDIVISION_DEPTH as f64) as u32
}

/// Enforce the even-length free-interval invariant on a solver result.
pub(crate) fn check_free_paths(points: Vec<Point3D>) -> Result<Vec<Point3D>> {
    if points.len() % 2 != 0 {
        return Err(Error::Geometry {
            message: format!("free-path result has odd length {}", points.len()),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivision_depth_reference_case() {
        // accuracy 20, unit length, unit radius: ceil(log2(20)) = 5
        assert_eq!(subdivision_depth(20.0, 1.0, 1.0), 5);
    }

    #[test]
    fn test_subdivision_depth_clamps_low() {
        assert_eq!(subdivision_depth(20.0, 1e-9, 1.0), MIN_SUBDIVISION_DEPTH);
        assert_eq!(subdivision_depth(20.0, 0.0, 1.0), MIN_SUBDIVISION_DEPTH);
    }

    #[test]
    fn test_subdivision_depth_clamps_high() {
        assert_eq!(subdivision_depth(20.0, 1e12, 0.1), MAX_SUBDIVISION_DEPTH);
    }

    #[test]
    fn test_subdivision_depth_rounds_up() {
        // log2(20 * 1.7) is between 5 and 6; the depth always rounds up
        assert_eq!(subdivision_depth(20.0, 1.7, 1.0), 6);
    }

    #[test]
    fn test_check_free_paths() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(1.0, 0.0, 0.0);

        assert!(check_free_paths(vec![]).is_ok());
        assert!(check_free_paths(vec![a, b]).is_ok());

        let err = check_free_paths(vec![a, b, a]).unwrap_err();
        assert!(matches!(err, Error::Geometry { .. }));
        assert_eq!(
            err.to_string(),
            "Geometry error: free-path result has odd length 3"
        );
    }
}
