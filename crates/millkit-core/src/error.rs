//! Error handling for MillKit
//!
//! Provides the error type shared by the toolpath generators and the
//! collision-solver contracts. Cancellation is deliberately not an error:
//! a cancelled run returns a valid, shorter toolpath.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors raised while generating a toolpath.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A collision solver received or produced invalid geometry.
    #[error("Geometry error: {message}")]
    Geometry {
        /// Description of the offending geometry.
        message: String,
    },

    /// A collision query failed while probing a layer; the whole layer is
    /// aborted.
    #[error("Collision query failed for segment {segment}: {message}")]
    OperationFailed {
        /// Index of the failing probe line within its layer.
        segment: usize,
        /// The underlying failure.
        message: String,
    },
}

/// Result type alias for MillKit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = Error::Geometry {
            message: "free-path result has odd length 3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Geometry error: free-path result has odd length 3"
        );
    }

    #[test]
    fn test_operation_failed_display() {
        let err = Error::OperationFailed {
            segment: 4,
            message: "solver diverged".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Collision query failed for segment 4: solver diverged"
        );
    }
}
