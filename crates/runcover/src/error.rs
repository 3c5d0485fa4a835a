//! Rejections surfaced by the geometry pipeline.

use std::fmt;

/// Why a run could not be folded into coverage. State is never partially updated.
#[derive(Clone, Debug, PartialEq)]
pub enum CoverageError {
    /// Path has fewer than two points.
    DegenerateInput { points: usize },
    /// Buffered run does not touch the boundary.
    OutOfBounds,
    /// Buffer radius is not a positive finite number of meters.
    InvalidRadius { radius_m: f64 },
    /// Malformed input coordinates or engine output.
    Geometry { reason: String },
}

impl CoverageError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput { points } => {
                write!(f, "path needs at least two points (got {points})")
            }
            Self::OutOfBounds => write!(f, "run lies entirely outside the boundary"),
            Self::InvalidRadius { radius_m } => {
                write!(f, "buffer radius must be a positive number of meters (got {radius_m})")
            }
            Self::Geometry { reason } => write!(f, "geometry failure: {reason}"),
        }
    }
}

impl std::error::Error for CoverageError {}
