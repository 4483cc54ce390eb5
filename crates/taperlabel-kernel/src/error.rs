//! Error types for the unroll kernel.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four scalar inputs of a [`LabelSpec`](crate::LabelSpec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Label height (in-plane slant distance between the two edges).
    Height,
    /// Requested flat label width.
    Width,
    /// Diameter of the object's top edge.
    TopDiameter,
    /// Diameter of the object's bottom edge.
    BottomDiameter,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Height => "height",
            Dimension::Width => "width",
            Dimension::TopDiameter => "top diameter",
            Dimension::BottomDiameter => "bottom diameter",
        };
        f.write_str(name)
    }
}

/// Input rejected before any geometry is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A dimension is zero or negative, negative infinity included.
    #[error("{dimension} must be positive, got {value}")]
    NonPositiveDimension {
        /// Which input was rejected.
        dimension: Dimension,
        /// The offending value.
        value: f64,
    },

    /// A dimension is NaN or positive infinity.
    #[error("{dimension} must be a finite number, got {value}")]
    NonFiniteDimension {
        /// Which input was rejected.
        dimension: Dimension,
        /// The offending value.
        value: f64,
    },
}

/// Errors from [`unroll`](crate::unroll).
///
/// All variants are permanent for the given input; retrying never helps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The spec failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The radius difference exceeds the label height, so the flattened
    /// cone has no real apex angle.
    #[error(
        "the difference between the two radii ({radius_diff}) is greater than the label height ({height})"
    )]
    DiametersExceedHeight {
        /// `(max diameter - min diameter) / 2`.
        radius_diff: f64,
        /// Label height.
        height: f64,
    },

    /// The requested width wraps one of the edges around the object more
    /// than once.
    #[error(
        "the label would circle the object more than once \
         (outer arc {outer_arc:.3} of {outer_circumference:.3}, \
         inner arc {inner_arc:.3} of {inner_circumference:.3})"
    )]
    ExceedsFullRevolution {
        /// Arc length subtended on the wide edge.
        outer_arc: f64,
        /// Circumference of the wide edge.
        outer_circumference: f64,
        /// Arc length subtended on the narrow edge.
        inner_arc: f64,
        /// Circumference of the narrow edge.
        inner_circumference: f64,
    },

    /// A derived quantity came out non-finite or non-positive even though
    /// the input passed every guard. This is a kernel bug, not a user error.
    #[error("internal error: {quantity} evaluated to {value}")]
    NonFinite {
        /// Name of the derived quantity.
        quantity: &'static str,
        /// The value it took.
        value: f64,
    },
}

impl GeometryError {
    /// True for invariant violations inside the kernel, as opposed to
    /// inputs the caller should correct.
    pub fn is_internal(&self) -> bool {
        matches!(self, GeometryError::NonFinite { .. })
    }
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_values() {
        let err = ValidationError::NonPositiveDimension {
            dimension: Dimension::TopDiameter,
            value: -2.0,
        };
        assert_eq!(err.to_string(), "top diameter must be positive, got -2");

        let err = GeometryError::DiametersExceedHeight {
            radius_diff: 45.0,
            height: 40.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("45"));
        assert!(msg.contains("40"));
    }

    #[test]
    fn test_validation_is_transparent() {
        let inner = ValidationError::NonFiniteDimension {
            dimension: Dimension::Width,
            value: f64::NAN,
        };
        let err = GeometryError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert!(!err.is_internal());
    }

    #[test]
    fn test_internal_classification() {
        let err = GeometryError::NonFinite {
            quantity: "sweep angle",
            value: f64::INFINITY,
        };
        assert!(err.is_internal());
        assert!(!GeometryError::DiametersExceedHeight {
            radius_diff: 1.0,
            height: 0.5
        }
        .is_internal());
    }
}
