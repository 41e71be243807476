//! Error types for distance-distribution estimation

use std::fmt;

/// Errors that can occur while building or driving a distance-distribution
/// estimate.
///
/// All variants are recoverable except where noted: construction errors
/// abort before any work is done, and a mid-run error leaves the engine
/// untouched (no partial mutation).
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceError {
    /// An HLL sketch or engine was constructed with a precision outside
    /// `[4, 16]`. Fatal to construction.
    PrecisionOutOfRange {
        /// The precision value that was rejected
        value: u8,
    },

    /// `union_in_place` was called on two sketches with different
    /// precisions. Fatal to the operation; both sketches are left
    /// unmodified.
    PrecisionMismatch {
        /// Precision of the receiver
        left: u8,
        /// Precision of the argument
        right: u8,
    },

    /// `avg()` was called on an accumulator whose total weight is zero.
    EmptyAverage,

    /// A graph adapter could not produce a canonical byte encoding for a
    /// node identifier. Fatal to engine initialisation.
    EncodingUnavailable {
        /// Description of why encoding failed
        reason: String,
    },
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceError::PrecisionOutOfRange { value } => {
                write!(f, "precision {} is out of range [4, 16]", value)
            }
            DistanceError::PrecisionMismatch { left, right } => {
                write!(
                    f,
                    "cannot union sketches with precisions {} and {}",
                    left, right
                )
            }
            DistanceError::EmptyAverage => {
                write!(f, "cannot compute average of an empty distribution")
            }
            DistanceError::EncodingUnavailable { reason } => {
                write!(f, "node encoding unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for DistanceError {}

/// Result type alias used throughout this crate
pub type Result<T> = std::result::Result<T, DistanceError>;
