//! Error types for the filter and smoother
//!
//! This module provides proper error handling instead of panics.

use std::fmt;

/// Errors that can occur during filtering or smoothing
#[derive(Debug, Clone, PartialEq)]
pub enum HmmError {
    /// Caller-supplied input is inconsistent with the models
    InvalidInput(InvalidInputError),

    /// Normalization sum is zero or non-finite
    ///
    /// Signals an observation that is impossible under the supplied model
    /// (likelihood zero for every state with nonzero prior). The model or
    /// the reading must be fixed; retrying the same call cannot succeed.
    NumericalDegeneracy {
        /// Description of where the degenerate sum was formed
        description: String,
    },
}

impl fmt::Display for HmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HmmError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            HmmError::NumericalDegeneracy { description } => {
                write!(f, "Numerical degeneracy: {}", description)
            }
        }
    }
}

impl std::error::Error for HmmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HmmError::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidInputError> for HmmError {
    fn from(e: InvalidInputError) -> Self {
        HmmError::InvalidInput(e)
    }
}

/// Caller errors detected before any computation runs
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// Vector or matrix dimension inconsistent with the state count
    DimensionMismatch {
        /// What was expected
        expected: usize,
        /// What was received
        actual: usize,
        /// Context (e.g., "initial belief length", "transition matrix rows")
        context: String,
    },

    /// Reading and forward-belief sequences have different lengths
    SequenceLengthMismatch {
        /// Length of the reading sequence
        readings: usize,
        /// Length of the forward-belief sequence
        beliefs: usize,
    },

    /// Smoothing requires at least one time step
    EmptySequence,

    /// Belief does not sum to 1 within tolerance
    NotNormalized {
        /// The actual sum
        sum: f64,
    },

    /// Reading value outside the observation model's domain
    UnknownReading {
        /// The offending reading
        reading: usize,
        /// Number of readings the model supports
        num_readings: usize,
    },

    /// Grid too small to define a walk
    EmptyGrid {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputError::DimensionMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            InvalidInputError::SequenceLengthMismatch { readings, beliefs } => {
                write!(
                    f,
                    "Sequence length mismatch: {} readings vs {} forward beliefs",
                    readings, beliefs
                )
            }
            InvalidInputError::EmptySequence => {
                write!(f, "Smoothing requires a non-empty sequence")
            }
            InvalidInputError::NotNormalized { sum } => {
                write!(f, "Belief does not sum to 1 (sum = {})", sum)
            }
            InvalidInputError::UnknownReading {
                reading,
                num_readings,
            } => {
                write!(
                    f,
                    "Reading {} outside model domain of {} readings",
                    reading, num_readings
                )
            }
            InvalidInputError::EmptyGrid { rows, cols } => {
                write!(f, "Grid of {}x{} cells is too small to walk on", rows, cols)
            }
        }
    }
}

impl std::error::Error for InvalidInputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmm_error_display() {
        let err = HmmError::NumericalDegeneracy {
            description: "forward update at step 3".to_string(),
        };
        assert!(err.to_string().contains("forward update at step 3"));

        let err: HmmError = InvalidInputError::DimensionMismatch {
            expected: 16,
            actual: 4,
            context: "initial belief length".to_string(),
        }
        .into();
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = InvalidInputError::SequenceLengthMismatch {
            readings: 5,
            beliefs: 3,
        };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));

        let err = InvalidInputError::NotNormalized { sum: 0.5 };
        assert!(err.to_string().contains("0.5"));
    }

    #[test]
    fn test_error_conversion() {
        let inner = InvalidInputError::EmptySequence;
        let outer: HmmError = inner.into();
        assert!(matches!(outer, HmmError::InvalidInput(_)));
    }
}
