use std::error::Error;
use std::fmt;

use crate::math::Axis;

/// Failures raised by matrix operations, the LU decomposer, the estimator
/// and the text readers.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Elementwise operation on matrices of different shapes.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Matrix product where `left` columns != `right` rows.
    DimensionMismatch { left: usize, right: usize },
    /// Row or column index past the end of the given axis.
    IndexOutOfRange { index: usize, bound: usize, axis: Axis },
    UnsupportedAxis(Axis),
    NotSquare { rows: usize, cols: usize },
    /// Zero pivot met during elimination or substitution.
    SingularMatrix { step: usize },
    LengthMismatch { left: usize, right: usize },
    Format { line: usize, message: String },
    CoefficientsUnset,
    Engine(String),
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::ShapeMismatch { left, right } => write!(
                f,
                "elementwise operation on unequal sized matrices is undefined: ({} x {}) and ({} x {})",
                left.0, left.1, right.0, right.1
            ),
            LinalgError::DimensionMismatch { left, right } => write!(
                f,
                "matrix multiplication where left.cols = {} and right.rows = {} is undefined",
                left, right
            ),
            LinalgError::IndexOutOfRange { index, bound, axis } => {
                write!(f, "{:?} index out of bounds: {} >= {}", axis, index, bound)
            }
            LinalgError::UnsupportedAxis(axis) => {
                write!(f, "operation is not defined along axis {:?}", axis)
            }
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "expected a square matrix, got ({} x {})", rows, cols)
            }
            LinalgError::SingularMatrix { step } => {
                write!(f, "matrix is singular: zero pivot at step {}", step)
            }
            LinalgError::LengthMismatch { left, right } => write!(
                f,
                "arrays with different lengths are incompatible: {} vs. {}",
                left, right
            ),
            LinalgError::Format { line, message } => write!(f, "line {}: {}", line, message),
            LinalgError::CoefficientsUnset => {
                write!(f, "coefficients are unset; call fit before predict or score")
            }
            LinalgError::Engine(message) => write!(f, "training engine failure: {}", message),
        }
    }
}

impl Error for LinalgError {}
