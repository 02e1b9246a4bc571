//! Dense numeric types and the LU decomposer.
//!
//! `Array1` is the 1D working vector, `Matrix` the 2D container with a
//! latched error, and `lu` factors square matrices for `det`, `solve` and
//! `inverse`. Everything is generic over [`Scalar`].
pub mod lu;
pub mod matrix;
pub mod scalar;
pub mod vector;

pub use lu::{factor, Factored, LuDecomposer, LuFactorization, Pivoting};
pub use matrix::{Axis, Matrix, ShapeError};
pub use scalar::Scalar;
pub use vector::Array1;
