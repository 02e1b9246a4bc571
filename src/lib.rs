//! dense-ols: a small dense-matrix engine for least-squares regression.
//!
//! The crate provides a generic `Matrix` with a latched error (operations
//! chain freely and the first failure is checked once at the end), an LU
//! decomposer exposing determinant, solve and inverse, and a
//! `LinearRegression` estimator fitted through the normal equations. Text
//! readers for LibSVM and delimited tables, and a boundary for external
//! boosting engines, sit around that core.
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod models;

pub use error::LinalgError;
