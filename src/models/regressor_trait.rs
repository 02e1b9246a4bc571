use crate::error::LinalgError;
use crate::math::Matrix;

/// Contract shared by the regression estimators. Rows of `x` are samples,
/// columns are features; `y` is a single-column target matrix.
pub trait Regressor<T> {
    fn fit(&mut self, x: &Matrix<T>, y: &Matrix<T>) -> Result<(), LinalgError>;

    /// Predicted targets as an `n x 1` matrix. Fails before `fit`.
    fn predict(&self, x: &Matrix<T>) -> Result<Matrix<T>, LinalgError>;

    /// Coefficient of determination of the predictions for `x` against `y`.
    fn score(&self, x: &Matrix<T>, y: &Matrix<T>) -> Result<f64, LinalgError>;

    fn name(&self) -> &str {
        "regressor"
    }
}
