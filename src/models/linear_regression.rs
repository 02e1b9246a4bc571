use log::{debug, warn};
use num_traits::Signed;

use crate::config::RegressionConfig;
use crate::error::LinalgError;
use crate::math::{Axis, Factored, LuDecomposer, Matrix, Scalar};
use crate::models::regressor_trait::Regressor;

/// Ordinary least squares solved through the normal equations
/// `(X^T X)^-1 X^T y`.
#[derive(Clone, Debug)]
pub struct LinearRegression<T> {
    coefficients: Option<Matrix<T>>,
    config: RegressionConfig,
}

impl<T: Scalar> LinearRegression<T> {
    pub fn new(config: RegressionConfig) -> Self {
        LinearRegression {
            coefficients: None,
            config,
        }
    }

    pub fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Fitted coefficients as a column, intercept first when enabled.
    pub fn coefficients(&self) -> Option<&Matrix<T>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> Option<T> {
        if !self.config.fit_intercept {
            return None;
        }
        self.coefficients.as_ref().and_then(|c| c.get(0, 0))
    }

    fn design(&self, x: &Matrix<T>) -> Matrix<T> {
        if self.config.fit_intercept {
            x.prepend_column(T::one())
        } else {
            x.clone()
        }
    }
}

impl<T: Scalar> Default for LinearRegression<T> {
    fn default() -> Self {
        Self::new(RegressionConfig::default())
    }
}

impl<T: Scalar + Signed> Regressor<T> for LinearRegression<T> {
    fn fit(&mut self, x: &Matrix<T>, y: &Matrix<T>) -> Result<(), LinalgError> {
        self.coefficients = None;

        let x = self.design(x).into_result()?;
        let xt = x.transpose();
        let inner = xt.multiply(&x).into_result()?;

        let lu = LuDecomposer::with_pivoting(self.config.pivoting)
            .factor(&inner)
            .map_err(|e| {
                warn!("normal equations could not be factored: {}", e);
                e
            })?;
        let coefficients = lu
            .inverse()?
            .multiply(&xt.multiply(y))
            .into_result()?;

        debug!(
            "fitted {} coefficients on {} samples",
            coefficients.nrows(),
            x.nrows()
        );
        self.coefficients = Some(coefficients);
        Ok(())
    }

    fn predict(&self, x: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(LinalgError::CoefficientsUnset)?;
        self.design(x).multiply(coefficients).into_result()
    }

    /// R^2 = 1 - RSS / TSS with RSS = sum((y - y_hat)^2) and
    /// TSS = sum((y - mean(y))^2). A constant `y` scores 1.0 when predicted
    /// exactly and 0.0 otherwise.
    fn score(&self, x: &Matrix<T>, y: &Matrix<T>) -> Result<f64, LinalgError> {
        let y_hat = self.predict(x)?;
        if let Some(error) = y.err() {
            return Err(error.clone());
        }

        let (rows, cols) = y.size();
        let y_bar = y.mean(Axis::Column).get(0, 0).unwrap_or_else(T::zero);
        let y_bar = Matrix::filled(rows, cols, y_bar);

        let rss = y
            .subtract(&y_hat)
            .apply(|t| t * t)
            .sum(Axis::All)
            .into_result()?;
        let tss = y
            .subtract(&y_bar)
            .apply(|t| t * t)
            .sum(Axis::All)
            .into_result()?;

        let rss = rss[(0, 0)].to_f64().unwrap_or(f64::NAN);
        let tss = tss[(0, 0)].to_f64().unwrap_or(f64::NAN);
        if tss == 0.0 {
            return Ok(if rss == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - rss / tss)
    }

    fn name(&self) -> &str {
        "linear_regression"
    }
}
