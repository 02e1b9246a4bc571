use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::math::Pivoting;

/// Settings for [`LinearRegression`](crate::models::linear_regression::LinearRegression).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RegressionConfig {
    /// Prepend a column of ones so the first coefficient is the intercept.
    pub fit_intercept: bool,

    /// Row interchange rule used when factoring the normal equations.
    pub pivoting: Pivoting,
}

impl RegressionConfig {
    pub fn new(fit_intercept: bool, pivoting: Pivoting) -> Self {
        Self {
            fit_intercept,
            pivoting,
        }
    }
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            fit_intercept: true,
            pivoting: Pivoting::AdjacentSwap,
        }
    }
}

/// Read a JSON `RegressionConfig`. Missing fields take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RegressionConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid regression config in {}", path.display()))?;
    Ok(config)
}
