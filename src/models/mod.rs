pub mod linear_regression;
pub mod regressor_trait;

pub use linear_regression::LinearRegression;
pub use regressor_trait::Regressor;
