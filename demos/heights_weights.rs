//! Fit weight against height for fifteen adult women and print the R^2 of
//! the fit on the training data.
use anyhow::Result;
use dense_ols::math::Matrix;
use dense_ols::models::{LinearRegression, Regressor};

fn main() -> Result<()> {
    env_logger::init();

    let heights = vec![
        1.47, 1.50, 1.52, 1.55, 1.57, 1.60, 1.63, 1.65, 1.68, 1.70, 1.73, 1.75, 1.78, 1.80, 1.83,
    ];
    let weights = vec![
        52.21, 53.12, 54.48, 55.84, 57.20, 58.57, 59.93, 61.29, 63.11, 64.47, 66.28, 68.10,
        69.92, 72.19, 74.46,
    ];

    let x = Matrix::new(vec![heights]).transpose();
    let y = Matrix::new(vec![weights]).transpose();

    let mut model = LinearRegression::<f64>::default();
    model.fit(&x, &y)?;

    if let Some(coefficients) = model.coefficients() {
        println!("coefficients:\n{}", coefficients);
    }
    println!("R^2 = {:.4}", model.score(&x, &y)?);
    Ok(())
}
