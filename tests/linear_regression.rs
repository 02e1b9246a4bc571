//! End-to-end tests for the least-squares estimator.

use dense_ols::config::RegressionConfig;
use dense_ols::math::{Matrix, Pivoting};
use dense_ols::models::{LinearRegression, Regressor};
use dense_ols::LinalgError;

fn assert_coefficients(model: &LinearRegression<f64>, expected: &[f64], tol: f64) {
    let c = model.coefficients().expect("model is fitted");
    assert_eq!(c.size(), (expected.len(), 1));
    for (i, e) in expected.iter().enumerate() {
        assert!(
            (c[(i, 0)] - e).abs() < tol,
            "coefficient {}: {} vs {}",
            i,
            c[(i, 0)],
            e
        );
    }
}

#[test]
fn single_feature_line() {
    let x = Matrix::new(vec![vec![1.0, 2.0, 3.0, 4.0]]).transpose();
    let y = Matrix::new(vec![vec![3.0, 5.0, 7.0, 9.0]]).transpose();

    let mut model = LinearRegression::<f64>::default();
    model.fit(&x, &y).unwrap();

    assert_coefficients(&model, &[1.0, 2.0], 1e-9);
    assert!((model.intercept().unwrap() - 1.0).abs() < 1e-9);
    assert!((model.score(&x, &y).unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn two_features_with_intercept() {
    let x = Matrix::new(vec![
        vec![2.0, 1.0],
        vec![0.0, 3.0],
        vec![4.0, 2.0],
        vec![3.0, 5.0],
        vec![5.0, 0.0],
    ]);
    let y = Matrix::column_vector(vec![3.5, -2.5, 6.5, 1.5, 10.5]);

    for pivoting in [Pivoting::AdjacentSwap, Pivoting::Partial] {
        let mut model = LinearRegression::new(RegressionConfig::new(true, pivoting));
        model.fit(&x, &y).unwrap();
        assert_coefficients(&model, &[0.5, 2.0, -1.0], 1e-8);

        let predicted = model
            .predict(&Matrix::new(vec![vec![1.0, 1.0]]))
            .unwrap();
        assert!((predicted[(0, 0)] - 1.5).abs() < 1e-8);
    }
}

#[test]
fn heights_and_weights() {
    let heights = vec![
        1.47, 1.50, 1.52, 1.55, 1.57, 1.60, 1.63, 1.65, 1.68, 1.70, 1.73, 1.75, 1.78, 1.80, 1.83,
    ];
    let weights = vec![
        52.21, 53.12, 54.48, 55.84, 57.20, 58.57, 59.93, 61.29, 63.11, 64.47, 66.28, 68.10,
        69.92, 72.19, 74.46,
    ];
    let x = Matrix::column_vector(heights);
    let y = Matrix::column_vector(weights);

    let mut model = LinearRegression::<f64>::default();
    model.fit(&x, &y).unwrap();

    assert_coefficients(&model, &[-39.06196, 61.27219], 1e-3);
    assert!((model.score(&x, &y).unwrap() - 0.98920).abs() < 1e-4);
}

#[test]
fn without_intercept() {
    let x = Matrix::column_vector(vec![1.0, 2.0, 3.0]);
    let y = Matrix::column_vector(vec![2.0, 4.0, 6.0]);

    let mut model = LinearRegression::new(RegressionConfig::new(false, Pivoting::AdjacentSwap));
    model.fit(&x, &y).unwrap();

    assert_coefficients(&model, &[2.0], 1e-12);
    assert_eq!(model.intercept(), None);
}

#[test]
fn failed_fit_leaves_model_unfitted() {
    let x = Matrix::column_vector(vec![1.0, 2.0]);
    let y = Matrix::column_vector(vec![1.0, 2.0]);
    let mut model = LinearRegression::<f64>::default();
    model.fit(&x, &y).unwrap();
    assert!(model.coefficients().is_some());

    let collinear = Matrix::new(vec![vec![1.0, 2.0], vec![2.0, 4.0], vec![3.0, 6.0]]);
    let y3 = Matrix::column_vector(vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        model.fit(&collinear, &y3),
        Err(LinalgError::SingularMatrix { .. })
    ));
    assert!(model.coefficients().is_none());
    assert_eq!(
        model.predict(&collinear).unwrap_err(),
        LinalgError::CoefficientsUnset
    );
}

#[test]
fn constant_target() {
    let x = Matrix::column_vector(vec![2.0, 2.0]);
    let y = Matrix::column_vector(vec![4.0, 4.0]);
    let mut model = LinearRegression::new(RegressionConfig::new(false, Pivoting::AdjacentSwap));
    model.fit(&x, &y).unwrap();

    assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    let shifted = Matrix::column_vector(vec![1.0, 1.0]);
    assert_eq!(model.score(&shifted, &y).unwrap(), 0.0);
}
