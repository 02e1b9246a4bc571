//! LU factorization of square matrices.
//!
//! Elimination runs without a pivot-magnitude threshold; only an exact zero
//! pivot is rejected. Two row-interchange rules are available:
//!
//! * [`Pivoting::AdjacentSwap`] (default) swaps rows `k` and `k + 1` at every
//!   step `k` whatever the pivot values are. This reproduces the outputs of
//!   earlier releases and fails on some invertible inputs (the identity, for
//!   one) because the rotation moves a zero onto the diagonal.
//! * [`Pivoting::Partial`] swaps row `k` with the row holding the largest
//!   magnitude in column `k`.
use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use num_traits::Signed;
use serde::{Deserialize, Serialize};

use crate::error::LinalgError;
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;
use crate::math::vector::Array1;

/// Row interchange rule applied at each elimination step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pivoting {
    #[default]
    AdjacentSwap,
    Partial,
}

impl FromStr for Pivoting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adjacent-swap" | "adjacent" => Ok(Pivoting::AdjacentSwap),
            "partial" => Ok(Pivoting::Partial),
            _ => Err(format!(
                "Unknown pivoting rule: {}. Expected `adjacent-swap` or `partial`",
                s
            )),
        }
    }
}

impl fmt::Display for Pivoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pivoting::AdjacentSwap => write!(f, "adjacent-swap"),
            Pivoting::Partial => write!(f, "partial"),
        }
    }
}

/// Operations available once a matrix has been factored. Kept as a trait so
/// other factorizations can sit behind the same calls.
pub trait Factored<T> {
    fn det(&self) -> T;

    /// Solve `A x = b` for a column vector `b`.
    fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError>;

    fn inverse(&self) -> Result<Matrix<T>, LinalgError>;
}

/// Unfactored decomposer. [`LuDecomposer::factor`] consumes it, so each
/// instance factors exactly one matrix.
#[derive(Clone, Copy, Debug, Default)]
pub struct LuDecomposer {
    pivoting: Pivoting,
}

impl LuDecomposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pivoting(pivoting: Pivoting) -> Self {
        Self { pivoting }
    }

    /// Factor `m` into `P`, `L` and `U` such that `P * m = L * U`.
    pub fn factor<T: Scalar + Signed>(
        self,
        m: &Matrix<T>,
    ) -> Result<LuFactorization<T>, LinalgError> {
        if let Some(error) = m.err() {
            return Err(error.clone());
        }
        if !m.is_square() {
            return Err(LinalgError::NotSquare {
                rows: m.nrows(),
                cols: m.ncols(),
            });
        }

        let n = m.nrows();
        let mut u = Matrix::new(m.to_rows());
        let mut p = Matrix::identity(n);
        let mut lower = Matrix::empty(n, n);
        let mut swaps = 0;

        for step in 0..n.saturating_sub(1) {
            let pivot_row = match self.pivoting {
                Pivoting::AdjacentSwap => step + 1,
                Pivoting::Partial => {
                    let mut best = step;
                    for row in step + 1..n {
                        if u[(row, step)].magnitude() > u[(best, step)].magnitude() {
                            best = row;
                        }
                    }
                    best
                }
            };
            if pivot_row != step {
                u.swap_rows(step, pivot_row);
                p.swap_rows(step, pivot_row);
                // Multipliers from earlier steps travel with their rows.
                lower.swap_rows(step, pivot_row);
                swaps += 1;
            }

            let pivot = u[(step, step)];
            if pivot.is_zero() {
                debug!("zero pivot at elimination step {} of {}", step, n);
                return Err(LinalgError::SingularMatrix { step });
            }

            let base = Array1::from(u.row_slice(step));
            for row in step + 1..n {
                let multiplier = u[(row, step)] / pivot;
                let reduced = Array1::from(u.row_slice(row)).sub(&base.scale(multiplier))?;
                u.set_row(row, reduced.as_slice());
                lower[(row, step)] = multiplier;
            }
            trace!(
                "step {}: pivot row {}, pivot {}, swaps so far {}",
                step,
                pivot_row,
                pivot,
                swaps
            );
        }

        for i in 0..n {
            lower[(i, i)] = T::one();
        }

        debug!(
            "factored {}x{} matrix ({} pivoting, {} row swaps)",
            n, n, self.pivoting, swaps
        );

        Ok(LuFactorization {
            p,
            l: lower,
            u,
            swaps,
            pivoting: self.pivoting,
        })
    }
}

/// Factor `m` with the default [`Pivoting::AdjacentSwap`] rule.
pub fn factor<T: Scalar + Signed>(m: &Matrix<T>) -> Result<LuFactorization<T>, LinalgError> {
    LuDecomposer::new().factor(m)
}

/// Result of [`LuDecomposer::factor`]: permutation `P`, unit lower
/// triangular `L`, upper triangular `U` and the number of row swaps.
#[derive(Clone, Debug)]
pub struct LuFactorization<T> {
    p: Matrix<T>,
    l: Matrix<T>,
    u: Matrix<T>,
    swaps: usize,
    pivoting: Pivoting,
}

impl<T: Scalar> LuFactorization<T> {
    pub fn p(&self) -> &Matrix<T> {
        &self.p
    }

    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }

    pub fn pivoting(&self) -> Pivoting {
        self.pivoting
    }

    pub fn order(&self) -> usize {
        self.u.nrows()
    }
}

impl<T: Scalar + Signed> Factored<T> for LuFactorization<T> {
    /// Product of the diagonals of `L` and `U`, negated for an odd swap
    /// count.
    fn det(&self) -> T {
        let (mut lp, mut up) = (T::one(), T::one());
        for i in 0..self.order() {
            up = up * self.u[(i, i)];
            lp = lp * self.l[(i, i)];
        }
        if self.swaps % 2 == 0 {
            lp * up
        } else {
            -(lp * up)
        }
    }

    fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        if let Some(error) = b.err() {
            return Err(error.clone());
        }
        let n = self.order();
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                left: n,
                right: b.nrows(),
            });
        }
        if b.ncols() != 1 {
            return Err(LinalgError::ShapeMismatch {
                left: (n, 1),
                right: b.size(),
            });
        }

        let rhs = self.p.multiply(b).into_result()?;

        // L y = P b
        let mut y: Array1<T> = Array1::zeros(n);
        for i in 0..n {
            let diag = self.l[(i, i)];
            if diag.is_zero() {
                return Err(LinalgError::SingularMatrix { step: i });
            }
            let before =
                Array1::from(&self.l.row_slice(i)[..i]).dot(&Array1::from(&y.as_slice()[..i]))?;
            y[i] = (rhs[(i, 0)] - before) / diag;
        }

        // U x = y
        let mut x: Array1<T> = Array1::zeros(n);
        for i in (0..n).rev() {
            let diag = self.u[(i, i)];
            if diag.is_zero() {
                return Err(LinalgError::SingularMatrix { step: i });
            }
            let tail = Array1::from(&x.as_slice()[i + 1..]);
            let front = Array1::from(&self.u.row_slice(i)[i + 1..]).dot(&tail)?;
            x[i] = (y[i] - front) / diag;
        }

        Ok(Matrix::column_vector(x.into()))
    }

    /// Inverse assembled column by column from solves against the identity.
    fn inverse(&self) -> Result<Matrix<T>, LinalgError> {
        let n = self.order();
        let identity = Matrix::<T>::identity(n);
        let mut inv = Matrix::empty(n, n);
        for col in 0..n {
            let e = Matrix::column_vector(identity.column(col).to_vec());
            let x = self.solve(&e)?;
            for row in 0..n {
                inv[(row, col)] = x[(row, 0)];
            }
        }
        Ok(inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
        assert_eq!(a.size(), b.size());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < tol, "{} vs {}\n{}\n{}", x, y, a, b);
        }
    }

    fn three_by_three() -> Matrix<f64> {
        Matrix::new(vec![
            vec![0.0, 5.0, 22.0 / 3.0],
            vec![4.0, 2.0, 1.0],
            vec![2.0, 7.0, 9.0],
        ])
    }

    #[test]
    fn adjacent_swap_components() {
        let a = three_by_three();
        let lu = factor(&a).unwrap();

        let p = Matrix::new(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ]);
        assert_eq!(lu.p(), &p);
        assert_eq!(lu.swaps(), 2);

        let l = Matrix::new(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.5, 1.0, 0.0],
            vec![0.0, 5.0 / 6.0, 1.0],
        ]);
        assert_close(lu.l(), &l, 1e-12);

        let u = Matrix::new(vec![
            vec![4.0, 2.0, 1.0],
            vec![0.0, 6.0, 8.5],
            vec![0.0, 0.0, 0.25],
        ]);
        assert_close(lu.u(), &u, 1e-12);

        assert_close(&lu.p().multiply(&a), &lu.l().multiply(lu.u()), 1e-12);
    }

    #[test]
    fn det_even_and_odd_swaps() {
        // two swaps: sign kept
        let lu = factor(&three_by_three()).unwrap();
        assert!((lu.det() - 6.0).abs() < 1e-12);

        // one swap: sign flipped
        let lu = factor(&Matrix::new(vec![vec![4.0, 3.0], vec![6.0, 3.0]])).unwrap();
        assert_eq!(lu.swaps(), 1);
        assert!((lu.det() + 6.0).abs() < 1e-12);
    }

    #[test]
    fn solve_returns_column() {
        let a = Matrix::new(vec![vec![4.0, 3.0], vec![6.0, 3.0]]);
        let lu = factor(&a).unwrap();
        let b = Matrix::new(vec![vec![10.0], vec![12.0]]);
        let x = lu.solve(&b).unwrap();
        assert_close(&x, &Matrix::new(vec![vec![1.0], vec![2.0]]), 1e-12);
    }

    #[test]
    fn solve_rejects_wrong_shape() {
        let lu = factor(&Matrix::new(vec![vec![4.0, 3.0], vec![6.0, 3.0]])).unwrap();
        let b = Matrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]);
        assert_eq!(
            lu.solve(&b).unwrap_err(),
            LinalgError::DimensionMismatch { left: 2, right: 3 }
        );
    }

    #[test]
    fn inverse_of_two_by_two() {
        let a = Matrix::new(vec![vec![2.0, 3.0], vec![2.0, 2.0]]);
        let inv = factor(&a).unwrap().inverse().unwrap();
        let want = Matrix::new(vec![vec![-1.0, 1.5], vec![1.0, -1.0]]);
        assert_close(&inv, &want, 1e-12);
    }

    #[test]
    fn adjacent_swap_trips_on_identity() {
        let err = factor(&Matrix::<f64>::identity(2)).unwrap_err();
        assert_eq!(err, LinalgError::SingularMatrix { step: 0 });

        let lu = LuDecomposer::with_pivoting(Pivoting::Partial)
            .factor(&Matrix::<f64>::identity(2))
            .unwrap();
        assert_eq!(lu.swaps(), 0);
        assert_eq!(lu.inverse().unwrap(), Matrix::identity(2));
    }

    #[test]
    fn singular_detected_during_back_substitution() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        let lu = factor(&a).unwrap();
        assert_eq!(lu.det(), 0.0);
        assert!(matches!(
            lu.inverse(),
            Err(LinalgError::SingularMatrix { step: 1 })
        ));
    }

    #[test]
    fn non_square_and_errored_inputs() {
        let rect = Matrix::new(vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!(
            factor(&rect).unwrap_err(),
            LinalgError::NotSquare { rows: 1, cols: 3 }
        );
        let bad = rect.multiply(&rect);
        assert_eq!(factor(&bad).unwrap_err(), bad.err().cloned().unwrap());
    }

    #[test]
    fn signed_integer_determinant() {
        let lu = factor(&Matrix::new(vec![vec![2i64, 1], vec![1, 1]])).unwrap();
        assert_eq!(lu.swaps(), 1);
        assert_eq!(lu.u().to_rows(), vec![vec![1, 1], vec![0, -1]]);
        assert_eq!(lu.det(), 1);
    }

    #[test]
    fn one_by_one() {
        let lu = factor(&Matrix::new(vec![vec![5.0]])).unwrap();
        assert_eq!(lu.swaps(), 0);
        assert_eq!(lu.det(), 5.0);
        assert_eq!(lu.inverse().unwrap().to_rows(), vec![vec![0.2]]);
    }

    #[test]
    fn pivoting_parses() {
        assert_eq!("partial".parse::<Pivoting>(), Ok(Pivoting::Partial));
        assert_eq!("Adjacent-Swap".parse::<Pivoting>(), Ok(Pivoting::AdjacentSwap));
        assert!("rook".parse::<Pivoting>().is_err());
        assert_eq!(Pivoting::Partial.to_string(), "partial");
    }
}
