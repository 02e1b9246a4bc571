use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use num_traits::Zero;

use crate::error::LinalgError;
use crate::math::scalar::Scalar;

/// Fixed-length numeric array. Used as a row vector by the LU elimination
/// and as the reduction unit of `Matrix::sum` / `Matrix::mean`.
#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array1<U>
    where
        F: FnMut(&T) -> U,
    {
        Array1::from_vec(self.data.iter().map(|v| f(v)).collect())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Array1<T>
where
    T: Clone + Zero,
{
    pub fn zeros(len: usize) -> Self {
        Array1::from_vec(vec![T::zero(); len])
    }
}

impl<T: Scalar> Array1<T> {
    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> Array1<T> {
        self.mapv(|&v| v * s)
    }

    /// Elementwise `self - other`.
    pub fn sub(&self, other: &Array1<T>) -> Result<Array1<T>, LinalgError> {
        self.check_len(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(&a, &b)| a - b)
            .collect())
    }

    pub fn dot(&self, other: &Array1<T>) -> Result<T, LinalgError> {
        self.check_len(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }

    pub fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// Arithmetic mean; `None` for an empty array.
    ///
    /// The element count is accumulated in `T`, so integer arrays truncate.
    pub fn mean(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let (sum, count) = self
            .iter()
            .fold((T::zero(), T::zero()), |(s, c), &v| (s + v, c + T::one()));
        Some(sum / count)
    }

    fn check_len(&self, other: &Array1<T>) -> Result<(), LinalgError> {
        if self.len() != other.len() {
            return Err(LinalgError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(value: Vec<T>) -> Self {
        Array1::from_vec(value)
    }
}

impl<T: Clone> From<&[T]> for Array1<T> {
    fn from(value: &[T]) -> Self {
        Array1::from_vec(value.to_vec())
    }
}

impl<T> From<Array1<T>> for Vec<T> {
    fn from(value: Array1<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array1<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_then_sub_matches_elimination_step() {
        let row = Array1::from_vec(vec![2.0, 7.0, 9.0]);
        let pivot = Array1::from_vec(vec![4.0, 2.0, 1.0]);
        let reduced = row.sub(&pivot.scale(0.5)).unwrap();
        assert_eq!(reduced.to_vec(), vec![0.0, 6.0, 8.5]);
    }

    #[test]
    fn zeros_then_indexed_writes() {
        let mut a: Array1<f64> = Array1::zeros(3);
        a[1] = 4.0;
        a[2] += 1.5;
        assert_eq!(a[0], 0.0);
        assert_eq!(Vec::from(a), vec![0.0, 4.0, 1.5]);
    }

    #[test]
    fn dot_rejects_different_lengths() {
        let a = Array1::from_vec(vec![1, 2, 3]);
        let b = Array1::from_vec(vec![1, 2]);
        assert_eq!(
            a.dot(&b),
            Err(LinalgError::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(a.dot(&a), Ok(14));
    }

    #[test]
    fn integer_mean_truncates() {
        let a = Array1::from_vec(vec![1i64, 2]);
        assert_eq!(a.mean(), Some(1));
        let empty: Array1<f64> = Array1::from_vec(vec![]);
        assert_eq!(empty.mean(), None);
    }
}
