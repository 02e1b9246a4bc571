use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::LinalgError;
use crate::math::scalar::Scalar;
use crate::math::vector::Array1;

/// Dimension selected by reductions, reversal and deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Row,
    Column,
    All,
}

/// Dense row-major matrix with a latched error.
///
/// Operations never mutate their receiver. The first failing operation in a
/// chain records its error on the returned matrix, and every later operation
/// on that matrix hands it back unchanged, so a chain such as
/// `a.add(&b).multiply(&c).transpose()` is checked once at the end with
/// [`Matrix::err`] or [`Matrix::into_result`].
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    columns: Option<Vec<String>>,
    error: Option<LinalgError>,
}

impl<T> Matrix<T> {
    /// Build a matrix from rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    pub fn new(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == ncols),
            "all rows must be the same size"
        );
        let data = rows.into_iter().flatten().collect();
        Self::from_parts(nrows, ncols, data)
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// `n x 1` matrix holding `values`.
    pub fn column_vector(values: Vec<T>) -> Self {
        Self::from_parts(values.len(), 1, values)
    }

    fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        Self {
            data,
            rows,
            cols,
            columns: None,
            error: None,
        }
    }

    /// Attach display labels, one per column.
    ///
    /// # Panics
    ///
    /// Panics if the label count differs from the column count.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        assert_eq!(
            columns.len(),
            self.cols,
            "column labels must match the column count"
        );
        self.columns = Some(columns);
        self
    }

    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// First error latched by an operation chain ending in this matrix.
    pub fn err(&self) -> Option<&LinalgError> {
        self.error.as_ref()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Convert the latched state into a `Result` so a chain can end in `?`.
    pub fn into_result(self) -> Result<Self, LinalgError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        (0..self.rows).map(|r| self.row_slice(r).to_vec()).collect()
    }

    fn latch(&self, error: LinalgError) -> Self
    where
        T: Clone,
    {
        let mut m = self.clone();
        m.error = Some(error);
        m
    }
}

impl<T: Scalar> Matrix<T> {
    /// Zero matrix.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    pub fn filled(rows: usize, cols: usize, s: T) -> Self {
        let mut m = Self::from_parts(rows, cols, vec![T::zero(); rows * cols]);
        m.fill(s);
        m
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::empty(size, size);
        for i in 0..size {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Overwrite every element with `s`.
    pub fn fill(&mut self, s: T) {
        for v in self.data.iter_mut() {
            *v = s;
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self[(row, col)])
        } else {
            None
        }
    }

    pub fn column(&self, col: usize) -> Array1<T> {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    /// Rows and columns swapped. A 1x1 matrix is returned as is.
    pub fn transpose(&self) -> Self {
        if self.error.is_some() || (self.rows == 1 && self.cols == 1) {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)]);
            }
        }
        Self::from_parts(self.cols, self.rows, data)
    }

    pub fn add(&self, other: &Matrix<T>) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference, same contract as `self.add(&other.scale(-1))`.
    pub fn subtract(&self, other: &Matrix<T>) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    fn zip_with<F>(&self, other: &Matrix<T>, f: F) -> Self
    where
        F: Fn(T, T) -> T,
    {
        if self.error.is_some() {
            return self.clone();
        }
        if let Some(error) = &other.error {
            return self.latch(error.clone());
        }
        if self.size() != other.size() {
            return self.latch(LinalgError::ShapeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        let mut m = Self::from_parts(self.rows, self.cols, data);
        m.columns = self.columns.clone();
        m
    }

    pub fn scale(&self, s: T) -> Self {
        if self.error.is_some() {
            return self.clone();
        }
        Self::from_parts(
            self.rows,
            self.cols,
            self.data.iter().map(|&v| v * s).collect(),
        )
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix<T>) -> Self {
        if self.error.is_some() {
            return self.clone();
        }
        if let Some(error) = &other.error {
            return self.latch(error.clone());
        }
        if self.cols != other.rows {
            return self.latch(LinalgError::DimensionMismatch {
                left: self.cols,
                right: other.rows,
            });
        }
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = T::zero();
                for k in 0..self.cols {
                    sum = sum + self[(i, k)] * other[(k, j)];
                }
                data.push(sum);
            }
        }
        Self::from_parts(self.rows, other.cols, data)
    }

    /// Sums along `axis` as a single-row matrix: one value per row for
    /// `Row`, per column for `Column`, a 1x1 total for `All`.
    pub fn sum(&self, axis: Axis) -> Self {
        self.reduce(axis, |v| v.sum())
    }

    /// Means along `axis`, laid out like [`Matrix::sum`]. Integer scalars
    /// truncate.
    pub fn mean(&self, axis: Axis) -> Self {
        self.reduce(axis, |v| v.mean().unwrap_or_else(T::zero))
    }

    fn reduce<F>(&self, axis: Axis, f: F) -> Self
    where
        F: Fn(&Array1<T>) -> T,
    {
        if self.error.is_some() {
            return self.clone();
        }
        let values: Vec<T> = match axis {
            Axis::Row => (0..self.rows)
                .map(|r| f(&Array1::from(self.row_slice(r))))
                .collect(),
            Axis::Column => {
                let t = self.transpose();
                (0..t.rows)
                    .map(|r| f(&Array1::from(t.row_slice(r))))
                    .collect()
            }
            Axis::All => vec![f(&Array1::from(self.as_slice()))],
        };
        Self::from_parts(1, values.len(), values)
    }

    /// Elementwise map.
    pub fn apply<F>(&self, f: F) -> Self
    where
        F: FnMut(T) -> T,
    {
        if self.error.is_some() {
            return self.clone();
        }
        Self::from_parts(
            self.rows,
            self.cols,
            self.data.iter().copied().map(f).collect(),
        )
    }

    /// Drop row or column `n`. Column labels follow the kept columns.
    pub fn delete(&self, n: usize, axis: Axis) -> Self {
        if self.error.is_some() {
            return self.clone();
        }
        match axis {
            Axis::Row => {
                if n >= self.rows {
                    return self.latch(LinalgError::IndexOutOfRange {
                        index: n,
                        bound: self.rows,
                        axis,
                    });
                }
                let mut data = Vec::with_capacity((self.rows - 1) * self.cols);
                for row in (0..self.rows).filter(|&r| r != n) {
                    data.extend_from_slice(self.row_slice(row));
                }
                let mut m = Self::from_parts(self.rows - 1, self.cols, data);
                m.columns = self.columns.clone();
                m
            }
            Axis::Column => {
                if n >= self.cols {
                    return self.latch(LinalgError::IndexOutOfRange {
                        index: n,
                        bound: self.cols,
                        axis,
                    });
                }
                let mut data = Vec::with_capacity(self.rows * (self.cols - 1));
                for row in 0..self.rows {
                    let slice = self.row_slice(row);
                    data.extend_from_slice(&slice[..n]);
                    data.extend_from_slice(&slice[n + 1..]);
                }
                let mut m = Self::from_parts(self.rows, self.cols - 1, data);
                m.columns = self.columns.as_ref().map(|labels| {
                    let mut labels = labels.clone();
                    labels.remove(n);
                    labels
                });
                m
            }
            Axis::All => self.latch(LinalgError::UnsupportedAxis(axis)),
        }
    }

    /// `self` with row `i` and column `j` removed.
    pub fn minor(&self, i: usize, j: usize) -> Self {
        self.delete(i, Axis::Row).delete(j, Axis::Column)
    }

    pub fn reverse(&self, axis: Axis) -> Self {
        if self.error.is_some() {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.data.len());
        match axis {
            Axis::Row => {
                for row in (0..self.rows).rev() {
                    data.extend_from_slice(self.row_slice(row));
                }
            }
            Axis::Column => {
                for row in 0..self.rows {
                    data.extend(self.row_slice(row).iter().rev());
                }
            }
            Axis::All => data.extend(self.data.iter().rev()),
        }
        Self::from_parts(self.rows, self.cols, data)
    }

    /// New matrix with a leading column filled with `value`.
    pub fn prepend_column(&self, value: T) -> Self {
        if self.error.is_some() {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            data.push(value);
            data.extend_from_slice(self.row_slice(row));
        }
        let mut m = Self::from_parts(self.rows, self.cols + 1, data);
        m.columns = self.columns.as_ref().map(|labels| {
            std::iter::once("intercept".to_string())
                .chain(labels.iter().cloned())
                .collect()
        });
        m
    }

    /// Swap rows `a` and `b` in place.
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            let (ia, ib) = (self.offset(a, col), self.offset(b, col));
            self.data.swap(ia, ib);
        }
    }

    pub(crate) fn set_row(&mut self, row: usize, values: &[T]) {
        let start = self.offset(row, 0);
        self.data[start..start + self.cols].copy_from_slice(values);
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(columns) = &self.columns {
            writeln!(f, "{}", columns.join(","))?;
        }
        for row in 0..self.rows {
            write!(f, "{}: ", row)?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ",")?;
                }
            }
            writeln!(f)?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "error: {}", error)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
