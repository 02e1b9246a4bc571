//! LibSVM sparse text reader.
//!
//! Each line holds a label followed by `index:value` pairs with 1-based,
//! strictly increasing indices. Missing indices are zero and every row is
//! padded to the widest index seen, so the output is rectangular. Indices
//! above [`MAX_FEATURE_INDEX`] are rejected before any row is widened.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::error::LinalgError;
use crate::math::Matrix;

/// Largest accepted feature index. Rows are stored densely.
pub const MAX_FEATURE_INDEX: usize = 1 << 20;

/// Labels and dense feature rows parsed from LibSVM text.
#[derive(Debug, Clone, PartialEq)]
pub struct LibSvmData {
    pub labels: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
}

impl LibSvmData {
    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// Feature matrix, one row per sample.
    pub fn features(&self) -> Matrix<f64> {
        Matrix::new(self.rows.clone())
    }

    /// Labels as an `n x 1` target matrix.
    pub fn targets(&self) -> Matrix<f64> {
        Matrix::column_vector(self.labels.clone())
    }
}

/// Parse LibSVM text. Blank lines are skipped and `#` starts a comment.
pub fn parse_libsvm(text: &str) -> Result<LibSvmData, LinalgError> {
    let mut labels = Vec::new();
    let mut rows = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let label_token = tokens.next().unwrap_or_default();
        let label = label_token
            .parse::<f64>()
            .map_err(|_| format_error(line_no, format!("invalid label '{}'", label_token)))?;

        let mut row: Vec<f64> = Vec::new();
        let mut last_index = 0usize;
        for token in tokens {
            let (index, value) = token.split_once(':').ok_or_else(|| {
                format_error(line_no, format!("expected index:value, got '{}'", token))
            })?;
            let index = index.parse::<usize>().map_err(|_| {
                format_error(line_no, format!("invalid feature index in '{}'", token))
            })?;
            if index == 0 {
                return Err(format_error(line_no, "feature indices are 1-based".to_string()));
            }
            if index > MAX_FEATURE_INDEX {
                return Err(format_error(
                    line_no,
                    format!("index {} exceeds the limit of {}", index, MAX_FEATURE_INDEX),
                ));
            }
            if index <= last_index {
                return Err(format_error(
                    line_no,
                    format!("index {} does not follow {}", index, last_index),
                ));
            }
            let value = value.parse::<f64>().map_err(|_| {
                format_error(line_no, format!("invalid feature value in '{}'", token))
            })?;

            row.resize(index - 1, 0.0);
            row.push(value);
            last_index = index;
        }

        labels.push(label);
        rows.push(row);
    }

    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize(width, 0.0);
    }
    debug!("parsed {} LibSVM rows with {} features", rows.len(), width);

    Ok(LibSvmData { labels, rows })
}

/// Read a LibSVM file from disk.
pub fn read_libsvm<P: AsRef<Path>>(path: P) -> Result<LibSvmData> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open LibSVM file: {}", path.display()))?;
    let data = parse_libsvm(&text)
        .with_context(|| format!("Malformed LibSVM file: {}", path.display()))?;
    Ok(data)
}

fn format_error(line: usize, message: String) -> LinalgError {
    LinalgError::Format { line, message }
}
