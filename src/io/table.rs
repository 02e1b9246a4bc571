//! Delimited text reader for dense regression data.
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::math::Matrix;

/// Feature and target matrices read from a table. `x` carries the feature
/// header names as column labels.
#[derive(Debug, Clone)]
pub struct TableData {
    pub x: Matrix<f64>,
    pub y: Matrix<f64>,
}

/// Configuration for reading delimited tables.
#[derive(Debug, Clone)]
pub struct TableReaderConfig {
    /// Column holding the regression target.
    pub target_column: String,
    /// Field delimiter, `,` by default.
    pub delimiter: u8,
    /// Optional list of feature columns to load (in order).
    /// When `None`, every column except the target is a feature.
    pub feature_columns: Option<Vec<String>>,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            target_column: "y".to_string(),
            delimiter: b',',
            feature_columns: None,
        }
    }
}

/// Read a delimited file with a header row.
pub fn read_table<P: AsRef<Path>>(path: P, config: &TableReaderConfig) -> Result<TableData> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open table: {}", path.as_ref().display()))?;
    read_records(reader, config)
}

/// Same as [`read_table`] for any reader.
pub fn read_table_from<R: Read>(input: R, config: &TableReaderConfig) -> Result<TableData> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_reader(input);
    read_records(reader, config)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>, config: &TableReaderConfig) -> Result<TableData> {
    let headers = reader
        .headers()
        .context("Failed to read table header row")?
        .clone();

    let target_idx = find_column(&headers, &config.target_column)
        .ok_or_else(|| anyhow!("Missing target column '{}'", config.target_column))?;

    let feature_indices = match &config.feature_columns {
        Some(names) => names
            .iter()
            .map(|name| {
                find_column(&headers, name)
                    .ok_or_else(|| anyhow!("Missing feature column '{}'", name))
            })
            .collect::<Result<Vec<_>>>()?,
        None => (0..headers.len()).filter(|&idx| idx != target_idx).collect(),
    };
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns detected in table header"));
    }

    let mut features = Vec::new();
    let mut targets = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        targets.push(parse_field(&record, &headers, target_idx, row_idx)?);
        for &idx in &feature_indices {
            features.push(parse_field(&record, &headers, idx, row_idx)?);
        }
    }

    let n_samples = targets.len();
    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();
    let x = Matrix::from_shape_vec((n_samples, feature_indices.len()), features)
        .context("Failed to build feature matrix")?
        .with_columns(feature_names);
    let y = Matrix::column_vector(targets);

    Ok(TableData { x, y })
}

fn parse_field(record: &StringRecord, headers: &StringRecord, idx: usize, row_idx: usize) -> Result<f64> {
    let value = record
        .get(idx)
        .ok_or_else(|| anyhow!("Missing value at row {}", row_idx + 1))?;
    value.trim().parse::<f64>().with_context(|| {
        format!(
            "Invalid value '{}' for '{}' at row {}",
            value,
            headers.get(idx).unwrap_or(""),
            row_idx + 1
        )
    })
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_target_from_features() {
        let text = "x1,y,x2\n1,3,0.5\n2,5,1.5\n";
        let data = read_table_from(text.as_bytes(), &TableReaderConfig::default()).unwrap();
        assert_eq!(data.x.to_rows(), vec![vec![1.0, 0.5], vec![2.0, 1.5]]);
        assert_eq!(data.x.columns(), Some(&["x1".to_string(), "x2".to_string()][..]));
        assert_eq!(data.y.to_rows(), vec![vec![3.0], vec![5.0]]);
    }

    #[test]
    fn selected_features_and_tab_delimiter() {
        let config = TableReaderConfig {
            target_column: "Weight".to_string(),
            delimiter: b'\t',
            feature_columns: Some(vec!["height".to_string()]),
        };
        let text = "id\tHeight\tWeight\n7\t1.47\t52.21\n";
        let data = read_table_from(text.as_bytes(), &config).unwrap();
        assert_eq!(data.x.to_rows(), vec![vec![1.47]]);
        assert_eq!(data.y.to_rows(), vec![vec![52.21]]);
    }

    #[test]
    fn missing_target_or_bad_value() {
        let config = TableReaderConfig::default();
        assert!(read_table_from("a,b\n1,2\n".as_bytes(), &config).is_err());
        assert!(read_table_from("x,y\n1,oops\n".as_bytes(), &config).is_err());
    }
}
