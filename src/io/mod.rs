//! IO utilities for loading regression data.

pub mod libsvm;
pub mod table;

pub use libsvm::{parse_libsvm, read_libsvm, LibSvmData, MAX_FEATURE_INDEX};
pub use table::{read_table, read_table_from, TableData, TableReaderConfig};
