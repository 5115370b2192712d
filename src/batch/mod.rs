//! Batch processing and repository comparison

pub mod comparison;
pub mod csv_input;
pub mod processor;

pub use comparison::{compare_results, compare_targets};
pub use csv_input::{read_batch_file, validate_csv};
pub use processor::{export_to_csv, export_to_json, BatchProcessor, CSV_HEADER};
