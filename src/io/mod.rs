// Data Interchange Module
//
// Loading datasets from JSON and writing results out as JSON or CSV. These
// are the only fallible parts of the crate.

pub mod csv;
pub mod json;

pub use self::csv::{ExportOutcome, export_csv, render_csv};
pub use self::json::{records_from_json_str, records_from_path, records_from_reader, to_json_string};
