// Engine Configuration
//
// Settings for the serialization boundary of the engine.

/// Configuration for JSON and CSV output
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Field delimiter for CSV export
    pub delimiter: u8,

    /// Pretty-print JSON output
    pub pretty_json: bool,

    /// Text written to CSV for null or missing values
    pub null_text: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            pretty_json: false,
            null_text: String::new(),
        }
    }
}

impl ExportConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn with_null_text(mut self, null_text: impl Into<String>) -> Self {
        self.null_text = null_text.into();
        self
    }
}
