//! Table document loading
//!
//! A table document bundles the authored rows with the table configuration
//! (header counts, caption, freezing). JSON, YAML and TOML carry the whole
//! document; CSV carries rows only and leaves the configuration at its
//! defaults.
//!
//! ```json
//! {
//!   "config": { "header_rows": 1, "header_columns": 1, "caption": "Sales" },
//!   "rows": [["", "Q1", "Q2"], ["North", "10", "12"]]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::table::{Grid, HeaderConfig, Row, RowMetadata};
use crate::features::render::TableProperties;
use crate::utils::error::{TableError, TableResult};

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

/// Table configuration as authored
///
/// Missing fields take their defaults; `show_caption` defaults to on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub header_rows: usize,
    pub header_columns: usize,
    pub caption: Option<String>,
    pub show_caption: bool,
    pub freeze_header_columns: bool,
    pub scroll_label: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_rows: 0,
            header_columns: 0,
            caption: None,
            show_caption: true,
            freeze_header_columns: false,
            scroll_label: None,
        }
    }
}

impl TableConfig {
    /// Parse a standalone TOML configuration file
    pub fn from_toml_str(text: &str) -> TableResult<Self> {
        toml::from_str(text).map_err(|e| toml_error(text, e))
    }

    /// Validated header configuration
    pub fn header_config(&self) -> TableResult<HeaderConfig> {
        HeaderConfig::new(self.header_rows, self.header_columns)
    }

    /// Properties handed to the renderer and scroll controller
    pub fn properties(&self) -> TableProperties {
        TableProperties {
            caption: self.caption.clone(),
            show_caption: self.show_caption,
            freeze_header_columns: self.freeze_header_columns,
            scroll_label: self.scroll_label.clone(),
        }
    }
}

/// Partial configuration layered over a document's own settings
///
/// Only the keys that are present replace the underlying values, so a
/// configuration file can set a caption without resetting header counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub header_rows: Option<usize>,
    pub header_columns: Option<usize>,
    pub caption: Option<String>,
    pub show_caption: Option<bool>,
    pub freeze_header_columns: Option<bool>,
    pub scroll_label: Option<String>,
}

impl ConfigOverrides {
    /// Parse a TOML configuration file
    pub fn from_toml_str(text: &str) -> TableResult<Self> {
        toml::from_str(text).map_err(|e| toml_error(text, e))
    }

    /// Overwrite the fields of `config` that this layer sets
    pub fn apply(&self, config: &mut TableConfig) {
        if let Some(rows) = self.header_rows {
            config.header_rows = rows;
        }
        if let Some(columns) = self.header_columns {
            config.header_columns = columns;
        }
        if let Some(ref caption) = self.caption {
            config.caption = Some(caption.clone());
        }
        if let Some(show) = self.show_caption {
            config.show_caption = show;
        }
        if let Some(freeze) = self.freeze_header_columns {
            config.freeze_header_columns = freeze;
        }
        if let Some(ref label) = self.scroll_label {
            config.scroll_label = Some(label.clone());
        }
    }
}

/// Rows plus configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDocument {
    pub config: TableConfig,
    /// Authored cell content, row by row
    pub rows: Vec<Vec<String>>,
    /// Per-row attributes, matched to `rows` by position
    pub row_metadata: Vec<RowMetadata>,
}

impl TableDocument {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        TableDocument {
            rows,
            ..Self::default()
        }
    }

    /// Build the grid, validating header counts and row lengths
    pub fn to_grid(&self) -> TableResult<Grid> {
        let header = self.config.header_config()?;

        if self.row_metadata.len() > self.rows.len() {
            tracing::warn!(
                rows = self.rows.len(),
                metadata = self.row_metadata.len(),
                "more row metadata entries than rows; extra entries are ignored"
            );
        }

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, cells)| {
                let mut row = Row::from_cells(cells.iter().map(String::as_str));
                if let Some(metadata) = self.row_metadata.get(idx) {
                    row.metadata = metadata.clone();
                }
                row
            })
            .collect();

        Grid::new(rows, header)
    }
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
    Csv,
}

impl DocumentFormat {
    /// Format for a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "toml" => Some(DocumentFormat::Toml),
            "csv" => Some(DocumentFormat::Csv),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Toml => "toml",
            DocumentFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentFormat::from_extension(s).ok_or_else(|| TableError::unsupported_format(s))
    }
}

/// Parse a table document from text
pub fn parse_document(text: &str, format: DocumentFormat) -> TableResult<TableDocument> {
    let _span =
        tracing::debug_span!("parse_document", format = %format, bytes = text.len()).entered();

    let document = match format {
        DocumentFormat::Json => serde_json::from_str(text)
            .map_err(|e| TableError::parse_at(e.to_string(), e.line()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| match e.location() {
            Some(loc) => TableError::parse_at(e.to_string(), loc.line()),
            None => TableError::parse(e.to_string()),
        })?,
        DocumentFormat::Toml => toml::from_str(text).map_err(|e| toml_error(text, e))?,
        DocumentFormat::Csv => TableDocument::new(parse_csv(text)?),
    };

    tracing::debug!(rows = document.rows.len(), "parsed table document");
    Ok(document)
}

/// Load a table document, picking the format from the file extension
#[cfg(not(target_arch = "wasm32"))]
pub fn load_document(path: impl AsRef<Path>) -> TableResult<TableDocument> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = DocumentFormat::from_extension(ext)
        .ok_or_else(|| TableError::unsupported_format(path.display().to_string()))?;

    let text = std::fs::read_to_string(path)?;
    parse_document(&text, format)
}

/// Rows of a headerless CSV file; row lengths are checked by the grid
fn parse_csv(text: &str) -> TableResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| match e.position() {
            Some(pos) => TableError::parse_at(e.to_string(), pos.line() as usize),
            None => TableError::parse(e.to_string()),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn toml_error(text: &str, err: toml::de::Error) -> TableError {
    let message = err.message().to_string();
    match err.span() {
        Some(span) => {
            let before = text.get(..span.start).unwrap_or(text);
            let line = before.matches('\n').count() + 1;
            TableError::parse_at(message, line)
        }
        None => TableError::parse(message),
    }
}
