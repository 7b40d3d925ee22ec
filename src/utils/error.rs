//! Error handling for tablesmith
//!
//! The structural algorithm itself is total; errors only arise when a grid
//! is constructed or when a table document is loaded.

use thiserror::Error;

/// Which header axis a configuration error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAxis {
    Rows,
    Columns,
}

impl std::fmt::Display for HeaderAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderAxis::Rows => write!(f, "header rows"),
            HeaderAxis::Columns => write!(f, "header columns"),
        }
    }
}

/// Table construction and loading error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Header count outside the supported `0..=2` range
    #[error("Unsupported header configuration: {count} {axis} (expected 0, 1 or 2)")]
    UnsupportedHeaderConfig { axis: HeaderAxis, count: usize },

    /// A row whose length differs from the first row
    #[error("Ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A table document could not be parsed
    #[error("{}", format_parse(message, *line))]
    Parse {
        message: String,
        line: Option<usize>,
    },

    /// Unknown document format
    #[error("Unsupported document format: {format}")]
    UnsupportedFormat { format: String },

    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

fn format_parse(message: &str, line: Option<usize>) -> String {
    match line {
        Some(l) => format!("Parse error at line {}: {}", l, message),
        None => format!("Parse error: {}", message),
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn parse(message: impl Into<String>) -> Self {
        TableError::Parse {
            message: message.into(),
            line: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize) -> Self {
        TableError::Parse {
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        TableError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn header_rows(count: usize) -> Self {
        TableError::UnsupportedHeaderConfig {
            axis: HeaderAxis::Rows,
            count,
        }
    }

    pub fn header_columns(count: usize) -> Self {
        TableError::UnsupportedHeaderConfig {
            axis: HeaderAxis::Columns,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = TableError::parse("unexpected token");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_parse_error_with_line() {
        let err = TableError::parse_at("bad row", 10);
        assert!(err.to_string().contains("line 10"));
    }

    #[test]
    fn test_header_config_error() {
        let msg = TableError::header_columns(3).to_string();
        assert!(msg.contains("3 header columns"));
    }

    #[test]
    fn test_ragged_grid_error() {
        let err = TableError::RaggedGrid {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Ragged grid: row 2 has 1 cells, expected 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
