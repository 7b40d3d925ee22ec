//! Grid model: the authored rectangular input and its header configuration

use indexmap::IndexMap;

use crate::utils::error::{TableError, TableResult};
use crate::utils::text::flatten_text;

/// Largest supported number of header rows or header columns
pub const MAX_HEADER_COUNT: usize = 2;

/// Authoring attributes attached to a source row (e.g. `data-aue-*`)
pub type RowMetadata = IndexMap<String, String>;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

/// A single authored cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Authored content (HTML fragment, emitted as-is)
    content: String,
    /// Flattened text content, used for merge decisions
    text: String,
}

impl Cell {
    /// Create a cell from its authored content
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let text = flatten_text(&content);
        Cell { content, text }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Cell::new(String::new())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Text content with markup removed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Cell {
    fn from(content: &str) -> Self {
        Cell::new(content)
    }
}

impl From<String> for Cell {
    fn from(content: String) -> Self {
        Cell::new(content)
    }
}

/// A grid row: one cell per column plus its authoring metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Copied untouched onto the assembled row
    pub metadata: RowMetadata,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Row {
            cells: cells.into_iter().map(Into::into).collect(),
            metadata: RowMetadata::new(),
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// How many leading rows and columns are headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderConfig {
    rows: usize,
    columns: usize,
}

impl HeaderConfig {
    /// No header rows, no header columns
    pub const NONE: HeaderConfig = HeaderConfig {
        rows: 0,
        columns: 0,
    };

    /// Create a header configuration, rejecting counts above two
    pub fn new(rows: usize, columns: usize) -> TableResult<Self> {
        if rows > MAX_HEADER_COUNT {
            return Err(TableError::header_rows(rows));
        }
        if columns > MAX_HEADER_COUNT {
            return Err(TableError::header_columns(columns));
        }
        Ok(HeaderConfig { rows, columns })
    }

    /// Build from the authored show/hide switches.
    ///
    /// A second header row (or column) only counts when the first one is
    /// switched on as well.
    pub fn from_flags(first_row: bool, second_row: bool, first_col: bool, second_col: bool) -> Self {
        if second_row && !first_row {
            tracing::warn!("second header row enabled without a first header row; ignoring");
        }
        if second_col && !first_col {
            tracing::warn!("second header column enabled without a first header column; ignoring");
        }

        let count = |first: bool, second: bool| match (first, second) {
            (true, true) => 2,
            (true, false) => 1,
            (false, _) => 0,
        };

        HeaderConfig {
            rows: count(first_row, second_row),
            columns: count(first_col, second_col),
        }
    }

    /// Number of header rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of header columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_header_row(&self, row: usize) -> bool {
        row < self.rows
    }

    pub fn is_header_column(&self, col: usize) -> bool {
        col < self.columns
    }

    /// Whether a position lies in a header row or a header column
    pub fn is_header(&self, pos: CellPos) -> bool {
        self.is_header_row(pos.row) || self.is_header_column(pos.col)
    }
}

/// The rectangular authored grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Row>,
    header: HeaderConfig,
    num_cols: usize,
}

impl Grid {
    /// Create a grid, rejecting rows of unequal length
    pub fn new(rows: Vec<Row>, header: HeaderConfig) -> TableResult<Self> {
        let num_cols = rows.first().map_or(0, Row::len);

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != num_cols) {
            return Err(TableError::RaggedGrid {
                row: idx,
                expected: num_cols,
                found: row.len(),
            });
        }

        if header.rows() > rows.len() || header.columns() > num_cols {
            tracing::warn!(
                header_rows = header.rows(),
                header_columns = header.columns(),
                rows = rows.len(),
                cols = num_cols,
                "header configuration exceeds grid size; extra headers are ignored"
            );
        }

        Ok(Grid {
            rows,
            header,
            num_cols,
        })
    }

    /// Build a grid straight from rows of authored content strings
    pub fn from_strings<R, S>(rows: R, header: HeaderConfig) -> TableResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|r| Row::from_cells(r.into_iter().map(Cell::new)))
            .collect();
        Grid::new(rows, header)
    }

    pub fn header(&self) -> HeaderConfig {
        self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.rows.get(pos.row).and_then(|r| r.cells.get(pos.col))
    }

    /// Flattened text at a position (empty when out of range)
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.cell(CellPos::new(row, col)).map_or("", Cell::text)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.num_cols == 0
    }

    /// Header rows actually present in this grid
    pub fn effective_header_rows(&self) -> usize {
        self.header.rows().min(self.rows.len())
    }

    /// Header columns actually present in this grid
    pub fn effective_header_columns(&self) -> usize {
        self.header.columns().min(self.num_cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_config_rejects_three() {
        assert_eq!(HeaderConfig::new(3, 0), Err(TableError::header_rows(3)));
        assert_eq!(HeaderConfig::new(1, 5), Err(TableError::header_columns(5)));
        assert!(HeaderConfig::new(2, 2).is_ok());
    }

    #[test]
    fn test_header_config_from_flags() {
        let cfg = HeaderConfig::from_flags(true, true, true, false);
        assert_eq!(cfg.rows(), 2);
        assert_eq!(cfg.columns(), 1);

        let cfg = HeaderConfig::from_flags(false, true, false, true);
        assert_eq!(cfg, HeaderConfig::NONE);
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        let err = Grid::from_strings(vec![vec!["a", "b"], vec!["c"]], HeaderConfig::NONE);
        assert_eq!(
            err,
            Err(TableError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_empty_grid_is_valid() {
        let grid = Grid::new(Vec::new(), HeaderConfig::new(1, 1).unwrap()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.effective_header_rows(), 0);
        assert_eq!(grid.effective_header_columns(), 0);
    }

    #[test]
    fn test_cell_text_is_flattened() {
        let cell = Cell::new("<strong>Plan</strong> A");
        assert_eq!(cell.text(), "Plan A");
        assert_eq!(cell.content(), "<strong>Plan</strong> A");
    }

    #[test]
    fn test_row_metadata() {
        let row = Row::from_cells(["x"]).with_metadata("data-aue-resource", "urn:row:1");
        assert_eq!(
            row.metadata.get("data-aue-resource").map(String::as_str),
            Some("urn:row:1")
        );
    }
}
