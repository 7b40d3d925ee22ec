//! Table assembly: header/body sectioning, column groups and header scope

use super::grid::{CellPos, Grid, RowMetadata};
use super::span::{MarkerSet, Scope, SpanMatrix};

/// Column marker derived from the first row's colspans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum ColumnGroup {
    /// A single, independent column
    Single,
    /// Columns grouped under one merged header cell
    Group { span: u32 },
}

impl ColumnGroup {
    /// Number of grid columns covered
    pub fn span(&self) -> u32 {
        match self {
            ColumnGroup::Single => 1,
            ColumnGroup::Group { span } => *span,
        }
    }
}

/// Whether a cell renders as a header or a data cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellKind {
    Header,
    #[default]
    Data,
}

/// A rendered cell of the assembled table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembledCell {
    pub row: usize,
    pub column: usize,
    /// Authored content, untouched
    pub content: String,
    pub kind: CellKind,
    pub colspan: u32,
    pub rowspan: u32,
    pub scope: Option<Scope>,
    pub markers: MarkerSet,
}

impl AssembledCell {
    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.column)
    }

    pub fn is_header(&self) -> bool {
        self.kind == CellKind::Header
    }
}

/// A rendered row; `index` is the row's position in the source grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembledRow {
    pub index: usize,
    pub metadata: RowMetadata,
    pub cells: Vec<AssembledCell>,
}

/// Ordered rows belonging to the header or to one body group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub rows: Vec<AssembledRow>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Source grid indices of the rows in this section
    pub fn row_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }
}

/// Fully structured table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembledTable {
    /// Column markers (empty without header rows)
    pub columns: Vec<ColumnGroup>,
    pub header: Section,
    pub bodies: Vec<Section>,
    /// Resolved spans, markers and scopes for every grid position
    pub spans: SpanMatrix,
    /// Header columns of the source grid
    pub header_columns: usize,
}

impl AssembledTable {
    /// Iterate over every rendered row, header first
    pub fn all_rows(&self) -> impl Iterator<Item = &AssembledRow> {
        self.header
            .rows
            .iter()
            .chain(self.bodies.iter().flat_map(|s| s.rows.iter()))
    }

    /// Find a rendered cell by its grid position
    pub fn cell(&self, pos: CellPos) -> Option<&AssembledCell> {
        self.all_rows()
            .filter(|r| r.index == pos.row)
            .flat_map(|r| r.cells.iter())
            .find(|c| c.column == pos.col)
    }
}

/// Partitions rows into sections and derives header semantics
pub struct TableAssembler<'a> {
    grid: &'a Grid,
}

impl<'a> TableAssembler<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        TableAssembler { grid }
    }

    /// Assemble the table from a classified span matrix
    pub fn assemble(&self, mut spans: SpanMatrix) -> AssembledTable {
        let _span = tracing::debug_span!(
            "assemble",
            rows = self.grid.num_rows(),
            cols = self.grid.num_cols()
        )
        .entered();

        self.assign_scopes(&mut spans);

        let columns = self.column_groups(&spans);
        let header_rows = self.grid.header().rows();

        let mut header = Section::new();
        let mut body_rows = Vec::new();
        for idx in 0..self.grid.num_rows() {
            let row = self.assemble_row(idx, &spans);
            if idx < header_rows {
                header.rows.push(row);
            } else {
                body_rows.push(row);
            }
        }

        let bodies = self.split_bodies(body_rows, &spans);
        tracing::debug!(
            header_rows = header.len(),
            body_sections = bodies.len(),
            "assembled table"
        );

        AssembledTable {
            columns,
            header,
            bodies,
            spans,
            header_columns: self.grid.header().columns(),
        }
    }

    /// Column markers from row 0's resolved colspans
    fn column_groups(&self, spans: &SpanMatrix) -> Vec<ColumnGroup> {
        if self.grid.header().rows() == 0 {
            return Vec::new();
        }

        spans
            .row(0)
            .unwrap_or_default()
            .iter()
            .filter_map(|cell| match cell.colspan {
                0 => None,
                1 => Some(ColumnGroup::Single),
                span => Some(ColumnGroup::Group { span }),
            })
            .collect()
    }

    /// Header cells get a scope; everything else stays `None`
    fn assign_scopes(&self, spans: &mut SpanMatrix) {
        for row in 0..spans.num_rows() {
            for col in 0..spans.num_cols() {
                let is_header = self.is_header_cell(row, col);
                if let Some(cell) = spans.get_mut(row, col) {
                    cell.scope = if !is_header {
                        None
                    } else if cell.rowspan > 1 {
                        Some(Scope::Rowgroup)
                    } else if cell.colspan > 1 {
                        Some(Scope::Colgroup)
                    } else if self.grid.header().is_header_row(row) {
                        Some(Scope::Col)
                    } else {
                        Some(Scope::Row)
                    };
                }
            }
        }
    }

    /// Header row or header column, except an empty top-left corner
    fn is_header_cell(&self, row: usize, col: usize) -> bool {
        if !self.grid.header().is_header(CellPos::new(row, col)) {
            return false;
        }
        !(row == 0 && col == 0 && self.grid.text(0, 0).is_empty())
    }

    fn assemble_row(&self, idx: usize, spans: &SpanMatrix) -> AssembledRow {
        let source = self.grid.row(idx);
        let metadata = source.map(|r| r.metadata.clone()).unwrap_or_default();

        let cells = source
            .map(|r| r.cells.as_slice())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(col, cell)| {
                let span = spans.get(idx, col)?;
                if span.is_absorbed() {
                    return None;
                }
                Some(AssembledCell {
                    row: idx,
                    column: col,
                    content: cell.content().to_string(),
                    kind: if self.is_header_cell(idx, col) {
                        CellKind::Header
                    } else {
                        CellKind::Data
                    },
                    colspan: span.colspan,
                    rowspan: span.rowspan,
                    scope: span.scope,
                    markers: span.markers.clone(),
                })
            })
            .collect();

        AssembledRow {
            index: idx,
            metadata,
            cells,
        }
    }

    /// Split body rows into groups on first-column rowspans.
    ///
    /// A rowspan above one opens a new group; the first plain row after a
    /// group closes it again. Continuation rows (rowspan zero) stay with
    /// whatever group is open.
    fn split_bodies(&self, rows: Vec<AssembledRow>, spans: &SpanMatrix) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = Section::new();
        let mut in_rowgroup = false;

        for row in rows {
            let rowspan = spans.get(row.index, 0).map_or(1, |c| c.rowspan);

            if rowspan > 1 {
                if !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                }
                in_rowgroup = true;
            } else if rowspan == 1 && in_rowgroup {
                if !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                }
                in_rowgroup = false;
            }

            current.rows.push(row);
        }

        if !current.is_empty() {
            sections.push(current);
        }

        sections
    }
}

/// Assemble a table from its grid and classified spans
pub fn assemble(grid: &Grid, spans: SpanMatrix) -> AssembledTable {
    TableAssembler::new(grid).assemble(spans)
}
