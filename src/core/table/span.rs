//! Span matrix: per-position spans, style markers and header scope

use indexmap::IndexSet;
use std::fmt;

/// Structural style marker attached to a cell, rendered as a class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StyleMarker {
    FirstColumnCell,
    CornerBottomLeft,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomRight,
    HeaderColumnCell,
    HeaderColumnCellLast,
    InRowspan,
}

impl StyleMarker {
    /// Class name used for styling hooks
    pub fn as_class(&self) -> &'static str {
        match self {
            StyleMarker::FirstColumnCell => "first-column-cell",
            StyleMarker::CornerBottomLeft => "corner-bottom-left",
            StyleMarker::CornerTopLeft => "corner-top-left",
            StyleMarker::CornerTopRight => "corner-top-right",
            StyleMarker::CornerBottomRight => "corner-bottom-right",
            StyleMarker::HeaderColumnCell => "header-column-cell",
            StyleMarker::HeaderColumnCellLast => "header-column-cell-last",
            StyleMarker::InRowspan => "in-rowspan",
        }
    }
}

impl fmt::Display for StyleMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

/// De-duplicated marker set.
///
/// Iteration follows insertion order; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MarkerSet(IndexSet<StyleMarker>);

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker; adding one already present is a no-op
    pub fn insert(&mut self, marker: StyleMarker) -> bool {
        self.0.insert(marker)
    }

    pub fn contains(&self, marker: StyleMarker) -> bool {
        self.0.contains(&marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleMarker> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-separated class attribute value
    pub fn to_class_string(&self) -> String {
        self.iter()
            .map(|m| m.as_class())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<StyleMarker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = StyleMarker>>(iter: I) -> Self {
        MarkerSet(iter.into_iter().collect())
    }
}

/// Header cell scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scope {
    Col,
    Row,
    Colgroup,
    Rowgroup,
}

impl Scope {
    /// Value of the `scope` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Col => "col",
            Scope::Row => "row",
            Scope::Colgroup => "colgroup",
            Scope::Rowgroup => "rowgroup",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved state of one grid position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanCell {
    /// Columns covered; 0 means absorbed into a cell to the left
    pub colspan: u32,
    /// Rows covered; 0 means absorbed into a cell above
    pub rowspan: u32,
    /// A colspan run may not continue past this cell
    #[cfg_attr(feature = "serde", serde(skip))]
    pub end_colspan_boundary: bool,
    /// A rowspan run may not continue past this cell
    #[cfg_attr(feature = "serde", serde(skip))]
    pub end_rowspan_boundary: bool,
    pub markers: MarkerSet,
    pub scope: Option<Scope>,
}

impl SpanCell {
    pub fn new() -> Self {
        SpanCell {
            colspan: 1,
            rowspan: 1,
            end_colspan_boundary: false,
            end_rowspan_boundary: false,
            markers: MarkerSet::new(),
            scope: None,
        }
    }

    /// Whether the cell has been merged away and must not be rendered
    pub fn is_absorbed(&self) -> bool {
        self.colspan == 0 || self.rowspan == 0
    }

    pub fn has_marker(&self, marker: StyleMarker) -> bool {
        self.markers.contains(marker)
    }
}

impl Default for SpanCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid-shaped matrix of resolved spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanMatrix {
    rows: Vec<Vec<SpanCell>>,
}

impl SpanMatrix {
    /// All-ones matrix of the given shape
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        SpanMatrix {
            rows: vec![vec![SpanCell::new(); num_cols]; num_rows],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&SpanCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut SpanCell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    pub fn row(&self, row: usize) -> Option<&[SpanCell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[SpanCell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Add a marker at a position; out-of-range positions are ignored
    pub fn mark(&mut self, row: usize, col: usize, marker: StyleMarker) {
        if let Some(cell) = self.get_mut(row, col) {
            cell.markers.insert(marker);
        }
    }

    /// `(colspan, rowspan)` per position, handy for comparisons
    pub fn span_grid(&self) -> Vec<Vec<(u32, u32)>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| (c.colspan, c.rowspan)).collect())
            .collect()
    }
}
