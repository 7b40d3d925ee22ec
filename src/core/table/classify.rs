//! Structural style markers (corners, header-column membership, rowspan continuation)

use super::grid::Grid;
use super::span::{SpanMatrix, StyleMarker};

/// Assigns style markers to a resolved span matrix
///
/// Every rule is additive; a cell may collect several markers.
pub struct ClassificationEngine<'a> {
    grid: &'a Grid,
}

impl<'a> ClassificationEngine<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        ClassificationEngine { grid }
    }

    /// Attach markers to `spans` and hand it back
    pub fn classify(&self, mut spans: SpanMatrix) -> SpanMatrix {
        let num_rows = spans.num_rows();
        let num_cols = spans.num_cols();

        let _span = tracing::debug_span!("classify", rows = num_rows, cols = num_cols).entered();

        if num_rows == 0 || num_cols == 0 {
            return spans;
        }

        self.mark_first_column(&mut spans, num_rows);
        self.mark_corners(&mut spans, num_rows, num_cols);
        self.mark_header_columns(&mut spans, num_rows);
        self.mark_in_rowspan(&mut spans, num_rows);

        spans
    }

    fn mark_first_column(&self, spans: &mut SpanMatrix, num_rows: usize) {
        for row in 0..num_rows {
            spans.mark(row, 0, StyleMarker::FirstColumnCell);
        }

        // Last rendered cell of the first column
        if let Some(row) = (0..num_rows)
            .rev()
            .find(|&r| spans.get(r, 0).is_some_and(|c| c.rowspan != 0))
        {
            spans.mark(row, 0, StyleMarker::CornerBottomLeft);
        }
    }

    fn mark_corners(&self, spans: &mut SpanMatrix, num_rows: usize, num_cols: usize) {
        spans.mark(0, 0, StyleMarker::CornerTopLeft);

        let top_right = (0..num_cols)
            .rev()
            .find(|&c| spans.get(0, c).is_some_and(|cell| cell.colspan != 0))
            .unwrap_or(num_cols - 1);
        spans.mark(0, top_right, StyleMarker::CornerTopRight);

        spans.mark(num_rows - 1, num_cols - 1, StyleMarker::CornerBottomRight);
    }

    fn mark_header_columns(&self, spans: &mut SpanMatrix, num_rows: usize) {
        let header_cols = self.grid.header().columns();
        let num_cols = spans.num_cols();

        for row in 0..num_rows {
            for col in 0..header_cols.min(num_cols) {
                spans.mark(row, col, StyleMarker::HeaderColumnCell);

                let spans_boundary = spans
                    .get(row, col)
                    .is_some_and(|c| c.colspan as usize == header_cols);
                if col == header_cols - 1 || spans_boundary {
                    spans.mark(row, col, StyleMarker::HeaderColumnCellLast);
                }
            }
        }
    }

    /// First-column cells sitting beside a second-column rowspan
    fn mark_in_rowspan(&self, spans: &mut SpanMatrix, num_rows: usize) {
        if self.grid.header().columns() < 2 || spans.num_cols() < 2 {
            return;
        }

        for row in 0..num_rows {
            let rowspan = spans.get(row, 1).map_or(0, |c| c.rowspan as usize);
            if rowspan <= 1 {
                continue;
            }
            for covered in (row + 1)..(row + rowspan).min(num_rows) {
                spans.mark(covered, 0, StyleMarker::InRowspan);
            }
        }
    }
}

/// Attach style markers to a resolved span matrix
pub fn classify(grid: &Grid, spans: SpanMatrix) -> SpanMatrix {
    ClassificationEngine::new(grid).classify(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::grid::HeaderConfig;
    use crate::core::table::resolver::resolve;

    fn classified(rows: Vec<Vec<&str>>, hr: usize, hc: usize) -> SpanMatrix {
        let grid = Grid::from_strings(rows, HeaderConfig::new(hr, hc).unwrap()).unwrap();
        classify(&grid, resolve(&grid))
    }

    #[test]
    fn test_corners_plain_grid() {
        let m = classified(vec![vec!["a", "b"], vec!["c", "d"]], 0, 0);
        assert!(m.get(0, 0).unwrap().has_marker(StyleMarker::CornerTopLeft));
        assert!(m.get(0, 1).unwrap().has_marker(StyleMarker::CornerTopRight));
        assert!(m.get(1, 0).unwrap().has_marker(StyleMarker::CornerBottomLeft));
        assert!(m.get(1, 1).unwrap().has_marker(StyleMarker::CornerBottomRight));
        assert!(m.get(1, 0).unwrap().has_marker(StyleMarker::FirstColumnCell));
        assert!(!m.get(1, 1).unwrap().has_marker(StyleMarker::FirstColumnCell));
    }

    #[test]
    fn test_top_right_skips_absorbed_cells() {
        let m = classified(vec![vec!["a", "b", "b"], vec!["1", "2", "3"]], 1, 0);
        assert!(m.get(0, 1).unwrap().has_marker(StyleMarker::CornerTopRight));
        assert!(!m.get(0, 2).unwrap().has_marker(StyleMarker::CornerTopRight));
    }

    #[test]
    fn test_top_right_on_single_merged_row() {
        let m = classified(vec![vec!["a", "a", "a"]], 1, 0);
        assert!(m.get(0, 0).unwrap().has_marker(StyleMarker::CornerTopRight));
        assert!(m.get(0, 0).unwrap().has_marker(StyleMarker::CornerTopLeft));
    }

    #[test]
    fn test_header_column_last_by_span() {
        // The top-left header cell spans both header columns.
        let m = classified(
            vec![
                vec!["Region", "Region", "Q1"],
                vec!["North", "n1", "1"],
                vec!["South", "s1", "2"],
            ],
            1,
            2,
        );
        assert_eq!(m.get(0, 0).unwrap().colspan, 2);
        assert!(m.get(0, 0).unwrap().has_marker(StyleMarker::HeaderColumnCellLast));
        assert!(m.get(1, 1).unwrap().has_marker(StyleMarker::HeaderColumnCellLast));
        assert!(!m.get(1, 0).unwrap().has_marker(StyleMarker::HeaderColumnCellLast));
        assert!(m.get(1, 0).unwrap().has_marker(StyleMarker::HeaderColumnCell));
        assert!(!m.get(1, 2).unwrap().has_marker(StyleMarker::HeaderColumnCell));
    }

    #[test]
    fn test_in_rowspan_beside_second_column() {
        let m = classified(
            vec![
                vec!["a", "g", "1"],
                vec!["b", "g", "2"],
                vec!["c", "g", "3"],
                vec!["d", "h", "4"],
            ],
            0,
            2,
        );
        assert_eq!(m.get(0, 1).unwrap().rowspan, 3);
        assert!(!m.get(0, 0).unwrap().has_marker(StyleMarker::InRowspan));
        assert!(m.get(1, 0).unwrap().has_marker(StyleMarker::InRowspan));
        assert!(m.get(2, 0).unwrap().has_marker(StyleMarker::InRowspan));
        assert!(!m.get(3, 0).unwrap().has_marker(StyleMarker::InRowspan));
    }

    #[test]
    fn test_no_in_rowspan_with_one_header_column() {
        let m = classified(vec![vec!["a", "g"], vec!["b", "g"]], 0, 1);
        assert!(m.rows().flatten().all(|c| !c.has_marker(StyleMarker::InRowspan)));
    }

    #[test]
    fn test_empty_matrix() {
        let m = classified(Vec::new(), 1, 1);
        assert_eq!(m.num_rows(), 0);
    }
}
