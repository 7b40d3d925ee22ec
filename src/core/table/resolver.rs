//! Span resolution: merge runs of equal-text cells along header rows and columns

use super::grid::Grid;
use super::span::SpanMatrix;

/// Direction a span run is scanned in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunAxis {
    /// Down a header column, producing rowspans
    Column,
    /// Along a header row, producing colspans
    Row,
}

/// Computes colspan/rowspan for every cell of a grid
///
/// Only header rows and header columns are merged. Body cells always keep
/// a span of one in both directions.
pub struct SpanResolver<'a> {
    grid: &'a Grid,
    header_rows: usize,
    header_cols: usize,
}

impl<'a> SpanResolver<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        SpanResolver {
            grid,
            header_rows: grid.effective_header_rows(),
            header_cols: grid.effective_header_columns(),
        }
    }

    /// Resolve the span matrix for the grid
    pub fn resolve(&self) -> SpanMatrix {
        let _span = tracing::debug_span!(
            "resolve_spans",
            rows = self.grid.num_rows(),
            cols = self.grid.num_cols(),
            header_rows = self.header_rows,
            header_cols = self.header_cols
        )
        .entered();

        let mut spans = SpanMatrix::new(self.grid.num_rows(), self.grid.num_cols());

        self.mark_boundaries(&mut spans);

        for col in 0..self.header_cols {
            self.merge_runs(&mut spans, RunAxis::Column, col);
        }
        for row in 0..self.header_rows {
            self.merge_runs(&mut spans, RunAxis::Row, row);
        }

        self.fold_header_corner(&mut spans);

        spans
    }

    /// Cut merges along the last header row and last header column so no run
    /// crosses from the header block into the body.
    fn mark_boundaries(&self, spans: &mut SpanMatrix) {
        let header = self.grid.header();
        if header.rows() == 0 || header.columns() == 0 {
            return;
        }

        let last_header_row = header.rows() - 1;
        for col in 0..self.grid.num_cols() {
            if let Some(cell) = spans.get_mut(last_header_row, col) {
                cell.end_rowspan_boundary = true;
            }
        }

        let last_header_col = header.columns() - 1;
        for row in 0..self.grid.num_rows() {
            if let Some(cell) = spans.get_mut(row, last_header_col) {
                cell.end_colspan_boundary = true;
            }
        }
    }

    /// Walk one header column (or row) collapsing runs of equal text.
    ///
    /// A run continues while the text matches the previous cell and that
    /// previous cell is not a boundary. The run length lands on the run's
    /// first cell; every other member gets a span of zero.
    fn merge_runs(&self, spans: &mut SpanMatrix, axis: RunAxis, line: usize) {
        let len = match axis {
            RunAxis::Column => self.grid.num_rows(),
            RunAxis::Row => self.grid.num_cols(),
        };
        if len == 0 {
            return;
        }

        let pos = |i: usize| match axis {
            RunAxis::Column => (i, line),
            RunAxis::Row => (line, i),
        };

        let mut anchor = 0;
        let mut run_len: u32 = 1;
        let (r0, c0) = pos(0);
        let mut prev_text = self.grid.text(r0, c0);
        let mut prev_boundary = boundary(spans, axis, r0, c0);

        for i in 1..len {
            let (r, c) = pos(i);
            let text = self.grid.text(r, c);

            if text == prev_text && !prev_boundary {
                set_span(spans, axis, r, c, 0);
                run_len += 1;
            } else {
                self.close_run(spans, axis, pos(anchor), run_len);
                anchor = i;
                run_len = 1;
            }

            prev_text = text;
            prev_boundary = boundary(spans, axis, r, c);
        }

        self.close_run(spans, axis, pos(anchor), run_len);
    }

    fn close_run(&self, spans: &mut SpanMatrix, axis: RunAxis, (r, c): (usize, usize), len: u32) {
        if len > 1 {
            tracing::debug!(row = r, col = c, len, axis = ?axis, "merged span run");
        }
        set_span(spans, axis, r, c, len);
    }

    /// Fold the diagonal partner of a fully merged 2x2 header corner.
    ///
    /// Only applies with exactly two header rows and two header columns.
    fn fold_header_corner(&self, spans: &mut SpanMatrix) {
        let header = self.grid.header();
        if header.rows() != 2 || header.columns() != 2 {
            return;
        }

        let corner_merged = spans
            .get(0, 0)
            .is_some_and(|c| c.colspan == 2 && c.rowspan == 2);
        if !corner_merged {
            return;
        }

        if let Some(partner) = spans.get_mut(1, 1) {
            tracing::debug!("folding cell (1, 1) into merged 2x2 header corner");
            partner.colspan = 0;
            partner.rowspan = 0;
        }
    }
}

fn boundary(spans: &SpanMatrix, axis: RunAxis, row: usize, col: usize) -> bool {
    spans.get(row, col).is_some_and(|c| match axis {
        RunAxis::Column => c.end_rowspan_boundary,
        RunAxis::Row => c.end_colspan_boundary,
    })
}

fn set_span(spans: &mut SpanMatrix, axis: RunAxis, row: usize, col: usize, value: u32) {
    if let Some(cell) = spans.get_mut(row, col) {
        match axis {
            RunAxis::Column => cell.rowspan = value,
            RunAxis::Row => cell.colspan = value,
        }
    }
}

/// Resolve spans for a grid
pub fn resolve(grid: &Grid) -> SpanMatrix {
    SpanResolver::new(grid).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::grid::HeaderConfig;
    use pretty_assertions::assert_eq;

    fn grid(rows: Vec<Vec<&str>>, hr: usize, hc: usize) -> Grid {
        Grid::from_strings(rows, HeaderConfig::new(hr, hc).unwrap()).unwrap()
    }

    #[test]
    fn test_no_headers_no_merging() {
        let g = grid(vec![vec!["a", "a"], vec!["a", "a"]], 0, 0);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(1, 1); 2]; 2]);
    }

    #[test]
    fn test_boundaries_only_with_both_headers() {
        let g = grid(vec![vec!["a", "b"], vec!["c", "d"]], 1, 0);
        let spans = resolve(&g);
        assert!(spans.rows().flatten().all(|c| !c.end_rowspan_boundary));

        let g = grid(vec![vec!["a", "b"], vec!["c", "d"]], 1, 1);
        let spans = resolve(&g);
        assert!(spans.get(0, 0).unwrap().end_rowspan_boundary);
        assert!(spans.get(0, 1).unwrap().end_rowspan_boundary);
        assert!(!spans.get(1, 1).unwrap().end_rowspan_boundary);
        assert!(spans.get(1, 0).unwrap().end_colspan_boundary);
        assert!(!spans.get(1, 1).unwrap().end_colspan_boundary);
    }

    #[test]
    fn test_run_stops_at_boundary() {
        // Column 0 reads "x" all the way down, but row 0 is the last header row.
        let g = grid(vec![vec!["x", "h"], vec!["x", "1"], vec!["x", "2"]], 1, 1);
        let spans = resolve(&g);
        assert_eq!(spans.get(0, 0).unwrap().rowspan, 1);
        assert_eq!(spans.get(1, 0).unwrap().rowspan, 2);
        assert_eq!(spans.get(2, 0).unwrap().rowspan, 0);
    }

    #[test]
    fn test_empty_text_merges() {
        let g = grid(vec![vec!["", "", "x"]], 1, 0);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(2, 1), (0, 1), (1, 1)]]);
    }

    #[test]
    fn test_case_sensitive_equality() {
        let g = grid(vec![vec!["Total", "total"]], 1, 0);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(1, 1), (1, 1)]]);
    }

    #[test]
    fn test_markup_ignored_for_equality() {
        let g = grid(vec![vec!["<b>Q1</b>", "<i>Q1</i>"]], 1, 0);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(2, 1), (0, 1)]]);
    }

    #[test]
    fn test_force_merge_diagonal_partner() {
        let g = grid(
            vec![
                vec!["A", "A", "x"],
                vec!["A", "B", "y"],
                vec!["1", "2", "3"],
            ],
            2,
            2,
        );
        let spans = resolve(&g);
        let corner = spans.get(0, 0).unwrap();
        assert_eq!((corner.colspan, corner.rowspan), (2, 2));
        let partner = spans.get(1, 1).unwrap();
        assert_eq!((partner.colspan, partner.rowspan), (0, 0));
    }

    #[test]
    fn test_quoted_gt_in_attribute_still_merges() {
        let g = grid(vec![vec![r#"<span title="a>b">Q1</span>"#, "Q1"]], 1, 0);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(2, 1), (0, 1)]]);
    }

    #[test]
    fn test_two_by_two_corner_not_merged_leaves_partner() {
        // Corner spans two columns but only one row, so (1, 1) keeps its own spans.
        let g = grid(
            vec![
                vec!["A", "A", "x"],
                vec!["C", "D", "y"],
                vec!["1", "2", "3"],
            ],
            2,
            2,
        );
        let spans = resolve(&g);
        let corner = spans.get(0, 0).unwrap();
        assert_eq!((corner.colspan, corner.rowspan), (2, 1));
        let partner = spans.get(1, 1).unwrap();
        assert_eq!((partner.colspan, partner.rowspan), (1, 1));

        let g = grid(
            vec![
                vec!["A", "B", "x"],
                vec!["C", "D", "y"],
                vec!["1", "2", "3"],
            ],
            2,
            2,
        );
        let spans = resolve(&g);
        assert_eq!(spans.span_grid()[..2].to_vec(), vec![vec![(1, 1); 3]; 2]);
    }

    #[test]
    fn test_no_force_merge_with_single_header_row() {
        let g = grid(vec![vec!["A", "A"], vec!["A", "B"]], 1, 2);
        let spans = resolve(&g);
        assert_eq!(spans.get(1, 1).unwrap().colspan, 1);
        assert_eq!(spans.get(1, 1).unwrap().rowspan, 1);
    }

    #[test]
    fn test_header_counts_beyond_grid_are_clamped() {
        let g = grid(vec![vec!["a"]], 2, 2);
        let spans = resolve(&g);
        assert_eq!(spans.span_grid(), vec![vec![(1, 1)]]);
    }
}
