//! Tests for the table structure engine

use super::*;
use pretty_assertions::assert_eq;

fn grid(rows: &[&[&str]], hr: usize, hc: usize) -> Grid {
    Grid::from_strings(
        rows.iter().map(|r| r.to_vec()),
        HeaderConfig::new(hr, hc).unwrap(),
    )
    .unwrap()
}

fn sample_grids() -> Vec<Grid> {
    vec![
        grid(
            &[
                &["Header", "Header", "Header", "Header"],
                &["Header", "Header", "Header", "Header"],
                &["a", "b", "c", "d"],
                &["e", "f", "g", "h"],
            ],
            2,
            2,
        ),
        grid(
            &[
                &["", "2023", "2023", "2024"],
                &["North", "1", "1", "1"],
                &["North", "2", "2", "2"],
                &["South", "3", "3", "3"],
                &["West", "4", "4", "4"],
            ],
            1,
            1,
        ),
        grid(
            &[
                &["Spec", "Spec", "Spec"],
                &["Size", "Weight", "Weight"],
                &["S", "1", "1"],
                &["S", "2", "2"],
                &["M", "3", "3"],
                &["M", "3", "3"],
            ],
            2,
            1,
        ),
        grid(
            &[
                &["Fruit", "Red", "x"],
                &["Fruit", "Red", "y"],
                &["Fruit", "Green", "z"],
                &["Veg", "Green", "w"],
                &["Veg", "Green", "v"],
            ],
            0,
            2,
        ),
        grid(
            &[
                &["a", "a", "b", "b", "b"],
                &["1", "1", "1", "1", "1"],
                &["2", "2", "2", "2", "2"],
            ],
            1,
            0,
        ),
    ]
}

#[test]
fn test_scenario_a_header_row_colspan() {
    let g = grid(&[&["A", "A"], &["B", "B"]], 1, 0);
    let spans = resolve(&g);
    assert_eq!(spans.span_grid(), vec![vec![(2, 1), (0, 1)], vec![(1, 1), (1, 1)]]);
}

#[test]
fn test_scenario_b_force_merge() {
    let grids = sample_grids();
    let g = &grids[0];
    let spans = resolve(g);

    let corner = spans.get(0, 0).unwrap();
    assert_eq!((corner.colspan, corner.rowspan), (2, 2));
    let partner = spans.get(1, 1).unwrap();
    assert_eq!((partner.colspan, partner.rowspan), (0, 0));

    let table = build_table(g);
    assert_eq!(table.header.rows[0].cells.len(), 2);
    assert_eq!(table.header.rows[1].cells.len(), 1);
    assert_eq!(table.header.rows[1].cells[0].column, 2);
}

#[test]
fn test_scenario_c_single_column_rowspan() {
    let g = grid(&[&["H1"], &["H2"], &["H2"]], 0, 1);
    let spans = classify(&g, resolve(&g));

    assert_eq!(spans.get(1, 0).unwrap().rowspan, 2);
    assert_eq!(spans.get(2, 0).unwrap().rowspan, 0);

    let cell = spans.get(1, 0).unwrap();
    for marker in [
        StyleMarker::CornerBottomLeft,
        StyleMarker::HeaderColumnCell,
        StyleMarker::HeaderColumnCellLast,
    ] {
        assert!(cell.has_marker(marker), "missing {}", marker);
    }
}

#[test]
fn test_scenario_d_body_sections() {
    let g = grid(&[&["a", "1"], &["b", "2"], &["g", "3"], &["g", "4"]], 0, 1);
    let table = build_table(&g);

    assert!(table.header.is_empty());
    let groups: Vec<Vec<usize>> = table.bodies.iter().map(Section::row_indices).collect();
    assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn test_merge_soundness() {
    for g in sample_grids() {
        let spans = resolve(&g);
        let header = g.header();

        for row in 0..g.effective_header_rows() {
            let total: u32 = spans.row(row).unwrap().iter().map(|c| c.colspan).sum();
            assert_eq!(total as usize, g.num_cols(), "colspans of header row {}", row);
        }
        for col in 0..g.effective_header_columns() {
            let total: u32 = (0..g.num_rows())
                .map(|r| spans.get(r, col).unwrap().rowspan)
                .sum();
            assert_eq!(total as usize, g.num_rows(), "rowspans of header column {}", col);
        }

        let forced =
            |r: usize, c: usize| header.rows() == 2 && header.columns() == 2 && (r, c) == (1, 1);
        for r in 0..g.num_rows() {
            for c in 0..g.num_cols() {
                if forced(r, c) {
                    continue;
                }
                let cell = spans.get(r, c).unwrap();
                if cell.colspan == 0 {
                    assert!(c > 0);
                    assert_eq!(g.text(r, c), g.text(r, c - 1));
                }
                if cell.rowspan == 0 {
                    assert!(r > 0);
                    assert_eq!(g.text(r, c), g.text(r - 1, c));
                }
            }
        }
    }
}

#[test]
fn test_no_body_merging() {
    for g in sample_grids() {
        let spans = resolve(&g);
        for r in g.effective_header_rows()..g.num_rows() {
            for c in g.effective_header_columns()..g.num_cols() {
                let cell = spans.get(r, c).unwrap();
                assert_eq!((cell.colspan, cell.rowspan), (1, 1), "body cell ({}, {})", r, c);
            }
        }
    }
}

#[test]
fn test_boundary_respect() {
    for g in sample_grids() {
        let spans = resolve(&g);
        let header = g.header();
        for r in 0..g.num_rows() {
            for c in 0..g.num_cols() {
                if header.rows() == 2 && header.columns() == 2 && (r, c) == (1, 1) {
                    continue;
                }
                let cell = spans.get(r, c).unwrap();
                if cell.colspan == 0 {
                    assert!(!spans.get(r, c - 1).unwrap().end_colspan_boundary);
                }
                if cell.rowspan == 0 {
                    assert!(!spans.get(r - 1, c).unwrap().end_rowspan_boundary);
                }
            }
        }
    }
}

#[test]
fn test_idempotence() {
    for g in sample_grids() {
        let first = classify(&g, resolve(&g));
        let second = classify(&g, resolve(&g));
        assert_eq!(first, second);
        assert_eq!(build_table(&g), build_table(&g));
    }
}

#[test]
fn test_sectioning_completeness() {
    for g in sample_grids() {
        let table = build_table(&g);
        let mut seen = table.header.row_indices();
        for body in &table.bodies {
            assert!(!body.is_empty());
            seen.extend(body.row_indices());
        }
        assert_eq!(seen, (0..g.num_rows()).collect::<Vec<_>>());
    }
}

#[test]
fn test_absorbed_cells_never_rendered() {
    for g in sample_grids() {
        let table = build_table(&g);
        for row in table.all_rows() {
            for cell in &row.cells {
                assert!(cell.colspan > 0 && cell.rowspan > 0);
            }
        }
    }
}

#[test]
fn test_rendered_cells_cover_grid() {
    // Every grid position is covered by exactly one rendered cell.
    for g in sample_grids() {
        let table = build_table(&g);
        let mut covered = vec![vec![0u32; g.num_cols()]; g.num_rows()];
        for row in table.all_rows() {
            for cell in &row.cells {
                for r in cell.row..cell.row + cell.rowspan as usize {
                    for c in cell.column..cell.column + cell.colspan as usize {
                        covered[r][c] += 1;
                    }
                }
            }
        }
        assert!(covered.iter().flatten().all(|&n| n == 1));
    }
}

#[test]
fn test_two_header_columns_markers_and_sections() {
    let grids = sample_grids();
    let g = &grids[3];
    let table = build_table(g);

    // Column 0: Fruit x3, Veg x2; column 1: Red x2, Green x3
    let fruit = table.cell(CellPos::new(0, 0)).unwrap();
    assert_eq!(fruit.rowspan, 3);
    assert_eq!(fruit.scope, Some(Scope::Rowgroup));
    let red = table.cell(CellPos::new(0, 1)).unwrap();
    assert_eq!(red.rowspan, 2);
    assert!(red.markers.contains(StyleMarker::HeaderColumnCellLast));

    assert!(table.spans.get(1, 0).unwrap().has_marker(StyleMarker::InRowspan));
    assert!(table.spans.get(3, 0).unwrap().has_marker(StyleMarker::InRowspan));

    let groups: Vec<Vec<usize>> = table.bodies.iter().map(Section::row_indices).collect();
    assert_eq!(groups, vec![vec![0, 1, 2], vec![3, 4]]);
}

#[test]
fn test_empty_corner_not_header() {
    let grids = sample_grids();
    let g = &grids[1];
    let table = build_table(g);
    let corner = table.cell(CellPos::new(0, 0)).unwrap();
    assert_eq!(corner.kind, CellKind::Data);
    assert!(corner.markers.contains(StyleMarker::CornerTopLeft));
    assert_eq!(
        table.columns,
        vec![
            ColumnGroup::Single,
            ColumnGroup::Group { span: 2 },
            ColumnGroup::Single
        ]
    );
}

#[test]
fn test_zero_columns_grid() {
    let g = Grid::new(
        vec![Row::new(), Row::new()],
        HeaderConfig::new(1, 1).unwrap(),
    )
    .unwrap();
    let table = build_table(&g);
    assert_eq!(table.header.len(), 1);
    assert!(table.header.rows[0].cells.is_empty());
    assert_eq!(table.bodies.len(), 1);
}
