//! # tablesmith
//!
//! Turns authored grids of content cells into structured, accessible tables.
//!
//! ## Features
//!
//! - **Header Merging**: runs of equal text along header rows and columns become
//!   `colspan`/`rowspan` cells; body cells are never merged
//! - **Structural Markers**: corner, first-column and header-column classes for styling
//! - **Sectioning**: header section plus body sections grouped by first-column rowspans
//! - **Header Semantics**: `scope` of `col`, `row`, `colgroup` or `rowgroup` per header cell
//! - **HTML Rendering**: `table`/`thead`/`tbody` markup with row metadata carried over
//! - **Scroll Affordances**: overflow flags and sticky offsets for frozen header columns
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Structuring a Grid
//!
//! ```rust
//! use tablesmith::{structure_rows, StyleMarker};
//!
//! let table = structure_rows(
//!     vec![
//!         vec!["".into(), "2024".into(), "2024".into()],
//!         vec!["North".into(), "10".into(), "12".into()],
//!     ],
//!     1,
//!     1,
//! )
//! .unwrap();
//!
//! let year = &table.header.rows[0].cells[1];
//! assert_eq!(year.colspan, 2);
//! assert!(year.markers.contains(StyleMarker::CornerTopRight));
//! ```
//!
//! ### Rendering HTML
//!
//! ```rust
//! use tablesmith::{render_table_html, Grid, HeaderConfig, TableProperties};
//!
//! let grid = Grid::from_strings(
//!     vec![vec!["Plan", "Price"], vec!["Basic", "$5"]],
//!     HeaderConfig::new(1, 0).unwrap(),
//! )
//! .unwrap();
//! let html = render_table_html(&grid, &TableProperties::new().with_caption("Pricing"));
//! assert!(html.contains("<caption>Pricing</caption>"));
//! assert!(html.contains("<th scope=\"col\""));
//! ```

/// Core structuring modules
pub mod core;

/// Data layer - static tables and constants
pub mod data;

/// Feature modules - rendering, scroll affordances, loading
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the structuring pipeline
pub use core::table::{
    assemble, build_table, classify, resolve, AssembledCell, AssembledRow, AssembledTable, Cell,
    CellKind, CellPos, ColumnGroup, Grid, HeaderConfig, MarkerSet, Row, RowMetadata, Scope,
    Section, SpanCell, SpanMatrix, StyleMarker, MAX_HEADER_COUNT,
};

// Re-export feature modules
pub use features::render;
pub use features::scroll;
pub use features::render::{render_html, RenderOptions, TableProperties};
pub use features::scroll::{ScrollAffordanceController, ScrollOptions};

#[cfg(feature = "data-loading")]
pub use features::loading;
#[cfg(feature = "data-loading")]
pub use features::loading::{
    parse_document, ConfigOverrides, DocumentFormat, TableConfig, TableDocument,
};
#[cfg(all(feature = "data-loading", not(target_arch = "wasm32")))]
pub use features::loading::load_document;

// Re-export utilities
pub use utils::error::{TableError, TableResult};

/// Structure a grid into header and body sections
///
/// # Arguments
/// * `grid` - The authored grid, with its header configuration
///
/// # Returns
/// The assembled table: spans, markers, scopes and sections
pub fn structure_table(grid: &Grid) -> AssembledTable {
    build_table(grid)
}

/// Structure rows of authored content
///
/// # Arguments
/// * `rows` - Cell content, row by row (all rows the same length)
/// * `header_rows` - Number of header rows (0, 1 or 2)
/// * `header_columns` - Number of header columns (0, 1 or 2)
///
/// # Errors
/// Unsupported header counts and ragged rows are rejected.
pub fn structure_rows(
    rows: Vec<Vec<String>>,
    header_rows: usize,
    header_columns: usize,
) -> TableResult<AssembledTable> {
    let header = HeaderConfig::new(header_rows, header_columns)?;
    let grid = Grid::from_strings(rows, header)?;
    Ok(build_table(&grid))
}

/// Structure a grid and render it as indented HTML
pub fn render_table_html(grid: &Grid, props: &TableProperties) -> String {
    render_html(&build_table(grid), props, &RenderOptions::default())
}

/// Structure a grid and render it with custom options
pub fn render_table_html_with_options(
    grid: &Grid,
    props: &TableProperties,
    options: &RenderOptions,
) -> String {
    render_html(&build_table(grid), props, options)
}
