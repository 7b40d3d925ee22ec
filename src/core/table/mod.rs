//! Table Structure Engine
//!
//! Turns an authored grid of content cells plus a header configuration into
//! a fully structured table: merged header spans, structural style markers,
//! a header section and one or more body sections.
//!
//! # Architecture
//!
//! ```text
//! Grid -> SpanResolver -> ClassificationEngine -> TableAssembler -> AssembledTable
//! ```
//!
//! Every stage is a pure function of its inputs; rebuilding from the same
//! grid always yields the same table.
//!
//! # Example
//!
//! ```
//! use tablesmith::core::table::{build_table, Grid, HeaderConfig};
//!
//! let grid = Grid::from_strings(
//!     vec![vec!["Plan", "Plan"], vec!["Basic", "Pro"]],
//!     HeaderConfig::new(1, 0).unwrap(),
//! )
//! .unwrap();
//! let table = build_table(&grid);
//! assert_eq!(table.header.rows[0].cells[0].colspan, 2);
//! ```

mod assembler;
mod classify;
mod grid;
mod resolver;
mod span;

#[cfg(test)]
mod tests;

// Re-export public API
pub use assembler::{
    assemble, AssembledCell, AssembledRow, AssembledTable, CellKind, ColumnGroup, Section,
    TableAssembler,
};
pub use classify::{classify, ClassificationEngine};
pub use grid::{Cell, CellPos, Grid, HeaderConfig, Row, RowMetadata, MAX_HEADER_COUNT};
pub use resolver::{resolve, SpanResolver};
pub use span::{MarkerSet, Scope, SpanCell, SpanMatrix, StyleMarker};

/// Run the whole pipeline: resolve spans, classify, assemble
pub fn build_table(grid: &Grid) -> AssembledTable {
    assemble(grid, classify(grid, resolve(grid)))
}
