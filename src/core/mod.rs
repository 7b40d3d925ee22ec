//! Core structuring modules
//!
//! - `table`: span resolution, classification and assembly of authored grids

pub mod table;

// Re-export main types and functions from table
pub use table::{
    assemble, build_table, classify, resolve, AssembledCell, AssembledRow, AssembledTable, Cell,
    CellKind, CellPos, ColumnGroup, Grid, HeaderConfig, MarkerSet, Row, RowMetadata, Scope,
    Section, SpanCell, SpanMatrix, StyleMarker,
};
