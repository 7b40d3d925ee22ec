//! Data layer - Static tables and constants
//!
//! - Named HTML character references used by text flattening
//! - Rendering and scroll affordance constants

pub mod constants;
pub mod entities;

// Re-export commonly used items
pub use constants::{
    DEFAULT_INDENT, DEFAULT_SCROLL_LABEL, FROZEN_COLUMNS_CLASS, SCROLL_EDGE_BUFFER_PX,
};
pub use entities::{lookup_entity, NAMED_ENTITIES};
