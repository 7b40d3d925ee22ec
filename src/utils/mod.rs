//! Utility modules
//!
//! - Error types and result types
//! - Text flattening and HTML escaping

pub mod error;
pub mod text;

// Re-export commonly used items
pub use error::{HeaderAxis, TableError, TableResult};
pub use text::{decode_char_refs, escape_html, flatten_text};
