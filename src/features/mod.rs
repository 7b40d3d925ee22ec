//! Feature modules - Everything around the structural core
//!
//! - HTML rendering of assembled tables
//! - Scroll affordances for overflowing tables
//! - Table document loading (JSON, YAML, TOML, CSV)

#[cfg(feature = "data-loading")]
pub mod loading;
pub mod render;
pub mod scroll;

// Re-export commonly used types
#[cfg(feature = "data-loading")]
pub use loading::{
    parse_document, ConfigOverrides, DocumentFormat, TableConfig, TableDocument,
};
#[cfg(all(feature = "data-loading", not(target_arch = "wasm32")))]
pub use loading::load_document;
pub use render::{render_html, RenderOptions, TableProperties};
pub use scroll::{
    AffordanceUpdate, FrameScheduler, FrameToken, ManualFrameScheduler, PinMetrics,
    ScrollAffordanceController, ScrollFlags, ScrollMetrics, ScrollOptions, TableGeometry,
};
