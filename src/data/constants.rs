//! Constants shared by the renderer and the scroll affordance controller

/// Pixels of slack before the right edge counts as reached
///
/// Keeps the right-hand affordance from flickering when sub-pixel layout
/// leaves the scroll position a fraction short of the end.
pub const SCROLL_EDGE_BUFFER_PX: f64 = 2.0;

/// Accessible name for a scrollable table region without a caption
pub const DEFAULT_SCROLL_LABEL: &str = "Scrollable table";

/// Class on the rendered `<table>` when header columns are frozen
pub const FROZEN_COLUMNS_CLASS: &str = "freeze-header-columns";

/// Indent unit used by the pretty renderer
pub const DEFAULT_INDENT: &str = "  ";
