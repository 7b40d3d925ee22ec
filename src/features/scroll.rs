//! Scroll affordances for horizontally overflowing tables
//!
//! The controller never measures anything itself. The host hands it the
//! rendered geometry and a [`FrameScheduler`]; scroll and resize events only
//! request a frame, and the recomputation happens once that frame fires.
//! At most one frame is pending at a time: a newer request cancels the
//! older one.

use fxhash::FxHashMap;

use crate::core::table::{AssembledTable, CellPos};
use crate::data::constants::{DEFAULT_SCROLL_LABEL, SCROLL_EDGE_BUFFER_PX};
use crate::features::render::TableProperties;

/// Handle of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Source of animation frames
///
/// Implementations:
/// - `ManualFrameScheduler`: frames are fired by the caller (tests, non-browser hosts)
pub trait FrameScheduler {
    /// Request a frame and return its token
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a frame that has not fired yet
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Frame scheduler driven by hand
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: Vec<FrameToken>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet cancelled or taken
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    /// Drain the pending frames, oldest first, so the caller can fire them
    pub fn take_pending(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}

/// Horizontal scroll state of the table's scroll container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

/// Vertical position of the table relative to the sticky header line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinMetrics {
    pub table_top: f64,
    pub table_bottom: f64,
    /// Viewport offset at which sticky elements stick
    pub sticky_top: f64,
}

impl PinMetrics {
    /// The table top has scrolled past the sticky line but its bottom has not
    pub fn is_pinned(&self) -> bool {
        self.table_top <= self.sticky_top && self.table_bottom > self.sticky_top
    }
}

/// Rendered geometry for one recomputation
#[derive(Debug, Clone, Default)]
pub struct TableGeometry {
    pub scroll: ScrollMetrics,
    pub pin: Option<PinMetrics>,
    /// Measured widths of rendered cells, keyed by grid position
    pub cell_widths: FxHashMap<CellPos, f64>,
}

impl TableGeometry {
    pub fn new(scroll: ScrollMetrics) -> Self {
        TableGeometry {
            scroll,
            ..Self::default()
        }
    }

    pub fn with_cell_width(mut self, pos: CellPos, width: f64) -> Self {
        self.cell_widths.insert(pos, width);
        self
    }

    pub fn with_pin(mut self, pin: PinMetrics) -> Self {
        self.pin = Some(pin);
        self
    }
}

/// Affordance flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollFlags {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub has_horizontal_overflow: bool,
    pub is_pinned: bool,
}

/// Result of one recomputation, ready to be applied to the rendered table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffordanceUpdate {
    pub flags: ScrollFlags,
    /// `tabindex` of the scroll container; `None` removes the attribute
    pub tabindex: Option<i32>,
    /// `role` of the scroll container; `None` removes the attribute
    pub role: Option<String>,
    /// `aria-label` of the scroll container; `None` removes the attribute
    pub aria_label: Option<String>,
    /// Sticky left offsets for frozen second-header-column cells
    pub sticky_offsets: FxHashMap<CellPos, f64>,
}

/// Controller options
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOptions {
    /// Compute sticky offsets for the second header column
    /// Default: false
    pub freeze_header_columns: bool,

    /// Slack before the right edge counts as reached
    /// Default: `SCROLL_EDGE_BUFFER_PX`
    pub edge_buffer: f64,

    /// Accessible name of the scroll container
    /// Default: `DEFAULT_SCROLL_LABEL`
    pub label: String,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            freeze_header_columns: false,
            edge_buffer: SCROLL_EDGE_BUFFER_PX,
            label: DEFAULT_SCROLL_LABEL.to_string(),
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options from authored table properties
    ///
    /// The label prefers the explicit scroll label, then the caption.
    pub fn from_properties(props: &TableProperties) -> Self {
        let label = props
            .scroll_label
            .as_deref()
            .or(props.caption.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_SCROLL_LABEL)
            .to_string();

        Self {
            freeze_header_columns: props.freeze_header_columns,
            label,
            ..Self::default()
        }
    }
}

/// A frozen second-column cell and the first-column cell it sits beside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StickyTarget {
    cell: CellPos,
    anchor: CellPos,
}

/// Tracks scroll affordances for one rendered table
#[derive(Debug)]
pub struct ScrollAffordanceController {
    options: ScrollOptions,
    sticky_targets: Vec<StickyTarget>,
    pending: Option<FrameToken>,
    flags: ScrollFlags,
}

impl ScrollAffordanceController {
    pub fn new(table: &AssembledTable, options: ScrollOptions) -> Self {
        let sticky_targets = if options.freeze_header_columns && table.header_columns == 2 {
            sticky_targets(table)
        } else {
            Vec::new()
        };

        ScrollAffordanceController {
            options,
            sticky_targets,
            pending: None,
            flags: ScrollFlags::default(),
        }
    }

    /// Last computed flags
    pub fn flags(&self) -> ScrollFlags {
        self.flags
    }

    /// Frame currently waited on, if any
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    pub fn on_scroll<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.schedule(scheduler);
    }

    pub fn on_resize<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.schedule(scheduler);
    }

    /// Drop any pending frame (e.g. when the table goes away)
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
    }

    fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.request_frame());
    }

    /// Handle a fired frame; stale tokens are ignored
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        geometry: &TableGeometry,
    ) -> Option<AffordanceUpdate> {
        if self.pending != Some(token) {
            tracing::trace!(token = token.0, "ignoring superseded frame");
            return None;
        }
        self.pending = None;
        Some(self.recompute(geometry))
    }

    /// Recompute immediately, bypassing the frame gate (initial layout)
    pub fn recompute(&mut self, geometry: &TableGeometry) -> AffordanceUpdate {
        let scroll = geometry.scroll;
        let has_overflow = scroll.scroll_width > scroll.client_width;

        let flags = ScrollFlags {
            can_scroll_left: scroll.scroll_left > 0.0,
            can_scroll_right: scroll.scroll_left + scroll.client_width
                < scroll.scroll_width - self.options.edge_buffer,
            has_horizontal_overflow: has_overflow,
            is_pinned: geometry.pin.is_some_and(|p| p.is_pinned()),
        };
        self.flags = flags;

        let mut update = AffordanceUpdate {
            flags,
            sticky_offsets: self.sticky_offsets(geometry),
            ..AffordanceUpdate::default()
        };
        if has_overflow {
            update.tabindex = Some(0);
            update.role = Some("group".to_string());
            update.aria_label = Some(self.options.label.clone());
        }

        tracing::trace!(
            overflow = flags.has_horizontal_overflow,
            left = flags.can_scroll_left,
            right = flags.can_scroll_right,
            "recomputed scroll affordances"
        );
        update
    }

    fn sticky_offsets(&self, geometry: &TableGeometry) -> FxHashMap<CellPos, f64> {
        let mut offsets = FxHashMap::default();
        for target in &self.sticky_targets {
            match geometry.cell_widths.get(&target.anchor) {
                Some(&width) => {
                    offsets.insert(target.cell, width);
                }
                None => {
                    tracing::debug!(
                        row = target.anchor.row,
                        col = target.anchor.col,
                        "no measured width for first header column cell"
                    );
                }
            }
        }
        offsets
    }
}

/// Pair every rendered column-1 cell with the column-0 cell covering its row
fn sticky_targets(table: &AssembledTable) -> Vec<StickyTarget> {
    let spans = &table.spans;
    let mut targets = Vec::new();
    let mut anchor_row = 0;

    for row in 0..spans.num_rows() {
        if spans.get(row, 0).is_some_and(|c| c.rowspan != 0) {
            anchor_row = row;
        }
        let rendered = spans.get(row, 1).is_some_and(|c| !c.is_absorbed());
        if rendered {
            targets.push(StickyTarget {
                cell: CellPos::new(row, 1),
                anchor: CellPos::new(anchor_row, 0),
            });
        }
    }

    targets
}
