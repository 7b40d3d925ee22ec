//! HTML rendering of assembled tables
//!
//! Materializes an [`AssembledTable`] as `table`/`thead`/`tbody`/`tr`/`th`/`td`
//! markup. Style markers become class names, header scope becomes the
//! `scope` attribute and row metadata is carried over as row attributes.
//! Cell content is emitted exactly as authored.

use crate::core::table::{AssembledCell, AssembledRow, AssembledTable, ColumnGroup, Section};
use crate::data::constants::{DEFAULT_INDENT, FROZEN_COLUMNS_CLASS};
use crate::utils::text::escape_html;

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Put every element on its own line, indented by nesting depth
    /// Default: true
    pub pretty: bool,

    /// Indent unit used when `pretty` is set
    /// Default: two spaces
    pub indent: String,

    /// Emit `<colgroup>` elements derived from the first header row
    /// Default: true
    pub column_groups: bool,

    /// Emit style markers as `class` attributes
    /// Default: true
    pub marker_classes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: DEFAULT_INDENT.to_string(),
            column_groups: true,
            marker_classes: true,
        }
    }
}

impl RenderOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output, no whitespace between elements
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// One element per line, indented
    pub fn pretty() -> Self {
        Self::default()
    }
}

/// Authored table properties supplied alongside the grid
///
/// `show_caption` defaults to on, matching the document configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableProperties {
    pub caption: Option<String>,
    pub show_caption: bool,
    /// Keep header columns in place while the table scrolls horizontally
    pub freeze_header_columns: bool,
    /// Accessible name for the scrollable region
    pub scroll_label: Option<String>,
}

impl Default for TableProperties {
    fn default() -> Self {
        Self {
            caption: None,
            show_caption: true,
            freeze_header_columns: false,
            scroll_label: None,
        }
    }
}

impl TableProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a visible caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self.show_caption = true;
        self
    }

    pub fn with_frozen_header_columns(mut self, freeze: bool) -> Self {
        self.freeze_header_columns = freeze;
        self
    }

    /// Caption text to render, if any
    pub fn visible_caption(&self) -> Option<&str> {
        if !self.show_caption {
            return None;
        }
        self.caption.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Render an assembled table to HTML
pub fn render_html(
    table: &AssembledTable,
    props: &TableProperties,
    options: &RenderOptions,
) -> String {
    let _span = tracing::debug_span!(
        "render_html",
        header_rows = table.header.len(),
        body_sections = table.bodies.len()
    )
    .entered();

    let mut writer = HtmlWriter::new(options);
    writer.table(table, props);
    writer.finish()
}

struct HtmlWriter<'o> {
    output: String,
    options: &'o RenderOptions,
    depth: usize,
}

impl<'o> HtmlWriter<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        HtmlWriter {
            output: String::new(),
            options,
            depth: 0,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn table(&mut self, table: &AssembledTable, props: &TableProperties) {
        let mut attrs = Vec::new();
        if props.freeze_header_columns {
            attrs.push(("class", FROZEN_COLUMNS_CLASS.to_string()));
        }
        self.open("table", &attrs);

        if let Some(caption) = props.visible_caption() {
            self.line(&format!("<caption>{}</caption>", escape_html(caption)));
        }

        if self.options.column_groups {
            for group in &table.columns {
                match group {
                    ColumnGroup::Single => self.line("<colgroup></colgroup>"),
                    ColumnGroup::Group { span } => {
                        self.line(&format!("<colgroup span=\"{}\"></colgroup>", span))
                    }
                }
            }
        }

        if !table.header.is_empty() {
            self.section("thead", &table.header);
        }
        for body in &table.bodies {
            self.section("tbody", body);
        }

        self.close("table");
    }

    fn section(&mut self, tag: &str, section: &Section) {
        self.open(tag, &[]);
        for row in &section.rows {
            self.row(row);
        }
        self.close(tag);
    }

    fn row(&mut self, row: &AssembledRow) {
        let attrs: Vec<(&str, String)> = row
            .metadata
            .iter()
            .filter(|(name, _)| is_attribute_name(name))
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect();

        self.open("tr", &attrs);
        for cell in &row.cells {
            let markup = self.cell(cell);
            self.line(&markup);
        }
        self.close("tr");
    }

    fn cell(&self, cell: &AssembledCell) -> String {
        let tag = if cell.is_header() { "th" } else { "td" };

        let mut attrs = Vec::new();
        if let Some(scope) = cell.scope.filter(|_| cell.is_header()) {
            attrs.push(("scope", scope.as_str().to_string()));
        }
        if cell.colspan > 1 {
            attrs.push(("colspan", cell.colspan.to_string()));
        }
        if cell.rowspan > 1 {
            attrs.push(("rowspan", cell.rowspan.to_string()));
        }
        if self.options.marker_classes && !cell.markers.is_empty() {
            attrs.push(("class", cell.markers.to_class_string()));
        }

        format!("<{}{}>{}</{}>", tag, attributes(&attrs), cell.content, tag)
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.line(&format!("<{}{}>", tag, attributes(attrs)));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn line(&mut self, markup: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.output.push_str(&self.options.indent);
            }
        }
        self.output.push_str(markup);
        if self.options.pretty {
            self.output.push('\n');
        }
    }
}

fn attributes(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

/// Metadata keys that cannot be emitted as an attribute name are dropped
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}
