//! WASM bindings for tablesmith
//!
//! This module provides JavaScript-accessible functions for structuring and
//! rendering tables. Inputs are table documents:
//!
//! ```js
//! renderTable({ config: { header_rows: 1 }, rows: [["Plan", "Price"], ["Basic", "$5"]] }, false)
//! ```

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::features::loading::TableDocument;
#[cfg(feature = "wasm")]
use crate::features::render::{render_html, RenderOptions};
#[cfg(feature = "wasm")]
use crate::{build_table, AssembledTable, TableResult};

/// Render result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub output: String,
    /// Whether rendering was successful
    pub success: bool,
    /// Error message if the input was rejected
    pub error: Option<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn structure(document: &TableDocument) -> TableResult<AssembledTable> {
    let grid = document.to_grid()?;
    Ok(build_table(&grid))
}

/// Structure a table document
///
/// # Returns
/// The serialized assembled table (sections, spans, markers, scopes)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "structureTable")]
pub fn structure_table_wasm(document: JsValue) -> Result<JsValue, JsValue> {
    let document: TableDocument = serde_wasm_bindgen::from_value(document)?;
    let table = structure(&document).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&table)?)
}

/// Structure a table document and render it as HTML
///
/// # Arguments
/// * `document` - Table document (`config`, `rows`, `row_metadata`)
/// * `pretty` - Indent the output, one element per line
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderTable")]
pub fn render_table_wasm(document: JsValue, pretty: bool) -> JsValue {
    let options = if pretty {
        RenderOptions::pretty()
    } else {
        RenderOptions::compact()
    };

    let rendered = serde_wasm_bindgen::from_value::<TableDocument>(document)
        .map_err(|e| e.to_string())
        .and_then(|doc| {
            structure(&doc)
                .map(|table| render_html(&table, &doc.config.properties(), &options))
                .map_err(|e| e.to_string())
        });

    let result = match rendered {
        Ok(output) => RenderResult {
            output,
            success: true,
            error: None,
        },
        Err(error) => RenderResult {
            output: String::new(),
            success: false,
            error: Some(error),
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
