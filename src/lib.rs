pub mod config;
pub mod diagram;
pub mod document;
pub mod introspect;
pub mod llm;
pub mod measure;
pub mod prompt;
pub mod schema;
pub mod session;

use wasm_bindgen::prelude::*;

pub use diagram::{DiagramConfig, DiagramEngine, render_diagram};
pub use schema::{Catalog, Column, ForeignKeyEdge, SchemaError, Table};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a schema JSON document as an ASCII diagram
#[wasm_bindgen(js_name = "schemaToAscii")]
pub fn render_schema_json(json: &str, focus: Option<String>) -> Result<String, String> {
    let catalog = document::from_json(json).map_err(|e| e.to_string())?;
    Ok(render_diagram(&catalog, focus.as_deref()))
}
