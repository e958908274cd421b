//! WASM bindings for the generator.
//!
//! Build with: `wasm-pack build --target web --features wasm`

use wasm_bindgen::prelude::*;

use crate::catalog::{Catalog, FormulaSpec};
use crate::template::Template;

/// Render one formula (a single `FormulaSpec` JSON object) into artifact
/// HTML using the built-in template.
///
/// The formula is validated as a one-entry catalog first; errors are thrown
/// as JS errors.
#[wasm_bindgen]
pub fn render_formula_json(formula_json: &str) -> Result<String, JsError> {
    let formula: FormulaSpec =
        serde_json::from_str(formula_json).map_err(|e| JsError::new(&e.to_string()))?;
    let catalog = Catalog::new(vec![formula]);
    catalog.validate().map_err(|e| JsError::new(&e.to_string()))?;
    let template = Template::builtin().map_err(|e| JsError::new(&e.to_string()))?;
    crate::assembler::render_artifact(&template, &catalog.list_formulas()[0])
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Validate a catalog document.
///
/// Returns a JSON object: `{ "valid": true, "formulas": n }` or
/// `{ "valid": false, "error": "..." }`.
#[wasm_bindgen]
pub fn validate_catalog_json(catalog_json: &str) -> String {
    crate::validate_catalog_report(catalog_json)
}
