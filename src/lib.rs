pub mod assembler;
pub mod catalog;
pub mod controls;
pub mod dispatch;
pub mod docs;
pub mod error;
pub mod index;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod template;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::path::Path;

pub use assembler::{GenerateOptions, GenerationReport, Generator, OutputSink};
pub use catalog::{Catalog, FormulaSpec, ParameterSpec};
pub use error::{Error, Result};
pub use template::Template;

/// Generate the built-in catalog with the built-in template into `out_dir`.
pub fn generate_builtin(out_dir: &Path) -> Result<GenerationReport> {
    generate(&Catalog::builtin()?, Template::builtin()?, GenerateOptions::new(out_dir))
}

/// Validate `catalog` and generate every artifact plus the master index.
pub fn generate(
    catalog: &Catalog,
    template: Template,
    options: GenerateOptions,
) -> Result<GenerationReport> {
    Generator::new(template, options).generate_all(catalog)
}

/// Render one formula's artifact with the built-in template.
pub fn render_formula(formula: &FormulaSpec) -> Result<String> {
    let template = Template::builtin()?;
    assembler::render_artifact(&template, formula)
}

/// Parse and validate a catalog document, reporting the outcome as JSON:
/// `{"valid": true, "formulas": n}` or `{"valid": false, "error": "..."}`.
pub fn validate_catalog_report(catalog_json: &str) -> String {
    let outcome = Catalog::from_json(catalog_json).and_then(|c| c.validate().map(|()| c.len()));
    let report = match outcome {
        Ok(count) => serde_json::json!({ "valid": true, "formulas": count }),
        Err(e) => serde_json::json!({ "valid": false, "error": e.to_string() }),
    };
    report.to_string()
}
