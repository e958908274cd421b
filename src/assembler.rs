//! Batch generation: one artifact directory per formula plus the master index.
//!
//! ```text
//! <out>/index.html
//! <out>/<id>-<name>/visualization.html
//! <out>/<id>-<name>/README.md
//! <out>/<id>-<name>/docs/theory.md
//! <out>/<id>-<name>/{assets,examples}/
//! ```
//!
//! Catalog validation happens before the first write, so a catalog error
//! leaves the output directory untouched. After that, each formula either
//! succeeds or is recorded as a failure; one bad formula never stops the
//! rest of the batch.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, FormulaSpec};
use crate::controls;
use crate::dispatch;
use crate::docs;
use crate::error::{Error, Result};
use crate::index::{self, EntryStatus, IndexEntry};
use crate::template::{Fragments, Template};

/// Sub-directories created under every formula directory.
pub const FORMULA_SUBDIRS: [&str; 3] = ["assets", "examples", "docs"];

/// Where generated files go. Writes replace existing files.
pub trait OutputSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes straight to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    /// Artifact and index file extension, without the dot.
    pub artifact_ext: String,
    /// Also write `README.md` and `docs/theory.md` per formula.
    pub write_docs: bool,
}

impl GenerateOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("visualizations"),
            artifact_ext: "html".to_string(),
            write_docs: true,
        }
    }
}

/// Result of generating one formula.
#[derive(Debug)]
pub struct FormulaOutcome {
    pub id: String,
    pub slug: String,
    /// Artifact path on success.
    pub result: std::result::Result<PathBuf, Error>,
}

impl FormulaOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// Summary of a batch run, in catalog order.
#[derive(Debug)]
pub struct GenerationReport {
    pub outcomes: Vec<FormulaOutcome>,
    pub index_path: PathBuf,
}

impl GenerationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FormulaOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(path) => writeln!(f, "  ok    {} -> {}", outcome.slug, path.display())?,
                Err(e) => writeln!(f, "  FAIL  {}: {e}", outcome.slug)?,
            }
        }
        write!(
            f,
            "generated {} of {} formulas ({} failed), index at {}",
            self.succeeded(),
            self.outcomes.len(),
            self.failed(),
            self.index_path.display()
        )
    }
}

/// Render one formula's artifact text. Pure; nothing is written.
pub fn render_artifact(template: &Template, formula: &FormulaSpec) -> Result<String> {
    let controls = controls::generate_controls(formula)?;
    let fragments = dispatch::dispatch(formula).fragments();
    Ok(template.render(
        formula,
        Fragments {
            scene_code: fragments.scene,
            update_code: fragments.update,
            controls: &controls,
        },
    ))
}

/// Drives a full generation run into an [`OutputSink`].
pub struct Generator<S: OutputSink = FsSink> {
    template: Template,
    options: GenerateOptions,
    sink: S,
}

impl Generator<FsSink> {
    pub fn new(template: Template, options: GenerateOptions) -> Self {
        Self::with_sink(template, options, FsSink)
    }
}

impl<S: OutputSink> Generator<S> {
    pub fn with_sink(template: Template, options: GenerateOptions, sink: S) -> Self {
        Self {
            template,
            options,
            sink,
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn render(&self, formula: &FormulaSpec) -> Result<String> {
        render_artifact(&self.template, formula)
    }

    pub fn formula_dir(&self, formula: &FormulaSpec) -> PathBuf {
        self.options.out_dir.join(formula.slug())
    }

    pub fn artifact_path(&self, formula: &FormulaSpec) -> PathBuf {
        self.formula_dir(formula)
            .join(format!("visualization.{}", self.options.artifact_ext))
    }

    pub fn index_path(&self) -> PathBuf {
        self.options
            .out_dir
            .join(format!("index.{}", self.options.artifact_ext))
    }

    /// Generate every formula of `catalog`, then the master index.
    ///
    /// Returns `Err` only for batch-fatal problems: an invalid catalog
    /// (nothing is written) or a failed index write. Per-formula failures
    /// are reported in the returned [`GenerationReport`].
    #[instrument(skip_all, fields(formulas = catalog.len(), out = %self.options.out_dir.display()))]
    pub fn generate_all(&mut self, catalog: &Catalog) -> Result<GenerationReport> {
        catalog.validate()?;

        let mut outcomes = Vec::with_capacity(catalog.len());
        for formula in catalog.list_formulas() {
            let result = self.generate_one(formula);
            match &result {
                Ok(path) => info!(id = %formula.id, path = %path.display(), "wrote artifact"),
                Err(e) => warn!(id = %formula.id, error = %e, "formula failed"),
            }
            outcomes.push(FormulaOutcome {
                id: formula.id.clone(),
                slug: formula.slug(),
                result,
            });
        }

        let index_path = self.write_index(catalog, &outcomes)?;
        let report = GenerationReport {
            outcomes,
            index_path,
        };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "generation complete"
        );
        Ok(report)
    }

    fn generate_one(&mut self, formula: &FormulaSpec) -> Result<PathBuf> {
        let html = self.render(formula)?;

        let dir = self.formula_dir(formula);
        for sub in FORMULA_SUBDIRS {
            let path = dir.join(sub);
            self.sink
                .create_dir_all(&path)
                .map_err(|e| Error::io(&path, e))?;
        }

        let artifact = self.artifact_path(formula);
        self.put(&artifact, html.as_bytes())?;

        if self.options.write_docs {
            let readme = docs::readme(formula, &self.options.artifact_ext);
            self.put(&dir.join("README.md"), readme.as_bytes())?;
            self.put(&dir.join("docs").join("theory.md"), docs::theory(formula).as_bytes())?;
            debug!(id = %formula.id, "wrote companion docs");
        }
        Ok(artifact)
    }

    fn write_index(&mut self, catalog: &Catalog, outcomes: &[FormulaOutcome]) -> Result<PathBuf> {
        let reasons: Vec<Option<String>> = outcomes
            .iter()
            .map(|o| o.error().map(|e| e.to_string()))
            .collect();
        let entries: Vec<IndexEntry<'_>> = catalog
            .list_formulas()
            .iter()
            .zip(&reasons)
            .map(|(formula, reason)| IndexEntry {
                formula,
                status: match reason.as_deref() {
                    Some(reason) => EntryStatus::Failed(reason),
                    None => EntryStatus::Generated,
                },
            })
            .collect();
        let html = index::render_index(&entries, &self.options.artifact_ext);

        let out_dir = self.options.out_dir.clone();
        self.sink
            .create_dir_all(&out_dir)
            .map_err(|e| Error::io(&out_dir, e))?;
        let path = self.index_path();
        self.put(&path, html.as_bytes())?;
        info!(path = %path.display(), "wrote index");
        Ok(path)
    }

    fn put(&mut self, path: &Path, contents: &[u8]) -> Result<()> {
        self.sink
            .write(path, contents)
            .map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory sink; writes whose path contains `fail_on` are rejected.
    #[derive(Default)]
    struct MemorySink {
        dirs: BTreeSet<PathBuf>,
        files: BTreeMap<PathBuf, Vec<u8>>,
        fail_on: Option<String>,
    }

    impl OutputSink for MemorySink {
        fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
            self.dirs.insert(path.to_path_buf());
            Ok(())
        }

        fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
            if let Some(needle) = &self.fail_on {
                if path.to_string_lossy().contains(needle.as_str()) {
                    return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
                }
            }
            self.files.insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }
    }

    fn generator(sink: MemorySink) -> Generator<MemorySink> {
        Generator::with_sink(
            Template::builtin().unwrap(),
            GenerateOptions::new("out"),
            sink,
        )
    }

    fn text(sink: &MemorySink, path: &str) -> String {
        String::from_utf8(sink.files[Path::new(path)].clone()).unwrap()
    }

    #[test]
    fn single_scalar_formula_writes_full_layout() {
        let catalog = Catalog::from_json(
            r#"[{"id": "01", "name": "X", "parameters": [
                {"name": "speed", "type": "scalar", "default": 1.0, "range": [0.1, 3.0]}]}]"#,
        )
        .unwrap();
        let mut gen = generator(MemorySink::default());
        let report = gen.generate_all(&catalog).unwrap();
        assert_eq!((report.succeeded(), report.failed()), (1, 0));

        let sink = gen.into_sink();
        for sub in ["out/01-X/assets", "out/01-X/examples", "out/01-X/docs"] {
            assert!(sink.dirs.contains(Path::new(sub)), "missing {sub}");
        }
        let html = text(&sink, "out/01-X/visualization.html");
        assert_eq!(html.matches("type=\"range\"").count(), 1);
        assert!(html.contains(r#"id="param-speed" min="0.1" max="3.0" step="0.01" value="1.0""#));
        assert!(sink.files.contains_key(Path::new("out/01-X/README.md")));
        assert!(sink.files.contains_key(Path::new("out/01-X/docs/theory.md")));
        assert!(text(&sink, "out/index.html").contains("01-X/visualization.html"));
    }

    #[test]
    fn invalid_catalog_writes_nothing() {
        let catalog = Catalog::from_json(
            r#"[{"id": "01", "name": "A"}, {"id": "01", "name": "B"}]"#,
        )
        .unwrap();
        let mut gen = generator(MemorySink::default());
        let err = gen.generate_all(&catalog).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        let sink = gen.into_sink();
        assert!(sink.dirs.is_empty() && sink.files.is_empty());
    }

    #[test]
    fn one_failed_write_does_not_stop_the_batch() {
        let catalog = Catalog::builtin().unwrap();
        let sink = MemorySink {
            fail_on: Some("07-".to_string()),
            ..MemorySink::default()
        };
        let mut gen = generator(sink);
        let report = gen.generate_all(&catalog).unwrap();

        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 18);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.id, "07");
        assert!(matches!(failure.error(), Some(Error::Io { .. })));

        let sink = gen.into_sink();
        let index = text(&sink, "out/index.html");
        assert!(index.contains("generation failed"));
        assert!(index.contains("18 generated · 1 failed"));
    }

    #[test]
    fn index_write_failure_is_fatal() {
        let catalog = Catalog::from_json(r#"[{"id": "01", "name": "X"}]"#).unwrap();
        let sink = MemorySink {
            fail_on: Some("index.".to_string()),
            ..MemorySink::default()
        };
        let mut gen = generator(sink);
        assert!(matches!(gen.generate_all(&catalog), Err(Error::Io { .. })));
    }

    #[test]
    fn render_rejects_unsupported_parameter_type() {
        // Skips validation, which would reject this catalog first.
        let catalog = Catalog::from_json(
            r#"[{"id": "01", "name": "X", "parameters": [
                {"name": "k", "type": "tensor", "default": 1, "range": [0, 2]}]}]"#,
        )
        .unwrap();
        let gen = generator(MemorySink::default());
        assert!(matches!(
            gen.render(&catalog.list_formulas()[0]),
            Err(Error::UnsupportedParameterType { .. })
        ));
    }

    #[test]
    fn docs_can_be_disabled_and_extension_changed() {
        let catalog = Catalog::from_json(r#"[{"id": "01", "name": "X"}]"#).unwrap();
        let options = GenerateOptions {
            artifact_ext: "htm".to_string(),
            write_docs: false,
            ..GenerateOptions::new("site")
        };
        let mut gen = Generator::with_sink(Template::builtin().unwrap(), options, MemorySink::default());
        let report = gen.generate_all(&catalog).unwrap();
        assert_eq!(report.index_path, Path::new("site/index.htm"));

        let sink = gen.into_sink();
        assert!(sink.files.contains_key(Path::new("site/01-X/visualization.htm")));
        assert!(!sink.files.contains_key(Path::new("site/01-X/README.md")));
        assert!(text(&sink, "site/index.htm").contains("01-X/visualization.htm"));
    }

    #[test]
    fn report_display_lists_every_formula() {
        let catalog = Catalog::from_json(r#"[{"id": "01", "name": "X"}, {"id": "02", "name": "Y"}]"#).unwrap();
        let sink = MemorySink {
            fail_on: Some("02-Y".to_string()),
            ..MemorySink::default()
        };
        let mut gen = generator(sink);
        let summary = gen.generate_all(&catalog).unwrap().to_string();
        assert!(summary.contains("ok    01-X"));
        assert!(summary.contains("FAIL  02-Y"));
        assert!(summary.contains("generated 1 of 2 formulas (1 failed)"));
    }
}
