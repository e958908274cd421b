use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use formula_viz::assembler::FsSink;
use formula_viz::{Catalog, Error, GenerateOptions, Generator, OutputSink, Template};
use tempfile::TempDir;

/// Every file under `dir`, relative, sorted, with contents.
fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", current.display()))
        {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let bytes = fs::read(&path).unwrap();
                files.push((path.strip_prefix(dir).unwrap().to_path_buf(), bytes));
            }
        }
    }
    files.sort();
    files
}

fn generator(out: &Path) -> Generator {
    Generator::new(Template::builtin().unwrap(), GenerateOptions::new(out))
}

#[test]
fn builtin_catalog_generates_every_formula() {
    let tmp = TempDir::new().unwrap();
    let catalog = Catalog::builtin().unwrap();
    let report = generator(tmp.path()).generate_all(&catalog).unwrap();

    assert_eq!(report.succeeded(), 19, "{report}");
    assert_eq!(report.failed(), 0);
    for formula in catalog.list_formulas() {
        let dir = tmp.path().join(formula.slug());
        assert!(dir.join("visualization.html").is_file(), "{} missing artifact", formula.id);
        for sub in ["assets", "examples", "docs"] {
            assert!(dir.join(sub).is_dir(), "{} missing {sub}/", formula.id);
        }
        assert!(dir.join("README.md").is_file());
        assert!(dir.join("docs").join("theory.md").is_file());
    }

    let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert_eq!(index.matches("class=\"card\"").count(), 19);
    eprintln!("  generated {} formulas into {}", report.succeeded(), tmp.path().display());
}

#[test]
fn single_scalar_formula_creates_one_directory_with_one_slider() {
    let tmp = TempDir::new().unwrap();
    let catalog = Catalog::from_json(
        r#"[{"id": "01", "name": "X", "parameters": [
            {"name": "speed", "type": "scalar", "default": 1.0, "range": [0.1, 3.0]}]}]"#,
    )
    .unwrap();
    generator(tmp.path()).generate_all(&catalog).unwrap();

    let dirs: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs, vec!["01-X".to_string()]);

    let html = fs::read_to_string(tmp.path().join("01-X/visualization.html")).unwrap();
    assert_eq!(html.matches("type=\"range\"").count(), 1);
    assert!(html.contains(r#"id="param-speed" min="0.1" max="3.0""#));
    assert!(html.contains(r#"value="1.0""#));
}

#[test]
fn duplicate_ids_create_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let catalog = Catalog::from_json(
        r#"[{"id": "01", "name": "First"}, {"id": "01", "name": "Second"}]"#,
    )
    .unwrap();

    let err = generator(&out).generate_all(&catalog).unwrap_err();
    assert!(matches!(err, Error::DuplicateId { .. }));
    assert!(err.is_fatal());
    assert!(!out.exists(), "no output should be created for an invalid catalog");
}

#[test]
fn default_outside_range_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let catalog = Catalog::from_json(
        r#"[{"id": "01", "name": "X", "parameters": [
            {"name": "k", "type": "scalar", "default": 5, "range": [0, 3]}]}]"#,
    )
    .unwrap();

    let err = generator(&out).generate_all(&catalog).unwrap_err();
    assert!(matches!(err, Error::InvalidParameterRange { .. }));
    assert!(!out.exists());
}

#[test]
fn regeneration_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let catalog = Catalog::builtin().unwrap();

    generator(tmp.path()).generate_all(&catalog).unwrap();
    let first = snapshot(tmp.path());

    // Stale content must be overwritten, not appended to.
    let readme = tmp.path().join(catalog.list_formulas()[0].slug()).join("README.md");
    fs::write(&readme, "stale").unwrap();

    generator(tmp.path()).generate_all(&catalog).unwrap();
    let second = snapshot(tmp.path());

    assert_eq!(first.len(), second.len());
    assert!(first == second, "second run produced different files");
}

/// Filesystem sink that refuses writes into one formula directory.
struct FailingSink {
    inner: FsSink,
    poisoned: String,
}

impl OutputSink for FailingSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if path.components().any(|c| c.as_os_str() == self.poisoned.as_str()) {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated write failure"));
        }
        self.inner.write(path, contents)
    }
}

#[test]
fn single_write_failure_is_isolated() {
    let tmp = TempDir::new().unwrap();
    let catalog = Catalog::builtin().unwrap();
    let poisoned = catalog.get("10").unwrap().slug();
    let sink = FailingSink {
        inner: FsSink,
        poisoned: poisoned.clone(),
    };
    let mut gen = Generator::with_sink(
        Template::builtin().unwrap(),
        GenerateOptions::new(tmp.path()),
        sink,
    );
    let report = gen.generate_all(&catalog).unwrap();

    assert_eq!(report.failed(), 1, "{report}");
    assert_eq!(report.succeeded(), 18);
    let failed = report.failures().next().unwrap();
    assert_eq!(failed.slug, poisoned);
    assert!(failed.error().is_some_and(|e| !e.is_fatal()));

    for formula in catalog.list_formulas() {
        let artifact = tmp.path().join(formula.slug()).join("visualization.html");
        assert_eq!(artifact.is_file(), formula.id != "10", "{}", formula.id);
    }
    let index = fs::read_to_string(&report.index_path).unwrap();
    assert!(index.contains("generation failed"));
}

#[test]
fn catalog_file_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("formulas.json");
    let catalog = Catalog::builtin().unwrap();
    fs::write(&path, catalog.to_json_pretty().unwrap()).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded, catalog);

    let missing = Catalog::load(&tmp.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, Error::Io { .. }));
}

#[test]
fn custom_template_file_is_used() {
    let tmp = TempDir::new().unwrap();
    let template_path = tmp.path().join("mini.html");
    fs::write(
        &template_path,
        "<!-- mini --><title>{{TITLE}}</title>{{ICON}}{{FORMULA_LATEX}}{{FORMULA_UNICODE}}\
         {{DESCRIPTION}}{{PARAMETER_CONTROLS}}<script>{{PARAMETER_BINDINGS}}\
         function buildScene() { {{SCENE_CODE}} } function updateScene(time) { {{UPDATE_CODE}} }</script>",
    )
    .unwrap();
    let template = Template::load(&template_path).unwrap();

    let out = tmp.path().join("out");
    let catalog = Catalog::from_json(r#"[{"id": "01", "name": "X"}]"#).unwrap();
    Generator::new(template, GenerateOptions::new(&out))
        .generate_all(&catalog)
        .unwrap();
    let html = fs::read_to_string(out.join("01-X/visualization.html")).unwrap();
    assert!(html.starts_with("<!-- mini --><title>X</title>"));
}
