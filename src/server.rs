//! Dev preview server.
//!
//! Serves the index and every artifact straight from memory, re-reading the
//! catalog and template on each request, so edits show up without a
//! generate step. A file watcher triggers a live reload in open pages.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{self, State};
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tower_livereload::LiveReloadLayer;
use tracing::info;

use crate::assembler::render_artifact;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::index::{self, EntryStatus, IndexEntry};
use crate::template::Template;
use crate::util::html_escape;

/// Inputs for the dev server. `None` paths use the built-in catalog/template.
#[derive(Debug, Clone)]
pub struct DevConfig {
    pub catalog: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub port: u16,
}

struct DevState {
    catalog: Option<PathBuf>,
    template: Option<PathBuf>,
}

type Page = (StatusCode, Html<String>);

/// Start the dev server with live reload on catalog/template changes.
pub async fn run_dev_server(config: DevConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    let watched: Vec<PathBuf> = [&config.catalog, &config.template]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let targets = watched.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            let relevant = event.paths.iter().any(|p| targets.iter().any(|t| same_file(p, t)));
            if relevant && (event.kind.is_modify() || event.kind.is_create()) {
                info!("input changed, reloading");
                reloader.reload();
            }
        }
    })?;
    for path in &watched {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }

    let state = Arc::new(DevState {
        catalog: config.catalog.clone(),
        template: config.template.clone(),
    });
    let app = router(state).layer(livereload);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    eprintln!("formula-viz dev server");
    eprintln!("  catalog:  {}", describe_source(config.catalog.as_deref()));
    eprintln!("  template: {}", describe_source(config.template.as_deref()));
    eprintln!("  index:    http://localhost:{}/", config.port);
    if !watched.is_empty() {
        eprintln!("  watching for changes...");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    drop(watcher);
    Ok(())
}

fn router(state: Arc<DevState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/index.html", get(serve_index))
        .route("/{slug}/visualization.html", get(serve_artifact))
        .fallback(serve_not_found)
        .with_state(state)
}

fn describe_source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name() == b.file_name(),
    }
}

fn load_inputs(state: &DevState) -> Result<(Catalog, Template)> {
    let catalog = match &state.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    catalog.validate()?;
    let template = match &state.template {
        Some(path) => Template::load(path)?,
        None => Template::builtin()?,
    };
    Ok((catalog, template))
}

// ── Route handlers ────────────────────────────────────────────────────

async fn serve_index(State(state): State<Arc<DevState>>) -> Page {
    let (catalog, _) = match load_inputs(&state) {
        Ok(inputs) => inputs,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Cannot load inputs", &e.to_string()),
    };
    let entries: Vec<IndexEntry<'_>> = catalog
        .list_formulas()
        .iter()
        .map(|formula| IndexEntry {
            formula,
            status: EntryStatus::Generated,
        })
        .collect();
    (StatusCode::OK, Html(index::render_index(&entries, "html")))
}

/// `slug` arrives percent-decoded from the path.
async fn serve_artifact(
    State(state): State<Arc<DevState>>,
    extract::Path(slug): extract::Path<String>,
) -> Page {
    let (catalog, template) = match load_inputs(&state) {
        Ok(inputs) => inputs,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Cannot load inputs", &e.to_string()),
    };
    let Some(formula) = catalog.find_by_slug(&slug) else {
        return error_page(StatusCode::NOT_FOUND, "Not found", &format!("no formula with folder '{slug}'"));
    };
    match render_artifact(&template, formula) {
        Ok(html) => (StatusCode::OK, Html(html)),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, &formula.slug(), &e.to_string()),
    }
}

async fn serve_not_found(uri: Uri) -> Page {
    error_page(StatusCode::NOT_FOUND, "Not found", &format!("no route for {}", uri.path()))
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Page {
    (status, Html(build_error_page(title, message)))
}

fn build_error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>formula-viz: {title}</title>
<style>
  body {{ margin: 0; background: #0a0a12; color: #b0b0c8; font-family: monospace; }}
  .error {{ max-width: 720px; margin: 80px auto; padding: 28px; border: 1px solid #5a1a2a;
    border-radius: 8px; background: rgba(239, 71, 111, 0.05); }}
  h1 {{ font-size: 15px; color: #ef476f; margin: 0 0 16px; }}
  pre {{ white-space: pre-wrap; word-break: break-word; color: #ef476f; margin: 0; }}
  a {{ color: #667eea; }}
</style>
</head>
<body>
<div class="error">
<h1>{title}</h1>
<pre>{message}</pre>
<p><a href="/">back to index</a></p>
</div>
</body>
</html>
"#,
        title = html_escape(title),
        message = html_escape(message),
    )
}
