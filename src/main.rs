use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formula_viz::dispatch;
use formula_viz::{Catalog, GenerateOptions, Generator, Template};

#[derive(Parser)]
#[command(name = "formula-viz", version)]
#[command(about = "Generate interactive 3D visualizations from a formula catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact and the master index
    Generate {
        /// Catalog JSON file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Base template file (default: built-in template)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "visualizations")]
        out: PathBuf,

        /// Skip README.md and docs/theory.md
        #[arg(long)]
        no_docs: bool,

        /// Artifact file extension
        #[arg(long, default_value = "html")]
        ext: String,
    },

    /// Validate the catalog and template without writing anything
    Check {
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// List catalog formulas and the scene each one gets
    List {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Serve artifacts from memory with reload on catalog/template change
    Dev {
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        template: Option<PathBuf>,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate {
            catalog,
            template,
            out,
            no_docs,
            ext,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let template = load_template(template.as_deref())?;
            let options = GenerateOptions {
                out_dir: out,
                artifact_ext: ext.trim_start_matches('.').to_string(),
                write_docs: !no_docs,
            };
            let report = Generator::new(template, options)
                .generate_all(&catalog)
                .context("generation aborted")?;
            eprintln!("{report}");
            if !report.is_complete() {
                process::exit(1);
            }
        }

        Commands::Check { catalog, template } => {
            let catalog = load_catalog(catalog.as_deref())?;
            catalog.validate().context("catalog is invalid")?;
            load_template(template.as_deref())?;
            eprintln!("ok: {} formulas, template complete", catalog.len());
        }

        Commands::List { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for formula in catalog.list_formulas() {
                let d = dispatch::dispatch(formula);
                let scene = d.kind.map(|k| k.tag()).unwrap_or("generic");
                println!(
                    "{:<4} {:<52} {:<20} ({}, {} params)",
                    formula.id,
                    formula.name,
                    scene,
                    d.route,
                    formula.parameters.len()
                );
            }
        }

        Commands::Dev {
            catalog,
            template,
            port,
        } => {
            // Fail fast on bad inputs; later edits are reported in the browser.
            let loaded = load_catalog(catalog.as_deref())?;
            loaded.validate().context("catalog is invalid")?;
            load_template(template.as_deref())?;

            let config = formula_viz::server::DevConfig {
                catalog,
                template,
                port,
            };
            let rt = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
            rt.block_on(formula_viz::server::run_dev_server(config))
                .map_err(|e| anyhow::anyhow!("dev server failed: {e}"))?;
        }
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("cannot load catalog '{}'", path.display())),
        None => Catalog::builtin().context("built-in catalog is corrupt"),
    }
}

fn load_template(path: Option<&Path>) -> Result<Template> {
    match path {
        Some(path) => Template::load(path)
            .with_context(|| format!("cannot load template '{}'", path.display())),
        None => Template::builtin().context("built-in template is incomplete"),
    }
}
