//! `mcgeom`: compile a reactor geometry document into a CSG unit catalog.
//!
//! ```text
//! mcgeom build core.json -o catalog.json   # write the catalog
//! mcgeom build core.json --root assy       # build one assembly, print to stdout
//! mcgeom check core.json                   # build and summarize only
//! mcgeom cells core.json fuel_pin          # list the CSG cells of one pin
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mcgeom::csg::{CellFill, CsgModel};
use mcgeom::document::GeometryDocument;
use mcgeom::{CatalogBuild, ConfigurationError, Result, Unit};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mcgeom", version, about = "Reactor geometry to Monte Carlo CSG catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the catalog and write it as JSON
    Build {
        /// Geometry document
        document: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Unit to build, overriding the document's root
        #[arg(long)]
        root: Option<String>,
    },
    /// Build the catalog and report a summary
    Check {
        /// Geometry document
        document: PathBuf,
    },
    /// Print the CSG cells of a built pin
    Cells {
        /// Geometry document
        document: PathBuf,
        /// Pin unit name in the catalog
        pin: String,
    },
}

fn load(path: &Path) -> Result<GeometryDocument> {
    let file = File::open(path)?;
    GeometryDocument::from_reader(BufReader::new(file))
}

/// Loads and builds, or returns `None` when the document opts out.
fn build(path: &Path, root: Option<&str>) -> Result<Option<CatalogBuild>> {
    let doc = load(path)?;
    if !doc.generate_mc_geometry {
        tracing::info!(document = %path.display(), "generate_mc_geometry is off, skipping");
        return Ok(None);
    }
    let build = doc.build(root)?;
    for warning in &build.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(Some(build))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            document,
            output,
            root,
        } => {
            let Some(build) = build(&document, root.as_deref())? else {
                return Ok(());
            };
            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    build.catalog.write_json(&mut writer)?;
                    writer.flush()?;
                    tracing::info!(units = build.catalog.len(), output = %path.display(), "wrote catalog");
                }
                None => {
                    build.catalog.write_json(io::stdout().lock())?;
                }
            }
        }
        Command::Check { document } => {
            if let Some(build) = build(&document, None)? {
                println!(
                    "{}: {} units, {} warnings",
                    document.display(),
                    build.catalog.len(),
                    build.warnings.len()
                );
            }
        }
        Command::Cells { document, pin } => {
            let Some(build) = build(&document, None)? else {
                return Ok(());
            };
            let Some(Unit::Pin(unit)) = build.catalog.get(&pin) else {
                return Err(ConfigurationError::UnknownUnit(pin).into());
            };
            let model = CsgModel::from_pin(&pin, unit)?;
            for cell in model.cells() {
                let fill = match &cell.fill {
                    CellFill::Material(m) | CellFill::Unit(m) => m.as_str(),
                    CellFill::Void => "void",
                };
                println!("{}\t{fill}", cell.name);
            }
        }
    }
    Ok(())
}

/// Log filter from `RUST_LOG` when set, else WARN for everything and INFO
/// for mcgeom.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::default()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
            .add_directive("mcgeom=info".parse().unwrap_or_default()),
    }
}

fn main() -> ExitCode {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_replaces_default_directives() {
        let filter = env_filter(Some("mcgeom=debug")).to_string();
        assert!(filter.contains("mcgeom=debug"));
        assert!(!filter.contains("mcgeom=info"));
    }

    #[test]
    fn default_directives_apply_without_rust_log() {
        let filter = env_filter(None).to_string();
        assert!(filter.contains("mcgeom=info"));
        assert!(filter.to_lowercase().contains("warn"));
    }
}
