//! # Hexmesh CLI
//!
//! ```text
//! hexmesh <CONFIG> <PROFILE> [-o OUTPUT] [--log-level LEVEL]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Structured O-grid hexahedral meshing of axisymmetric profiles.
#[derive(Parser, Debug)]
#[command(name = "hexmesh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conformal O-grid hexahedral mesh generator", long_about = None)]
struct Cli {
    /// YAML settings file.
    config: PathBuf,

    /// JSON profile document.
    profile: PathBuf,

    /// Output mesh (.vtk or .msh); defaults to output/<config-stem>_o_grid.vtk.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let report = hexmesh::generate(&cli.config, &cli.profile, cli.output.as_deref())
        .with_context(|| format!("failed to mesh {}", cli.profile.display()))?;

    for path in &report.written {
        println!("{}", path.display());
    }
    tracing::info!(
        nodes = report.nodes,
        elements = report.elements,
        matched = report.stitch.matched,
        "done"
    );
    Ok(())
}
