//! elements-codegen
//!
//! Generates React bindings for a custom elements library into a base directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate React components and type declarations from a custom elements manifest
#[derive(Parser, Debug)]
#[command(name = "elements-codegen")]
#[command(about = "Generate React bindings for custom elements", long_about = None)]
struct Args {
    /// Base directory receiving the generated files
    #[arg(default_value = ".")]
    base_dir: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("elements_codegen=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    info!(
        "elements-codegen v{} in {}",
        env!("CARGO_PKG_VERSION"),
        args.base_dir.display()
    );

    let report = elements_codegen::generate(&args.base_dir)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))?;

    for name in &report.components {
        info!("  {}", name);
    }
    Ok(())
}
