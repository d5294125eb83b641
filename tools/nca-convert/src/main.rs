//! nca-convert - NCA asset converter
//!
//! Converts raw assets (PNG/JPEG/BMP, WAV, glTF/GLB) into `.nca` files and
//! inspects existing ones.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nca_common::AssetType;
use std::path::{Path, PathBuf};

use nca_convert::{builder, convert, inspect, manifest, output};

#[derive(Parser)]
#[command(name = "nca-convert")]
#[command(about = "NCA asset converter")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build assets from a manifest file
    Build {
        /// Path to nca.toml manifest
        #[arg(default_value = "nca.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rebuild targets that are already up to date
        #[arg(short, long)]
        force: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to nca.toml manifest
        #[arg(default_value = "nca.toml")]
        manifest: PathBuf,
    },

    /// Convert a single source file
    Convert {
        /// Asset kind (texture, cube-map, audio-clip, mesh, hull-collider,
        /// concave-collider, skeletal-animation)
        kind: AssetType,

        /// Input file
        input: PathBuf,

        /// Output .nca file (default: input name with .nca extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mesh or animation name inside a glTF file
        #[arg(long)]
        internal_name: Option<String>,
    },

    /// Print the header and contents summary of .nca files
    Inspect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn manifest_dir(manifest: &Path) -> &Path {
    manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            force,
        } => {
            tracing::debug!("Building assets from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let targets = config.targets(manifest_dir(&manifest), output.as_deref())?;
            manifest::validate(&targets)?;
            builder::build_all(&targets, force)?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let targets = config.targets(manifest_dir(&manifest), None)?;
            manifest::validate(&targets)?;
            tracing::info!("Manifest is valid! {} targets", targets.len());
        }

        Commands::Convert {
            kind,
            input,
            output,
            internal_name,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(nca_common::NCA_EXTENSION));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            let asset = convert::import_asset(kind, &input, internal_name.as_deref())
                .with_context(|| format!("Failed to convert {:?}", input))?;
            output::write_asset(&asset, &output)?;
            tracing::info!("Done!");
        }

        Commands::Inspect { files, json } => {
            let reports = files
                .iter()
                .map(|file| inspect::inspect_file(file))
                .collect::<Result<Vec<_>>>()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{report}");
                }
            }
        }
    }

    Ok(())
}
