//! hashstamp CLI
//!
//! Run with: `hashstamp [COMMAND]`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hashstamp::{Generation, RuntimeArtifact, StampConfig, generate, load_manifest, scan_dir};

#[derive(Parser)]
#[command(name = "hashstamp")]
#[command(about = "Content fingerprints for code members, as constants and a lookup table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a Rust source tree and render its hash stamps
    Scan {
        /// Source directory, usually `src`
        dir: PathBuf,

        /// Crate name used as the first namespace segment
        #[arg(long)]
        crate_name: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render hash stamps from a JSON descriptor manifest
    Manifest {
        /// Manifest file (JSON array of unit descriptors)
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Look up one member in a runtime JSON artifact
    Lookup {
        /// Runtime artifact written by `--json`
        file: PathBuf,
        namespace: String,
        type_name: String,
        member: String,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Emit the runtime artifact as JSON instead of Rust source
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => StampConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => StampConfig::default(),
    };

    match cli.command {
        Commands::Scan {
            dir,
            crate_name,
            output,
        } => cmd_scan(config, &dir, crate_name, &output),
        Commands::Manifest { file, output } => cmd_manifest(&config, &file, &output),
        Commands::Lookup {
            file,
            namespace,
            type_name,
            member,
        } => cmd_lookup(&file, &namespace, &type_name, &member),
    }
}

fn cmd_scan(
    mut config: StampConfig,
    dir: &Path,
    crate_name: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    if let Some(name) = crate_name {
        config = config.with_crate_name(name);
        config.validate()?;
    }
    let descriptors = scan_dir(dir, &config.source)?;
    let generation = generate(&descriptors, &config)?;
    write_output(&generation, &config, output)
}

fn cmd_manifest(config: &StampConfig, file: &Path, output: &OutputArgs) -> Result<()> {
    let descriptors = load_manifest(file)?;
    let generation = generate(&descriptors, config)?;
    write_output(&generation, config, output)
}

fn cmd_lookup(file: &Path, namespace: &str, type_name: &str, member: &str) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read runtime artifact: {}", file.display()))?;
    let runtime = RuntimeArtifact::from_json(&json)?;

    match runtime.get(namespace, type_name, member) {
        Some(hash) => {
            println!("{}  {}", hash.digest, hash.signature);
            Ok(())
        }
        None => bail!("no member {namespace}.{type_name}.{member} in {}", file.display()),
    }
}

fn write_output(generation: &Generation, config: &StampConfig, output: &OutputArgs) -> Result<()> {
    let rendered = if output.json {
        generation.runtime_artifact.to_json()?
    } else {
        generation.render_source(&config.emit)?
    };

    match &output.out {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            println!(
                "Wrote {} members ({} skipped) to {}",
                generation.registry.len(),
                generation.skipped.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
