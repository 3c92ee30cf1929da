//! Razer device ID header generator CLI
//!
//! Run from the project root (or pass `--root`) on every build.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, warn};

use razer_device_ids::GeneratorConfig;

#[derive(Parser)]
#[command(name = "razer-device-ids")]
#[command(version, about = "Generate DeviceIds.h from the Razer driver headers")]
struct Cli {
    /// Config file path (default: built-in Razer header table)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory that source and output paths are relative to
    #[arg(long, default_value = ".", value_name = "DIR")]
    root: PathBuf,

    /// Override the output header path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only verify the header is up to date, do not write it
    #[arg(long)]
    check: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                warn!(
                    "Config {} not found, using built-in defaults",
                    path.display()
                );
            }
            debug!("Loading config from {:?}", path);
            GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }

    if cli.check {
        let report = razer_device_ids::check(&config, &cli.root)?;
        let name = report
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.output.display().to_string());
        println!("{name} is up to date ({} device IDs).", report.count);
    } else {
        let report = razer_device_ids::generate(&config, &cli.root)?;
        println!("Generated {} device IDs.", report.count);
    }

    Ok(())
}
