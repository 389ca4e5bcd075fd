use anyhow::{Context, Result};
use bluemark_cli::{load_frame, render_overlay, FrameReport};
use bluemark_core::{init_thread_pool, SeedStrategy, Threshold};
use bluemark_detect::DetectorConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bluemark")]
#[command(about = "Locate up to two blue markers in an image")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect markers in an image.
    Detect(DetectArgs),

    /// Write a preset configuration file (JSON, or TOML by extension).
    Config {
        /// Preset name: default, sensitive or strict.
        #[arg(long, default_value = "default")]
        preset: String,

        /// Output path; prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Blueness threshold (0-255); overrides the config file.
    #[arg(long)]
    threshold: Option<Threshold>,

    /// Configuration file (JSON or TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed strategy: scan-order, blueness or spatial.
    #[arg(long)]
    seeds: Option<SeedStrategy>,

    /// Path to write the debug overlay (PNG).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Path to write detection results (JSON).
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect(args) => run_detect(args),
        Commands::Config { preset, out } => run_config(&preset, out),
    }
}

fn run_detect(args: DetectArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DetectorConfig::new(),
    };
    if let Some(seeds) = args.seeds {
        config.core.seed_strategy = seeds;
    }
    tracing::info!("{}", config.summary());

    if config.core.parallel_scan {
        init_thread_pool(config.core.n_threads).context("failed to build thread pool")?;
    }

    let threshold = args.threshold.unwrap_or(config.core.threshold);
    let detector = config.to_builder().build()?;

    let frame = load_frame(&args.image)?;
    let (width, height) = frame.dimensions();

    let t0 = Instant::now();
    let trace = detector.detect_traced(width as usize, height as usize, frame.as_raw(), threshold)?;
    tracing::info!("detected {} marker(s) in {:.2?}", trace.candidates.len(), t0.elapsed());

    let report = FrameReport::new(&args.image, width, height, &trace);
    println!("{}", report.summary());

    if let Some(path) = &args.json {
        report.save_json(path)?;
        tracing::info!("saved results to {}", path.display());
    }

    if let Some(path) = &args.overlay {
        render_overlay(&trace, width, height)
            .save(path)
            .with_context(|| format!("failed to save overlay {}", path.display()))?;
        tracing::info!("saved overlay to {}", path.display());
    }

    Ok(())
}

fn run_config(preset: &str, out: Option<PathBuf>) -> Result<()> {
    let config = DetectorConfig::preset(preset)?;
    match out {
        Some(path) => {
            config
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {} preset to {}", preset, path.display());
        }
        None => println!("{}", config.to_json()?),
    }
    Ok(())
}
