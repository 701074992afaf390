use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use faceblur::pipeline::OutputPaths;
use faceblur::{BlurConfig, Pipeline, RecordedDetections};

#[derive(Parser)]
#[command(name = "faceblur")]
#[command(about = "Blur a portrait's face while keeping the eyes sharp, optionally adding eyewear")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// JSON file with face and eye detections
    #[arg(long, value_name = "JSON")]
    detections: PathBuf,

    /// Overlay graphic (PNG with alpha) placed over the eyes
    #[arg(long, value_name = "PNG")]
    overlay: Option<PathBuf>,

    /// Directory for the output images
    #[arg(long, value_name = "DIR", default_value = "images")]
    out_dir: PathBuf,

    /// JSON file overriding the default tunables
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => BlurConfig::from_json_file(path)?,
        None => BlurConfig::default(),
    };
    let detections = RecordedDetections::from_json_file(&args.detections)?;

    let mut pipeline = Pipeline::new(Box::new(detections))
        .with_config(config)?
        .with_verbose(args.verbose);
    if let Some(overlay) = args.overlay {
        pipeline = pipeline.with_overlay(overlay);
    }
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let paths = OutputPaths::in_dir(&args.out_dir);
    let output = pipeline.process_file(&args.image_path, &paths)?;

    println!("\n=== Face Blur Results ===");
    println!(
        "Face at ({}, {}) {}x{}, {} eye(s) kept",
        output.face.x,
        output.face.y,
        output.face.width,
        output.face.height,
        output.eyes.len()
    );
    for warning in &output.warnings {
        println!("  warning: {}", warning);
    }
    println!("\nWrote:");
    println!("  {} (ellipse + eye circles)", paths.debug.display());
    println!("  {}", paths.blurred.display());
    println!("  {}", paths.with_overlay.display());

    Ok(())
}
