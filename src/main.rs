//! Cubepano CLI - cubemap stitcher and panorama converter.
//!
//! Stitches six face images into a cross-layout cubemap and converts
//! the result into an equirectangular panorama.

use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use cubepano::io::PngSaveOptions;
use cubepano::panorama::ProjectOptions;
use cubepano::pipeline::{ConversionJob, Pipeline, ProjectStage, StitchStage};

/// Stitch six cubemap faces and project an equirectangular panorama.
#[derive(Parser)]
#[command(name = "cubepano")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing <prefix>_right.png ... <prefix>_back.png.
    directory: PathBuf,

    /// Width of the output panorama in pixels.
    #[arg(default_value = "4096")]
    pano_width: u32,

    /// Only render the top hemisphere (sky only).
    #[arg(long)]
    hemisphere: bool,

    /// Panorama height in pixels; defaults to width/2, or width/4 with
    /// --hemisphere.
    #[arg(long)]
    pano_height: Option<u32>,

    /// Output directory for the composite and panorama files; defaults
    /// to the input directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if cli.pano_width == 0 {
        eprintln!("Error: panorama width must be positive");
        std::process::exit(1);
    }

    let output = cli.output.clone().unwrap_or_else(|| cli.directory.clone());

    println!("Cubepano - Cubemap Stitcher & Panorama Converter");
    println!("================================================");
    println!("Input: {}", cli.directory.display());
    println!("Output: {}", output.display());
    println!("Panorama width: {}", cli.pano_width);
    if cli.hemisphere {
        println!("Hemisphere mode: only rendering the top half (sky)");
    }

    let start = Instant::now();

    let options = ProjectOptions {
        width: cli.pano_width,
        height: cli.pano_height,
        hemisphere: cli.hemisphere,
    };

    // Print projection progress at ~10% steps. Batches may complete out
    // of order, so only ever step the percentage forward.
    let last_percent = AtomicU32::new(0);
    let project_stage = ProjectStage::new(options, PngSaveOptions::default()).with_progress(
        move |done, total| {
            let percent = done * 100 / total;
            let prev = last_percent.fetch_max(percent, Ordering::Relaxed);
            if percent / 10 > prev / 10 {
                println!("  Progress: {}%", percent);
            }
        },
    );

    let mut pipeline = Pipeline::new();
    pipeline.add_stage(StitchStage::new(PngSaveOptions::default()));
    pipeline.add_stage(project_stage);

    let mut job = ConversionJob::new(cli.directory, output);
    pipeline
        .run_with_callbacks(
            &mut job,
            |name, i, total| println!("\n[{}/{}] Starting: {}", i + 1, total, name),
            |name, i, total| println!("[{}/{}] Completed: {}", i + 1, total, name),
        )
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    println!("\nDone in {:.2?}", start.elapsed());
    for path in &job.written {
        println!("  Wrote: {}", path.display());
    }
}
