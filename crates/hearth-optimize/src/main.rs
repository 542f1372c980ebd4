//! hearth-optimize — batch image optimization for the Hearth site.
//!
//! Walks the public images tree, re-encodes each PNG/JPEG source as lossy
//! WebP alongside the original, generates a blur placeholder per image,
//! and writes an `image-manifest.json` consumed by the site's image
//! components. Run it manually or as a build step:
//!
//! ```text
//! hearth-optimize [public-root]
//! ```
//!
//! The public root defaults to `public`. Per-image failures are reported
//! and skipped; only a startup or manifest-write failure exits non-zero.

use std::path::PathBuf;

use anyhow::Context;
use hearth_core::media::pipeline::{self, PipelineConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_optimize=info,hearth_core=info".into()),
        )
        .init();

    let public_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("public"));
    let config = PipelineConfig::for_public_root(public_root);

    tracing::info!("input directory: {}", config.input_dir.display());
    tracing::info!(
        "max width: {}px, quality: {}",
        config.max_width,
        config.quality
    );

    let report = pipeline::run(&config).context("image optimization failed")?;

    let Some(manifest) = &report.manifest else {
        println!("No images found. Exiting.");
        return Ok(());
    };

    for failure in &report.failures {
        println!("  skipped {}: {}", failure.path.display(), failure.error);
    }

    let summary = &manifest.summary;
    println!();
    println!(
        "Processed {} images ({} skipped)",
        manifest.images.len(),
        report.failures.len()
    );
    println!("  Total original:  {}", summary.total_original_size_formatted);
    println!("  Total optimized: {}", summary.total_optimized_size_formatted);
    println!(
        "  Total savings:   {} ({}%)",
        summary.total_savings_formatted, summary.total_savings_percent
    );
    println!();
    println!("Manifest written to: {}", config.manifest_path.display());

    Ok(())
}
