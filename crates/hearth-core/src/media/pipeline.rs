//! Pipeline orchestration: discover, transform, aggregate, write.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::media::discover::find_images;
use crate::media::manifest::{ConfigSnapshot, Manifest, ManifestBuilder};
use crate::media::optimize::optimize_image;

/// Fixed settings for a pipeline run.
///
/// The numeric values are deliberately constants-with-a-struct rather
/// than operator-tunable options; the only thing an operator chooses is
/// where the public root lives.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory walked for source images.
    pub input_dir: PathBuf,
    /// Root that manifest paths are made relative to.
    pub public_root: PathBuf,
    /// Where the manifest JSON is written.
    pub manifest_path: PathBuf,
    /// Maximum output width in pixels; wider sources are scaled down.
    pub max_width: u32,
    /// Lossy WebP quality for the optimized artifact.
    pub quality: u8,
    /// libwebp effort ("method", 0–6): higher is smaller but slower.
    pub effort: i32,
    /// Bounding box for the blur placeholder.
    pub placeholder_size: u32,
    /// Lossy WebP quality for the blur placeholder.
    pub placeholder_quality: u8,
}

impl PipelineConfig {
    /// Settings rooted at `public_root`, mirroring the site layout:
    /// sources live under `<public_root>/images`, and the manifest is
    /// written to `image-manifest.json` in the working directory.
    pub fn for_public_root(public_root: impl Into<PathBuf>) -> Self {
        let public_root = public_root.into();
        Self {
            input_dir: public_root.join("images"),
            public_root,
            manifest_path: PathBuf::from("image-manifest.json"),
            max_width: 1920,
            quality: 85,
            effort: 6,
            placeholder_size: 10,
            placeholder_quality: 20,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_public_root("public")
    }
}

/// A per-image failure that did not abort the run.
#[derive(Debug)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub error: CoreError,
}

/// Outcome of a pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// `None` when no source images were discovered; no manifest file is
    /// written in that case.
    pub manifest: Option<Manifest>,
    /// Images that failed to decode, resize, or encode, in discovery order.
    pub failures: Vec<ImageFailure>,
}

impl PipelineReport {
    /// Number of images that made it into the manifest.
    pub fn processed(&self) -> usize {
        self.manifest.as_ref().map(|m| m.images.len()).unwrap_or(0)
    }
}

/// Runs the full pipeline over `config.input_dir`.
///
/// Images are processed sequentially, one at a time to completion. A
/// failure on a single image is logged with the file name and skipped;
/// the failed image appears in the report but not in the manifest and
/// does not contribute to the aggregate totals. Re-running on an
/// unchanged tree reproduces equivalent outputs; there is no caching or
/// change detection.
///
/// # Errors
///
/// - [`CoreError::NotFound`] / [`CoreError::NotADirectory`] — the input
///   directory cannot be enumerated; nothing has been processed.
/// - [`CoreError::Manifest`] / [`CoreError::Io`] — the manifest itself
///   could not be serialized or written.
pub fn run(config: &PipelineConfig) -> CoreResult<PipelineReport> {
    let images = find_images(&config.input_dir)?;
    tracing::info!(
        "found {} source images under {}",
        images.len(),
        config.input_dir.display()
    );

    if images.is_empty() {
        return Ok(PipelineReport {
            manifest: None,
            failures: Vec::new(),
        });
    }

    let mut builder = ManifestBuilder::new(ConfigSnapshot {
        max_width: config.max_width,
        quality: config.quality,
    });
    let mut failures = Vec::new();

    for path in images {
        match optimize_image(&path, config) {
            Ok(entry) => {
                tracing::info!(
                    "optimized {}: {} -> {} ({}% saved)",
                    path.display(),
                    entry.original.size_formatted,
                    entry.optimized.size_formatted,
                    entry.savings.percent
                );
                builder.add(entry);
            }
            Err(error) => {
                tracing::warn!("failed to optimize {}: {error}", path.display());
                failures.push(ImageFailure { path, error });
            }
        }
    }

    let manifest = builder.finish();
    manifest.write(&config.manifest_path)?;
    tracing::info!("manifest written to {}", config.manifest_path.display());

    Ok(PipelineReport {
        manifest: Some(manifest),
        failures,
    })
}
