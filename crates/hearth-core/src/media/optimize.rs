//! Per-image transform: resize, WebP re-encode, blur placeholder.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::error::{CoreError, CoreResult};
use crate::media::manifest::{
    format_bytes, public_relative, ManifestEntry, OptimizedInfo, Savings, SourceInfo,
};
use crate::media::pipeline::PipelineConfig;

/// Computes the output dimensions for a source of `width` × `height`.
///
/// Sources wider than `max_width` are scaled down proportionally so the
/// width equals `max_width`, with the height rounded to the nearest
/// integer. Narrower sources keep their dimensions; output is never
/// upscaled.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let ratio = max_width as f64 / width as f64;
    (max_width, (height as f64 * ratio).round() as u32)
}

/// Encodes `img` as lossy WebP at the given quality and effort level.
fn encode_webp(img: &DynamicImage, quality: u8, effort: i32) -> CoreResult<Vec<u8>> {
    // libwebp only accepts RGB8/RGBA8 input.
    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
    let encoder = webp::Encoder::from_image(&rgba)
        .map_err(|e| CoreError::Image(format!("webp encoder: {e}")))?;

    let mut config = webp::WebPConfig::new()
        .map_err(|_| CoreError::Image("webp config initialization failed".to_string()))?;
    config.lossless = 0;
    config.quality = quality as f32;
    config.method = effort;

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| CoreError::Image(format!("webp encode failed: {e:?}")))?;
    Ok(memory.to_vec())
}

/// Generates the tiny blurred preview for `img` as a self-contained data URL.
///
/// The image is resized to fit inside the placeholder bounding box
/// (aspect ratio preserved) and re-encoded at a much lower quality, then
/// base64-encoded with a `data:image/webp;base64,` prefix.
pub fn blur_data_url(img: &DynamicImage, config: &PipelineConfig) -> CoreResult<String> {
    let thumb = img.resize(
        config.placeholder_size,
        config.placeholder_size,
        FilterType::Triangle,
    );
    let bytes = encode_webp(&thumb, config.placeholder_quality, config.effort)?;
    Ok(format!("data:image/webp;base64,{}", BASE64.encode(&bytes)))
}

/// Optimizes a single source image, writing `<base>.webp` alongside it.
///
/// Reads the source's byte size and dimensions, re-encodes it as lossy
/// WebP at the configured quality (downscaling to the maximum width if
/// needed), and generates the blur placeholder. Paths in the returned
/// entry are relative to `config.public_root` with forward slashes.
///
/// # Errors
///
/// - [`CoreError::Io`] — the source cannot be read or the artifact cannot
///   be written.
/// - [`CoreError::Image`] — the source cannot be decoded or re-encoded.
pub fn optimize_image(path: &Path, config: &PipelineConfig) -> CoreResult<ManifestEntry> {
    let original_size = std::fs::metadata(path)?.len();
    let img = image::open(path).map_err(|e| CoreError::Image(format!("{}: {e}", path.display())))?;
    let (width, height) = img.dimensions();

    let (target_w, target_h) = target_dimensions(width, height, config.max_width);
    let optimized_bytes = if (target_w, target_h) == (width, height) {
        encode_webp(&img, config.quality, config.effort)?
    } else {
        let resized = img.resize(target_w, target_h, FilterType::Lanczos3);
        encode_webp(&resized, config.quality, config.effort)?
    };

    let output_path = path.with_extension("webp");
    std::fs::write(&output_path, &optimized_bytes)?;
    let optimized_size = optimized_bytes.len() as u64;

    let blur_data_url = blur_data_url(&img, config)?;

    let original_rel = public_relative(path, &config.public_root);
    let optimized_rel = public_relative(&output_path, &config.public_root);

    Ok(ManifestEntry {
        original: SourceInfo {
            path: original_rel,
            size: original_size,
            size_formatted: format_bytes(original_size),
            width,
            height,
        },
        optimized: OptimizedInfo {
            public_path: format!("/{optimized_rel}"),
            path: optimized_rel,
            size: optimized_size,
            size_formatted: format_bytes(optimized_size),
            width: target_w,
            height: target_h,
        },
        blur_data_url,
        savings: Savings::from_sizes(original_size, optimized_size),
    })
}
