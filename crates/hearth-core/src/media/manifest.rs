//! Manifest model and aggregation.
//!
//! The manifest is the pipeline's primary deliverable: a single JSON
//! document mapping each optimized artifact's public path to its
//! before/after metadata and blur placeholder. Field names are camelCase
//! on the wire so the site's image components can consume it directly.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Snapshot of the settings a manifest was generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub max_width: u32,
    pub quality: u8,
}

/// Summary of a source image as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Path relative to the public root, forward-slashed.
    pub path: String,
    pub size: u64,
    pub size_formatted: String,
    pub width: u32,
    pub height: u32,
}

/// Summary of an optimized artifact written next to its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedInfo {
    /// Path relative to the public root, forward-slashed.
    pub path: String,
    /// Web-servable path: the relative path with a leading slash.
    pub public_path: String,
    pub size: u64,
    pub size_formatted: String,
    pub width: u32,
    pub height: u32,
}

/// Byte-size delta between a source and its optimized artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings {
    pub bytes: i64,
    /// Percentage reduction with one decimal place, e.g. `"75.0"`.
    pub percent: String,
}

impl Savings {
    /// Computes `(1 − optimized/original) × 100` to one decimal place.
    pub fn from_sizes(original: u64, optimized: u64) -> Self {
        Self {
            bytes: original as i64 - optimized as i64,
            percent: savings_percent(original, optimized),
        }
    }
}

/// One processed image in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub original: SourceInfo,
    pub optimized: OptimizedInfo,
    #[serde(rename = "blurDataURL")]
    pub blur_data_url: String,
    pub savings: Savings,
}

/// Aggregate totals across every entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_original_size: u64,
    pub total_optimized_size: u64,
    pub total_savings: i64,
    pub total_original_size_formatted: String,
    pub total_optimized_size_formatted: String,
    pub total_savings_formatted: String,
    pub total_savings_percent: String,
}

/// The full manifest document.
///
/// Rebuilt from scratch on every pipeline run and written over any
/// previous manifest unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// ISO-8601 generation timestamp.
    pub generated_at: String,
    pub config: ConfigSnapshot,
    /// Keyed by the optimized artifact's public path.
    pub images: BTreeMap<String, ManifestEntry>,
    pub summary: Summary,
}

impl Manifest {
    /// Serializes the manifest as pretty JSON and writes it to `path`,
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Manifest`] if serialization fails and
    /// [`crate::CoreError::Io`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Accumulates per-image results into a [`Manifest`].
#[derive(Debug)]
pub struct ManifestBuilder {
    config: ConfigSnapshot,
    images: BTreeMap<String, ManifestEntry>,
    total_original: u64,
    total_optimized: u64,
}

impl ManifestBuilder {
    pub fn new(config: ConfigSnapshot) -> Self {
        Self {
            config,
            images: BTreeMap::new(),
            total_original: 0,
            total_optimized: 0,
        }
    }

    /// Records a processed image, keyed by its optimized public path.
    pub fn add(&mut self, entry: ManifestEntry) {
        self.total_original += entry.original.size;
        self.total_optimized += entry.optimized.size;
        self.images.insert(entry.optimized.public_path.clone(), entry);
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Stamps the generation time and computes the aggregate summary.
    pub fn finish(self) -> Manifest {
        let total_savings = self.total_original as i64 - self.total_optimized as i64;
        let summary = Summary {
            total_original_size: self.total_original,
            total_optimized_size: self.total_optimized,
            total_savings,
            total_original_size_formatted: format_bytes(self.total_original),
            total_optimized_size_formatted: format_bytes(self.total_optimized),
            total_savings_formatted: format_bytes(
                self.total_original.saturating_sub(self.total_optimized),
            ),
            total_savings_percent: savings_percent(self.total_original, self.total_optimized),
        };

        Manifest {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            config: self.config,
            images: self.images,
            summary,
        }
    }
}

/// Formats a byte count as a human-readable `B`/`KB`/`MB` string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Percentage reduction with one decimal place; `"0.0"` when nothing was
/// processed.
fn savings_percent(original: u64, optimized: u64) -> String {
    if original == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", (1.0 - optimized as f64 / original as f64) * 100.0)
}

/// Renders `path` relative to `public_root` with forward slashes,
/// regardless of the host path-separator convention.
pub fn public_relative(path: &Path, public_root: &Path) -> String {
    let rel = path.strip_prefix(public_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
