//! Source image discovery.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// File extensions eligible for optimization.
pub const SOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Returns `true` if the path has an extension from [`SOURCE_EXTENSIONS`].
pub fn is_source_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively collects optimizable source images under `root`.
///
/// Directories are traversed depth-first; sibling order is whatever the
/// underlying directory listing returns. Unreadable subdirectories are
/// silently skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — `root` does not exist.
/// - [`CoreError::NotADirectory`] — `root` is not a directory.
pub fn find_images(root: &Path) -> CoreResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CoreError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root.to_path_buf()));
    }

    let mut images = Vec::new();
    collect_images(root, &mut images);
    Ok(images)
}

fn collect_images(dir: &Path, out: &mut Vec<PathBuf>) {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(_) => return,
    };

    for dir_entry in read_dir.filter_map(|r| r.ok()) {
        let path = dir_entry.path();
        let is_dir = dir_entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

        if is_dir {
            collect_images(&path, out);
        } else if is_source_image(&path) {
            out.push(path);
        }
    }
}
