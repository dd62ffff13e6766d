use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::{MarkerError, Result};

/// True if the path carries one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// List the supported image files directly inside `dir`, sorted by path.
///
/// Fails if `dir` is not a directory or holds no supported images.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MarkerError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }

    if images.is_empty() {
        return Err(MarkerError::NoImages(dir.to_path_buf()));
    }

    images.sort();
    debug!(dir = %dir.display(), count = images.len(), "Scanned image directory");
    Ok(images)
}
