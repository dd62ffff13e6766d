use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::DynamicImage;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::geometry::Rect;
use crate::io::image_io::{crop_region, load_image, save_png};

/// Output file for crop number `n`.
pub fn crop_output_path(dir: &Path, n: usize) -> PathBuf {
    dir.join(format!("{n}.png"))
}

/// Save every annotated region as its own PNG under `out_dir`.
///
/// Files are numbered `1.png`, `2.png`, ... in image order, then marker
/// order. Images that fail to decode are skipped without using up a
/// number; a marker lying outside its decoded image still takes one.
///
/// Images are decoded in parallel a batch at a time, so only one batch is
/// held in memory. `on_progress(images_done)` is called as each image is
/// decoded. Returns the number of files written.
pub fn crop_annotated_regions(
    out_dir: &Path,
    images: &[PathBuf],
    rects: &[Vec<Rect>],
    on_progress: impl Fn(usize) + Send + Sync,
) -> Result<usize> {
    std::fs::create_dir_all(out_dir)?;

    let batch = rayon::current_num_threads().max(1) * 2;
    let done = AtomicUsize::new(0);
    let mut next = 1;
    let mut total = 0;

    for (paths, batch_rects) in images.chunks(batch).zip(rects.chunks(batch)) {
        let decoded: Vec<Option<DynamicImage>> = paths
            .par_iter()
            .zip(batch_rects.par_iter())
            .map(|(path, image_rects)| {
                let image = if image_rects.is_empty() {
                    None
                } else {
                    decode_or_skip(path)
                };
                on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
                image
            })
            .collect();

        // Numbers only advance over images that decoded.
        let mut jobs = Vec::new();
        for ((image, image_rects), path) in decoded.iter().zip(batch_rects).zip(paths) {
            let Some(image) = image else {
                continue;
            };
            jobs.push((path.as_path(), image, image_rects.as_slice(), next));
            next += image_rects.len();
        }

        let written: Vec<Result<usize>> = jobs
            .par_iter()
            .map(|&(path, image, image_rects, first)| {
                save_regions(out_dir, path, image, image_rects, first)
            })
            .collect();
        for count in written {
            total += count?;
        }
    }

    info!(dir = %out_dir.display(), files = total, "Cropped annotated regions");
    Ok(total)
}

fn decode_or_skip(path: &Path) -> Option<DynamicImage> {
    match load_image(path) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable image");
            None
        }
    }
}

fn save_regions(
    out_dir: &Path,
    path: &Path,
    image: &DynamicImage,
    rects: &[Rect],
    first: usize,
) -> Result<usize> {
    let mut written = 0;
    for (offset, rect) in rects.iter().enumerate() {
        let Some(region) = crop_region(image, rect) else {
            warn!(path = %path.display(), ?rect, "Marker lies outside the image");
            continue;
        };
        save_png(&region, &crop_output_path(out_dir, first + offset))?;
        written += 1;
    }
    Ok(written)
}
