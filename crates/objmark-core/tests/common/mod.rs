#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Write a `width` x `height` PNG whose pixel values encode their position.
pub fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Temporary directory holding `count` images named `img_0.png`, `img_1.png`, ...
pub fn make_image_dir(count: usize, width: u32, height: u32) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..count {
        write_test_image(dir.path(), &format!("img_{i}.png"), width, height);
    }
    dir
}

/// Non-empty annotation lines of a file, headers excluded.
pub fn annotation_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
