use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Image directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No supported image files in {}", .0.display())]
    NoImages(PathBuf),
}

pub type Result<T> = std::result::Result<T, MarkerError>;
