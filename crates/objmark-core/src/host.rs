//! The windowing side of a viewer session. A session is given one surface at
//! construction and talks to it only through this trait.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::Result;
use crate::render::{rasterize, Scene};

pub trait Surface {
    /// Attach to a window of the given title and pixel size.
    fn bind(&mut self, title: &str, width: u32, height: u32);

    /// Detach from the window.
    fn release(&mut self);

    /// Show one frame.
    fn present(&mut self, scene: &Scene<'_>);
}

/// Surface that drops every frame.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn bind(&mut self, _title: &str, _width: u32, _height: u32) {}

    fn release(&mut self) {}

    fn present(&mut self, _scene: &Scene<'_>) {}
}

/// Headless surface that rasterizes each presented frame in memory.
#[derive(Debug, Default)]
pub struct RasterSurface {
    title: Option<String>,
    last_frame: Option<RgbImage>,
    frames_presented: usize,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn last_frame(&self) -> Option<&RgbImage> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    /// Write the most recent frame as PNG. Returns `false` if nothing has
    /// been presented yet.
    pub fn save_last_frame(&self, path: &Path) -> Result<bool> {
        let Some(frame) = &self.last_frame else {
            return Ok(false);
        };
        frame.save_with_format(path, ImageFormat::Png)?;
        Ok(true)
    }
}

impl Surface for RasterSurface {
    fn bind(&mut self, title: &str, _width: u32, _height: u32) {
        self.title = Some(title.to_string());
    }

    fn release(&mut self) {
        self.title = None;
    }

    fn present(&mut self, scene: &Scene<'_>) {
        self.last_frame = Some(rasterize(scene));
        self.frames_presented += 1;
    }
}
