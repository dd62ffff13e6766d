use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANNOTATION_FILE, DEFAULT_ASPECT_RATIO, DEFAULT_DISPLAY_SCALE, DEFAULT_IMAGE_FOLDER,
};
use crate::geometry::Rect;

/// Top-level persisted settings for an annotation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_folder: PathBuf,
    pub output_file: PathBuf,
    pub viewer: ViewerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_folder: PathBuf::from(DEFAULT_IMAGE_FOLDER),
            output_file: PathBuf::from(DEFAULT_ANNOTATION_FILE),
            viewer: ViewerConfig::default(),
        }
    }
}

/// Viewer settings. Values are taken as-is here and validated when imported
/// into a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Display magnification relative to the source image.
    pub display_scale: f64,
    /// Whether drags and resizes keep `aspect_ratio`.
    pub fix_marker_ratio: bool,
    /// Marker width / height.
    pub aspect_ratio: f64,
    /// Keep zero-width or zero-height markers as points.
    pub accept_point_shape: bool,
    pub guide: Option<GuideConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display_scale: DEFAULT_DISPLAY_SCALE,
            fix_marker_ratio: false,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            accept_point_shape: false,
            guide: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// 0: none, 1: square, 2: rectangle, 3: circle, 4: ellipse.
    pub shape: i32,
    /// Guide placement in source-image pixels.
    pub position: Rect,
    pub display: bool,
}
